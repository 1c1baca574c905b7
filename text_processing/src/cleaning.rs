//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::borrow::Cow;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static NOT_A_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans raw review texts before they are tokenized.
///
/// The steps are applied in a fixed order:
/// html tags, urls, non letters, lowercase and finally whitespace collapsing.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct TextCleaner {
    /// Replaces html tags like `<br />` with a space.
    pub strip_html: bool,
    /// Replaces urls with a space.
    pub strip_urls: bool,
    /// Replaces everything that is not an ascii letter or whitespace with a space.
    pub letters_only: bool,
    /// Lowercases the text.
    pub lowercase: bool,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self {
            strip_html: true,
            strip_urls: true,
            letters_only: true,
            lowercase: true,
        }
    }
}

impl TextCleaner {
    pub const fn new(strip_html: bool, strip_urls: bool, letters_only: bool, lowercase: bool) -> Self {
        Self { strip_html, strip_urls, letters_only, lowercase }
    }

    /// A cleaner that only collapses whitespace.
    pub const fn whitespace_only() -> Self {
        Self::new(false, false, false, false)
    }

    pub fn clean(&self, text: &str) -> String {
        let mut text = Cow::Borrowed(text);
        if self.strip_html {
            text = replace_with_space(&HTML_TAG, text);
        }
        if self.strip_urls {
            text = replace_with_space(&URL, text);
        }
        if self.letters_only {
            text = replace_with_space(&NOT_A_LETTER, text);
        }
        if self.lowercase {
            text = Cow::Owned(text.to_lowercase());
        }
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}

fn replace_with_space<'a>(regex: &Regex, text: Cow<'a, str>) -> Cow<'a, str> {
    if regex.is_match(&text) {
        Cow::Owned(regex.replace_all(&text, " ").into_owned())
    } else {
        text
    }
}

#[cfg(test)]
mod test {
    use super::TextCleaner;

    #[test]
    fn removes_html_line_breaks() {
        let cleaner = TextCleaner::default();
        assert_eq!(
            "one of the best films ever",
            cleaner.clean("One of the best films ever.<br /><br />")
        );
    }

    #[test]
    fn removes_urls_and_punctuation() {
        let cleaner = TextCleaner::default();
        assert_eq!(
            "see for the trailer it s great",
            cleaner.clean("See https://example.com/trailer?id=1 for the trailer, it's GREAT!!!")
        );
        assert_eq!("visit now", cleaner.clean("Visit www.imdb.com now"));
    }

    #[test]
    fn digits_are_dropped() {
        let cleaner = TextCleaner::default();
        assert_eq!("out of", cleaner.clean("10 out of 10"));
    }

    #[test]
    fn empty_input_stays_empty() {
        let cleaner = TextCleaner::default();
        assert_eq!("", cleaner.clean(""));
        assert_eq!("", cleaner.clean("  <br/> 123 !!! "));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let cleaner = TextCleaner::default();
        let once = cleaner.clean("A <i>truly</i> awful   movie... 2/10, avoid http://spam.example");
        assert_eq!(once, cleaner.clean(&once));
    }

    #[test]
    fn whitespace_only_keeps_everything_else() {
        let cleaner = TextCleaner::whitespace_only();
        assert_eq!("Hello, <b>World</b>!", cleaner.clean("  Hello,\n\t<b>World</b>!  "));
    }
}
