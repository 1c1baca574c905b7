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
use std::sync::Arc;
use isolang::Language;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use crate::cleaning::TextCleaner;
use crate::configs::TokenizerConfig;
use crate::lemmatizer::Lemmatizer;
use crate::stopword_registry::{ContainsKind, StopWordList, StopWordRegistry};

/// Turns a raw review into the tokens fed to the vectorizer.
///
/// The tokenizer is persisted together with the vectorizer, a text is
/// therefore always preprocessed the same way it was while training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokenizer {
    language: Language,
    cleaner: Option<TextCleaner>,
    normalize: bool,
    stop_words: Option<Arc<StopWordList>>,
    lemmatizer: Option<Lemmatizer>,
    stemmer: Option<Algorithm>,
    min_token_length: usize,
}

impl Tokenizer {
    pub fn new(
        language: Language,
        cleaner: Option<TextCleaner>,
        normalize: bool,
        stop_words: Option<Arc<StopWordList>>,
        lemmatizer: Option<Lemmatizer>,
        stemmer: Option<Algorithm>,
        min_token_length: usize,
    ) -> Self {
        Self {
            language,
            cleaner,
            normalize,
            stop_words,
            lemmatizer,
            stemmer,
            min_token_length,
        }
    }

    /// Creates the tokenizer described by [cfg], the stop words are taken from [registry].
    pub fn from_config(cfg: &TokenizerConfig, registry: &StopWordRegistry) -> Self {
        let stop_words = if cfg.filter_stopwords {
            let found = registry.get_or_load(&cfg.language);
            if found.is_none() {
                log::warn!("No stop words found for {}, nothing is filtered.", cfg.language.to_name());
            }
            found
        } else {
            None
        };
        Self::new(
            cfg.language,
            cfg.cleaner,
            cfg.normalize_text,
            stop_words,
            cfg.lemmatize.then(Lemmatizer::default),
            cfg.stemmer,
            cfg.min_token_length,
        )
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn has_stop_words(&self) -> bool {
        self.stop_words.is_some()
    }

    /// Preprocesses a text
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = match &self.cleaner {
            Some(cleaner) => Cow::Owned(cleaner.clean(text)),
            None => Cow::Borrowed(text),
        };
        let text = if self.normalize {
            Cow::Owned(text.nfc().collect::<String>())
        } else {
            text
        };
        let kind = if self.normalize {
            ContainsKind::Normalized
        } else {
            ContainsKind::Raw
        };
        let stemmer = self.stemmer.map(Stemmer::create);

        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|token| token.chars().count() >= self.min_token_length)
            .filter(|token| match &self.stop_words {
                Some(stop_words) => !stop_words.contains(kind, token.as_str()),
                None => true,
            })
            .map(|token| match &self.lemmatizer {
                Some(lemmatizer) => lemmatizer.lemmatize_guessing(&token),
                None => token,
            })
            .map(|token| match &stemmer {
                Some(stemmer) => stemmer.stem(&token).into_owned(),
                None => token,
            })
            .collect()
    }
}
