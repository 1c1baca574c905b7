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

use std::ops::Deref;
use isolang::Language;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};
use crate::cleaning::TextCleaner;
use crate::stopword_registry::StopWordRepository;

/// The config for a stopword registry
#[derive(Debug, Clone, Serialize, Deserialize, Eq)]
#[serde(transparent)]
pub struct StopwordRegistryConfig {
    pub registries: Vec<StopWordRepository>,
}

impl Default for StopwordRegistryConfig {
    fn default() -> Self {
        Self {
            registries: vec![StopWordRepository::BuiltIn],
        }
    }
}

impl PartialEq for StopwordRegistryConfig {
    fn eq(&self, other: &Self) -> bool {
        self.registries.len() == other.registries.len()
            && self.registries.iter().all(|value| other.registries.contains(value))
    }
}

impl Deref for StopwordRegistryConfig {
    type Target = [StopWordRepository];

    fn deref(&self) -> &Self::Target {
        &self.registries
    }
}

/// The config of the [crate::tokenizer::Tokenizer].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub language: Language,
    /// The cleaning applied before tokenizing, none if not set.
    pub cleaner: Option<TextCleaner>,
    /// If set to true the text is NFC normalized
    pub normalize_text: bool,
    /// Removes the stop words of [language]
    pub filter_stopwords: bool,
    /// Reduces every token to its lemma
    pub lemmatize: bool,
    pub stemmer: Option<Algorithm>,
    /// Tokens with less chars are dropped.
    pub min_token_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            language: Language::Eng,
            cleaner: Some(TextCleaner::default()),
            normalize_text: true,
            filter_stopwords: true,
            lemmatize: true,
            stemmer: None,
            min_token_length: 2,
        }
    }
}
