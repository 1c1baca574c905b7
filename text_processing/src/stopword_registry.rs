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

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use camino::Utf8PathBuf;
use compact_str::{CompactString, ToCompactString};
use isolang::Language;
use iso_stopwords::iso_stopwords_for;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::configs::StopwordRegistryConfig;

/// A registry for stopwords.
/// Every registered repository contributes to the list of a language,
/// the lists are merged and cached per language.
#[derive(Debug, Default, Clone)]
pub struct StopWordRegistry {
    cached_stop_words: Arc<RwLock<HashMap<Language, Arc<StopWordList>>>>,
    repositories: Arc<RwLock<Vec<StopWordRepository>>>,
}

impl StopWordRegistry {
    pub fn initialize(cfg: &StopwordRegistryConfig) -> Self {
        let new = Self::default();
        new.repositories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(cfg.iter().cloned());
        new
    }

    pub fn register(&mut self, repository: StopWordRepository) {
        self.repositories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(repository);
        // A new repository can change every cached list.
        self.cached_stop_words
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn load_stop_words(&self, language: &Language) -> Option<Vec<String>> {
        let read = self.repositories.read().unwrap_or_else(PoisonError::into_inner);
        let mut collection = Vec::new();
        for repo in read.iter() {
            if let Some(found) = repo.load_raw_stop_words(language) {
                collection.extend(found)
            }
        }
        (!collection.is_empty()).then_some(collection)
    }

    pub fn get_or_load(&self, language: &Language) -> Option<Arc<StopWordList>> {
        let lock = self.cached_stop_words.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(found) = lock.get(language).cloned() {
            return Some(found);
        }
        drop(lock);
        let mut lock = self.cached_stop_words.write().unwrap_or_else(PoisonError::into_inner);
        match lock.entry(*language) {
            Entry::Occupied(value) => Some(value.get().clone()),
            Entry::Vacant(value) => {
                let raw = self
                    .load_stop_words(language)?
                    .into_iter()
                    .map(|word| CompactString::from(word.trim().to_lowercase()))
                    .filter(|word| !word.is_empty())
                    .collect();
                let list = Arc::new(StopWordList::from_raw(raw));
                log::debug!("Loaded {} stop words for {}.", list.len(), language.to_name());
                Some(value.insert(list).clone())
            }
        }
    }
}

/// A set of stop words in raw and NFC normalized form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StopWordList {
    raw: HashSet<CompactString>,
    normalized: HashSet<CompactString>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContainsKind {
    Raw,
    Normalized,
    Both,
}

impl StopWordList {
    pub fn new(mut raw: HashSet<CompactString>, mut normalized: HashSet<CompactString>) -> Self {
        raw.shrink_to_fit();
        normalized.shrink_to_fit();
        Self { raw, normalized }
    }

    pub fn from_raw(raw: HashSet<CompactString>) -> Self {
        let normalized = raw
            .iter()
            .map(|value| value.nfc().collect::<CompactString>())
            .collect::<HashSet<_>>();
        Self::new(raw, normalized)
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn extend_with(&mut self, other: Self) {
        self.raw.extend(other.raw);
        self.normalized.extend(other.normalized);
        self.raw.shrink_to_fit();
        self.normalized.shrink_to_fit();
    }

    #[inline]
    pub fn contains<Q: ?Sized>(&self, kind: ContainsKind, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        match kind {
            ContainsKind::Raw => self.contains_raw(value),
            ContainsKind::Normalized => self.contains_normalized(value),
            ContainsKind::Both => self.contains_both(value),
        }
    }

    #[inline]
    pub fn contains_both<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.contains_raw(value) || self.contains_normalized(value)
    }

    #[inline]
    pub fn contains_raw<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.raw.contains(value)
    }

    #[inline]
    pub fn contains_normalized<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.normalized.contains(value)
    }
}

impl<Q> Extend<Q> for StopWordList
where
    Q: ToCompactString,
{
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        for value in iter.into_iter() {
            let word = value.to_compact_string();
            let normalized = word.nfc().to_compact_string();
            self.raw.insert(word);
            self.normalized.insert(normalized);
        }
        self.raw.shrink_to_fit();
        self.normalized.shrink_to_fit();
    }
}

/// Where the stop words of a language come from.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(try_from = "StopWordRepositoryDef", into = "StopWordRepositoryDef")]
pub enum StopWordRepository {
    /// The lists compiled into [iso_stopwords].
    BuiltIn,
    /// A directory with `<iso 639-3>.txt` or `<iso 639-1>.txt` files.
    DirRepo { with_builtin: bool, dir: Utf8PathBuf },
    /// A single file for a single language.
    File { with_builtin: bool, language: Language, file: Utf8PathBuf },
}

#[derive(Debug, Error)]
#[error("The definition {0:?} does not describe a stop word repository.")]
#[repr(transparent)]
pub struct StopWordRepositoryConversionError(StopWordRepositoryDef);

impl TryFrom<StopWordRepositoryDef> for StopWordRepository {
    type Error = StopWordRepositoryConversionError;

    fn try_from(value: StopWordRepositoryDef) -> Result<Self, Self::Error> {
        match value {
            StopWordRepositoryDef { with_builtin, dir: Some(dir), file: None, language: None } => {
                Ok(Self::DirRepo { with_builtin, dir })
            }
            StopWordRepositoryDef { with_builtin, dir: None, file: Some(file), language: Some(language) } => {
                Ok(Self::File { with_builtin, file, language })
            }
            StopWordRepositoryDef { with_builtin: true, dir: None, file: None, language: None } => {
                Ok(Self::BuiltIn)
            }
            err => Err(StopWordRepositoryConversionError(err)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
struct StopWordRepositoryDef {
    #[serde(skip_serializing_if = "std::ops::Not::not", rename = "builtin")]
    with_builtin: bool,
    #[serde(skip_serializing_if = "Option::is_none", alias = "directory")]
    dir: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<Language>,
}

impl From<StopWordRepository> for StopWordRepositoryDef {
    fn from(value: StopWordRepository) -> Self {
        match value {
            StopWordRepository::BuiltIn => StopWordRepositoryDef {
                with_builtin: true,
                ..Default::default()
            },
            StopWordRepository::DirRepo { dir, with_builtin } => StopWordRepositoryDef {
                dir: Some(dir),
                with_builtin,
                ..Default::default()
            },
            StopWordRepository::File { file, language, with_builtin } => StopWordRepositoryDef {
                file: Some(file),
                language: Some(language),
                with_builtin,
                ..Default::default()
            },
        }
    }
}

/// Provides stop word lists for a specific language
pub trait StopWordListRepository {
    fn load_raw_stop_words(&self, language: &Language) -> Option<Vec<String>>;
}

impl StopWordListRepository for StopWordRepository {
    fn load_raw_stop_words(&self, language: &Language) -> Option<Vec<String>> {
        fn load_builtin(language: &Language) -> Option<Vec<String>> {
            Some(iso_stopwords_for(language)?.iter().map(|value| value.to_string()).collect())
        }

        fn read_lines(file: &Path) -> std::io::Result<Vec<String>> {
            BufReader::new(File::open(file)?).lines().collect()
        }

        fn load_file(file: impl AsRef<Path>, with_builtin: bool, language: &Language) -> Option<Vec<String>> {
            let file = file.as_ref();
            let mut result = match read_lines(file) {
                Ok(result) => result,
                Err(err) => {
                    log::warn!(
                        "Failed to read the stop words from {}: {err}. Falling back to the built-in list only if selected.",
                        file.display()
                    );
                    return fallback(with_builtin, language);
                }
            };
            if with_builtin {
                if let Some(default) = load_builtin(language) {
                    result.extend(default)
                }
            }
            Some(result)
        }

        fn fallback(with_builtin: bool, language: &Language) -> Option<Vec<String>> {
            if with_builtin {
                load_builtin(language)
            } else {
                None
            }
        }

        match self {
            StopWordRepository::BuiltIn => load_builtin(language),
            StopWordRepository::DirRepo { dir, with_builtin } => {
                if !dir.is_dir() {
                    log::warn!("The directory {dir} does not exist! Falling back to the built-in list only if selected.");
                    return fallback(*with_builtin, language);
                }
                let file = dir.join(format!("{}.txt", language.to_639_3()));
                if file.exists() {
                    load_file(file, *with_builtin, language)
                } else if let Some(file) = language
                    .to_639_1()
                    .map(|value| dir.join(format!("{}.txt", value)))
                    .filter(|p| p.exists())
                {
                    load_file(file, *with_builtin, language)
                } else {
                    log::warn!("The file {file} does not exist! Falling back to the built-in list only if selected.");
                    fallback(*with_builtin, language)
                }
            }
            StopWordRepository::File { file, language: file_lang, with_builtin } => {
                if language != file_lang {
                    None
                } else if file.exists() {
                    load_file(file, *with_builtin, language)
                } else {
                    log::warn!("The file {file} does not exist! Falling back to the built-in list only if selected.");
                    fallback(*with_builtin, language)
                }
            }
        }
    }
}
