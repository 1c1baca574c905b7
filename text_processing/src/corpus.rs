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

use std::cmp::Reverse;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::tf_idf::{IdfAlgorithm, Normalization, TfIdf};
use crate::vectorizer::DocumentVectorizer;

/// The statistics over the documents in a corpus
pub trait CorpusDocumentStatistics {
    /// A word in a corpus
    type Word;
    /// The number of documents in the corpus
    fn document_count(&self) -> u64;
    /// The number of words in the corpus
    fn word_count(&self) -> u64;
    /// The number of unique words in the corpus
    fn unique_word_count(&self) -> usize;
    /// The number of documents containing [word]
    fn document_frequency(&self, word: &Self::Word) -> Option<u64>;

    /// Returns an iterator over the words and their document frequencies
    fn iter(&self) -> impl Iterator<Item=(&Self::Word, &u64)>;
}

/// Restricts the words of a corpus that end up in the vocabulary.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VocabularyLimits {
    /// Only the most frequent words are kept, all if none.
    pub max_features: Option<usize>,
    /// A word has to appear in at least this many documents.
    pub min_df: u64,
    /// A word may appear in at most this fraction of the documents.
    pub max_df: f64,
}

impl Default for VocabularyLimits {
    fn default() -> Self {
        Self {
            max_features: Some(5000),
            min_df: 1,
            max_df: 1.0,
        }
    }
}

impl VocabularyLimits {
    pub const fn unlimited() -> Self {
        Self {
            max_features: None,
            min_df: 1,
            max_df: 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum VocabularyError<E: Error + 'static> {
    #[error("No word of the corpus satisfies {0:?}.")]
    Empty(VocabularyLimits),
    #[error("max_df has to be in (0, 1] but was {0}.")]
    InvalidMaxDf(f64),
    #[error(transparent)]
    Idf(#[from] E),
}

/// Collects the frequencies in a corpus
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(bound(serialize = "W: Serialize + Hash + Eq", deserialize = "W: DeserializeOwned + Hash + Eq"))]
pub struct CorpusStatisticsCollector<W> {
    document_count: u64,
    word_count: u64,
    document_frequencies: HashMap<W, u64>,
    word_frequencies: HashMap<W, u64>,
}

impl<W> Default for CorpusStatisticsCollector<W> {
    fn default() -> Self {
        Self {
            document_count: 0,
            word_count: 0,
            document_frequencies: HashMap::new(),
            word_frequencies: HashMap::new(),
        }
    }
}

impl<W> CorpusStatisticsCollector<W> where W: Hash + Eq + Clone {
    /// Adds a document, every word counts once for its document frequency.
    pub fn add<D: IntoIterator<Item=W>>(&mut self, doc: D) {
        self.document_count = self.document_count.saturating_add(1);
        let mut counts: HashMap<W, u64> = HashMap::new();
        for word in doc {
            *counts.entry(word).or_insert(0) += 1;
        }
        for (word, count) in counts {
            self.word_count = self.word_count.saturating_add(count);
            *self.document_frequencies.entry(word.clone()).or_insert(0) += 1;
            *self.word_frequencies.entry(word).or_insert(0) += count;
        }
    }

    /// The total number of occurrences of [word].
    pub fn word_frequency(&self, word: &W) -> Option<u64> {
        self.word_frequencies.get(word).copied()
    }
}

impl<W> CorpusStatisticsCollector<W> where W: Hash + Eq + Clone + Ord {
    /// Selects the vocabulary according to [limits] and calculates the idf of every word in it.
    /// The feature indices follow the lexical order of the words.
    pub fn provide_vectorizer<Tf, Idf: IdfAlgorithm>(
        &self,
        tf_idf: TfIdf<Tf, Idf>,
        normalization: Normalization,
        limits: VocabularyLimits,
    ) -> Result<DocumentVectorizer<W, Tf, Idf>, VocabularyError<Idf::Error>> {
        if !(limits.max_df > 0.0 && limits.max_df <= 1.0) {
            return Err(VocabularyError::InvalidMaxDf(limits.max_df));
        }
        let max_document_count = limits.max_df * self.document_count as f64;
        let candidates = self
            .document_frequencies
            .iter()
            .filter(|(_, df)| **df >= limits.min_df && **df as f64 <= max_document_count)
            .map(|(word, _)| word);

        let mut selected = match limits.max_features {
            Some(max_features) => candidates
                .sorted_by_key(|word| (Reverse(self.word_frequencies.get(*word).copied().unwrap_or_default()), *word))
                .take(max_features)
                .collect_vec(),
            None => candidates.collect_vec(),
        };
        if selected.is_empty() {
            return Err(VocabularyError::Empty(limits));
        }
        selected.sort_unstable();

        let vocabulary = selected
            .into_iter()
            .map(|word| {
                let document_frequency = self.document_frequencies[word];
                tf_idf
                    .calculate_idf_with_document_frequency(self, document_frequency)
                    .map(|idf| (word.clone(), idf))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Selected {} of {} words from {} documents.",
            vocabulary.len(),
            self.unique_word_count(),
            self.document_count
        );
        Ok(DocumentVectorizer::new(vocabulary, tf_idf, normalization))
    }
}

impl<W> Display for CorpusStatisticsCollector<W> where W: Hash + Eq + Display + Ord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Document Count: {}", self.document_count)?;
        writeln!(f, "Word Count: {}", self.word_count)?;
        writeln!(f, "Unique Word Count: {}", self.unique_word_count())?;
        write!(f, "Words:")?;
        for (word, count) in self.document_frequencies.iter().sorted_by_key(|(word, _)| *word) {
            write!(f, "\n  {word}: {count}")?;
        }
        Ok(())
    }
}

impl<W> CorpusDocumentStatistics for CorpusStatisticsCollector<W> where W: Hash + Eq {
    type Word = W;

    #[inline]
    fn document_count(&self) -> u64 {
        self.document_count
    }

    #[inline]
    fn word_count(&self) -> u64 {
        self.word_count
    }

    #[inline]
    fn unique_word_count(&self) -> usize {
        self.document_frequencies.len()
    }

    fn document_frequency(&self, word: &W) -> Option<u64> {
        self.document_frequencies.get(word).copied()
    }

    fn iter(&self) -> impl Iterator<Item=(&Self::Word, &u64)> {
        self.document_frequencies.iter()
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use crate::tf_idf::{defaults, IdfError, Normalization};
    use super::{CorpusDocumentStatistics, CorpusStatisticsCollector, VocabularyError, VocabularyLimits};

    fn statistics() -> CorpusStatisticsCollector<&'static str> {
        let mut statistics = CorpusStatisticsCollector::default();
        statistics.add("great great movie".split(' '));
        statistics.add("boring movie".split(' '));
        statistics.add("great plot twist".split(' '));
        statistics
    }

    #[test]
    fn document_frequency_counts_a_document_once() {
        let statistics = statistics();
        assert_eq!(3, statistics.document_count());
        assert_eq!(8, statistics.word_count());
        assert_eq!(5, statistics.unique_word_count());
        assert_eq!(Some(2), statistics.document_frequency(&"great"));
        assert_eq!(Some(3), statistics.word_frequency(&"great"));
        assert_eq!(None, statistics.document_frequency(&"awful"));
    }

    #[test]
    fn vocabulary_is_lexically_indexed() {
        let vectorizer = statistics()
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, VocabularyLimits::unlimited())
            .unwrap();
        let words = vectorizer.vocabulary().map(|(word, _)| *word).collect_vec();
        assert_eq!(vec!["boring", "great", "movie", "plot", "twist"], words);
        assert_eq!(Some(1), vectorizer.index_of(&"great"));
    }

    #[test]
    fn max_features_keeps_the_most_frequent() {
        let limits = VocabularyLimits { max_features: Some(2), ..VocabularyLimits::unlimited() };
        let vectorizer = statistics()
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, limits)
            .unwrap();
        // great (3) and movie (2), the ties on 1 are dropped.
        let words = vectorizer.vocabulary().map(|(word, _)| *word).collect_vec();
        assert_eq!(vec!["great", "movie"], words);
    }

    #[test]
    fn document_frequency_limits() {
        let limits = VocabularyLimits { max_features: None, min_df: 2, max_df: 1.0 };
        let vectorizer = statistics()
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, limits)
            .unwrap();
        assert_eq!(2, vectorizer.len());

        let limits = VocabularyLimits { max_features: None, min_df: 1, max_df: 0.5 };
        let vectorizer = statistics()
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, limits)
            .unwrap();
        assert_eq!(None, vectorizer.index_of(&"great"));
        assert_eq!(3, vectorizer.len());
    }

    #[test]
    fn empty_vocabulary_fails() {
        let limits = VocabularyLimits { max_features: None, min_df: 10, max_df: 1.0 };
        let result = statistics().provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, limits);
        assert!(matches!(result, Err(VocabularyError::<IdfError>::Empty(_))));

        let limits = VocabularyLimits { max_df: 0.0, ..VocabularyLimits::default() };
        let result = statistics().provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, limits);
        assert!(matches!(result, Err(VocabularyError::<IdfError>::InvalidMaxDf(_))));
    }
}
