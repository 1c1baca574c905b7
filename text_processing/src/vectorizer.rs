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

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Deref;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use crate::tf_idf::{Normalization, TfAlgorithm, TfIdf};

/// A non zero entry in a tf-idf-vector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TfIdfVectorEntry<W> {
    pub index: usize,
    pub word: W,
    pub value: f64,
}

impl<W> Eq for TfIdfVectorEntry<W> where W: Eq {}

impl<W> PartialEq for TfIdfVectorEntry<W> where W: PartialEq {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.word.eq(&other.word)
            && float_cmp::approx_eq!(f64, self.value, other.value)
    }
}

/// A sparse tf-idf-vector, the entries are ordered by their index.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[repr(transparent)]
pub struct VectorizedDocument<W>(Vec<TfIdfVectorEntry<W>>);

impl<W> VectorizedDocument<W> {
    /// The `(index, value)` pairs of the non zero features.
    pub fn sparse_features(&self) -> Vec<(usize, f64)> {
        self.iter().map(|entry| (entry.index, entry.value)).collect()
    }

    /// The vector with all [len] features.
    pub fn dense_vector(&self, len: usize) -> Vec<f64> {
        let mut result = vec![0.0; len];
        for entry in self.iter() {
            if let Some(target) = result.get_mut(entry.index) {
                *target = entry.value;
            }
        }
        result
    }

    /// The cosine similarity, 0.0 if one of the vectors has no features.
    pub fn cosine_sim<W2>(&self, other: &VectorizedDocument<W2>) -> f64 {
        let mut dot = 0f64;
        let mut other_iter = other.iter().peekable();
        for entry in self.iter() {
            while other_iter.next_if(|value| value.index < entry.index).is_some() {}
            if let Some(value) = other_iter.next_if(|value| value.index == entry.index) {
                dot += entry.value * value.value;
            }
        }
        let a_len = self.iter().map(|value| value.value.powi(2)).sum::<f64>().sqrt();
        let b_len = other.iter().map(|value| value.value.powi(2)).sum::<f64>().sqrt();
        if a_len == 0.0 || b_len == 0.0 {
            0.0
        } else {
            dot / (a_len * b_len)
        }
    }
}

impl<W> From<Vec<TfIdfVectorEntry<W>>> for VectorizedDocument<W> {
    fn from(mut value: Vec<TfIdfVectorEntry<W>>) -> Self {
        value.sort_unstable_by_key(|entry| entry.index);
        Self(value)
    }
}

impl<W> Deref for VectorizedDocument<W> {
    type Target = [TfIdfVectorEntry<W>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<W> FromIterator<TfIdfVectorEntry<W>> for VectorizedDocument<W> {
    fn from_iter<T: IntoIterator<Item=TfIdfVectorEntry<W>>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Vectorizes a document over a fixed vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "W: Serialize + Hash + Eq, Tf: Serialize, Idf: Serialize",
    deserialize = "W: DeserializeOwned + Hash + Eq, Tf: DeserializeOwned, Idf: DeserializeOwned"
))]
pub struct DocumentVectorizer<W, Tf, Idf> {
    inner: MappedDocumentVectorizer<W>,
    tf_idf: TfIdf<Tf, Idf>,
    normalization: Normalization,
}

impl<W, Tf, Idf> DocumentVectorizer<W, Tf, Idf> {
    pub fn tf_idf(&self) -> &TfIdf<Tf, Idf> {
        &self.tf_idf
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// The number of features of a vectorized document.
    pub fn len(&self) -> usize {
        self.inner.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.words.is_empty()
    }

    /// The words and their idf, ordered by feature index.
    pub fn vocabulary(&self) -> impl Iterator<Item=(&W, f64)> {
        self.inner.words.iter().map(|(word, idf)| (word, *idf))
    }
}

impl<W, Tf, Idf> DocumentVectorizer<W, Tf, Idf> where W: Hash + Eq + Clone {
    /// Creates a vectorizer from the ([word], idf) pairs, the position is the feature index.
    pub fn new(vocabulary: Vec<(W, f64)>, tf_idf: TfIdf<Tf, Idf>, normalization: Normalization) -> Self {
        Self {
            inner: MappedDocumentVectorizer::new(vocabulary),
            tf_idf,
            normalization,
        }
    }

    pub fn index_of(&self, word: &W) -> Option<usize> {
        self.inner.index.get(word).copied()
    }
}

impl<W, Tf, Idf> DocumentVectorizer<W, Tf, Idf> where W: Hash + Eq, Tf: TfAlgorithm {
    /// Vectorizes [doc], words outside of the vocabulary are ignored.
    pub fn vectorize_document<D: IntoIterator<Item=W>>(&self, doc: D) -> VectorizedDocument<&W> {
        self.inner.vectorize_tf_document(self.tf_idf.calculate_tf(doc), self.normalization)
    }
}

/// Contains the idf data of the vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "W: Serialize + Hash + Eq", deserialize = "W: DeserializeOwned + Hash + Eq"))]
struct MappedDocumentVectorizer<W> {
    words: Vec<(W, f64)>,
    index: HashMap<W, usize>,
}

impl<W> MappedDocumentVectorizer<W> where W: Hash + Eq + Clone {
    fn new(mut words: Vec<(W, f64)>) -> Self {
        words.shrink_to_fit();
        let index = words
            .iter()
            .enumerate()
            .map(|(idx, (word, _))| (word.clone(), idx))
            .collect();
        Self { words, index }
    }
}

impl<W> MappedDocumentVectorizer<W> where W: Hash + Eq {
    fn vectorize_tf_document(&self, doc: HashMap<W, f64>, normalization: Normalization) -> VectorizedDocument<&W> {
        let mut result = doc
            .into_iter()
            .filter_map(|(word, tf)| {
                let index = *self.index.get(&word)?;
                let (word, idf) = &self.words[index];
                Some(TfIdfVectorEntry { index, word, value: tf * idf })
            })
            .filter(|entry| entry.value != 0.0)
            .collect::<Vec<_>>();
        if let Some(norm) = normalization.norm(result.iter().map(|entry| entry.value)) {
            for entry in &mut result {
                entry.value /= norm;
            }
        }
        VectorizedDocument::from(result)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use itertools::Itertools;
    use lipsum::lipsum_words_with_rng;
    use rand::SeedableRng;
    use unicode_segmentation::UnicodeSegmentation;
    use crate::corpus::{CorpusStatisticsCollector, VocabularyLimits};
    use crate::tf_idf::{defaults, Idf, Normalization, Tf};
    use super::{DocumentVectorizer, TfIdfVectorEntry, VectorizedDocument};

    fn vectorizer(normalization: Normalization) -> DocumentVectorizer<&'static str, Tf, Idf> {
        let mut statistics = CorpusStatisticsCollector::default();
        statistics.add("it is going to rain today".unicode_words().collect_vec());
        statistics.add("today i am not going outside".unicode_words().collect_vec());
        statistics.add("i am going to watch the season premiere".unicode_words().collect_vec());
        statistics
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, normalization, VocabularyLimits::unlimited())
            .unwrap()
    }

    #[test]
    fn unnormalized_values_are_tf_times_idf() {
        let vectorizer = vectorizer(Normalization::None);
        let vectorized = vectorizer.vectorize_document("rain rain today bro".unicode_words());
        assert_eq!(2, vectorized.len());
        let rain = vectorized.iter().find(|entry| *entry.word == "rain").unwrap();
        assert_approx_eq!(f64, 2.0 * (2f64.ln() + 1.0), rain.value);
        assert_eq!(vectorizer.index_of(&"rain"), Some(rain.index));
        let today = vectorized.iter().find(|entry| *entry.word == "today").unwrap();
        assert_approx_eq!(f64, (4.0f64 / 3.0).ln() + 1.0, today.value);
    }

    #[test]
    fn entries_are_ordered_and_l2_normalized() {
        let vectorizer = vectorizer(Normalization::L2);
        let vectorized = vectorizer.vectorize_document("watch the premiere today".unicode_words());
        assert!(vectorized.iter().tuple_windows().all(|(a, b)| a.index < b.index));
        let length = vectorized.iter().map(|entry| entry.value.powi(2)).sum::<f64>();
        assert_approx_eq!(f64, 1.0, length, epsilon = 1e-12);
    }

    #[test]
    fn unknown_words_give_an_empty_vector() {
        let vectorizer = vectorizer(Normalization::L2);
        let vectorized = vectorizer.vectorize_document("completely unseen words".unicode_words());
        assert!(vectorized.is_empty());
        assert_eq!(vec![0.0; vectorizer.len()], vectorized.dense_vector(vectorizer.len()));
    }

    #[test]
    fn dense_and_sparse_agree() {
        let vectorizer = vectorizer(Normalization::L2);
        let vectorized = vectorizer.vectorize_document("going to rain".unicode_words());
        let dense = vectorized.dense_vector(vectorizer.len());
        for (index, value) in vectorized.sparse_features() {
            assert_approx_eq!(f64, value, dense[index]);
        }
        assert_eq!(vectorized.len(), dense.iter().filter(|value| **value != 0.0).count());
    }

    #[test]
    fn cosine_similarity() {
        let a: VectorizedDocument<&str> = vec![
            TfIdfVectorEntry { index: 0, word: "a", value: 1.0 },
            TfIdfVectorEntry { index: 2, word: "c", value: 1.0 },
        ].into();
        let b: VectorizedDocument<&str> = vec![
            TfIdfVectorEntry { index: 2, word: "c", value: 2.0 },
        ].into();
        assert_approx_eq!(f64, 1.0 / 2f64.sqrt(), a.cosine_sim(&b));
        assert_approx_eq!(f64, 1.0, a.cosine_sim(&a));
        let empty: VectorizedDocument<&str> = Vec::new().into();
        assert_approx_eq!(f64, 0.0, a.cosine_sim(&empty));
    }

    #[test]
    fn same_text_is_most_similar() {
        let mut statistics = CorpusStatisticsCollector::default();
        let mut random = rand::rngs::StdRng::seed_from_u64(123456);
        let docs = (0..20)
            .map(|_| {
                random = rand::rngs::StdRng::from_rng(random.clone()).unwrap();
                lipsum_words_with_rng(random.clone(), 30).to_lowercase()
            })
            .collect_vec();
        for doc in &docs {
            statistics.add(doc.unicode_words().map(str::to_string));
        }
        let vectorizer = statistics
            .provide_vectorizer(defaults::RAW_INVERSE_SMOOTH, Normalization::L2, VocabularyLimits::default())
            .unwrap();
        let first = vectorizer.vectorize_document(docs[0].unicode_words().map(str::to_string));
        let same = first.cosine_sim(&first);
        for doc in &docs[1..] {
            let other = vectorizer.vectorize_document(doc.unicode_words().map(str::to_string));
            assert!(first.cosine_sim(&other) <= same + 1e-9);
        }
    }
}
