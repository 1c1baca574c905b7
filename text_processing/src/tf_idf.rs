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
use std::error::Error;
use std::hash::Hash;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::corpus::CorpusDocumentStatistics;

pub mod defaults {
    use crate::tf_idf::{Idf, Tf, TfIdf};
    pub const RAW_INVERSE: TfIdf<Tf, Idf> = TfIdf::new(Tf::RawCount, Idf::InverseDocumentFrequency);
    pub const TERM_FREQUENCY_INVERSE: TfIdf<Tf, Idf> = TfIdf::new(Tf::TermFrequency, Idf::InverseDocumentFrequency);
    pub const RAW_INVERSE_SMOOTH: TfIdf<Tf, Idf> = TfIdf::new(Tf::RawCount, Idf::InverseDocumentFrequencySmooth);
    pub const TERM_FREQUENCY_INVERSE_SMOOTH: TfIdf<Tf, Idf> = TfIdf::new(Tf::TermFrequency, Idf::InverseDocumentFrequencySmooth);
    pub const BINARY_UNARY: TfIdf<Tf, Idf> = TfIdf::new(Tf::Binary, Idf::Unary);
}

/// A combination of Tf and Idf
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Tf: Serialize, Idf: Serialize",
    deserialize = "Tf: DeserializeOwned, Idf: DeserializeOwned"
))]
pub struct TfIdf<Tf, Idf> {
    pub tf: Tf,
    pub idf: Idf,
}

impl<Tf, Idf> TfIdf<Tf, Idf> where Tf: TfAlgorithm {
    delegate::delegate! {
        to self.tf {
            pub fn calculate_tf<W, D: IntoIterator<Item=W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq;
        }
    }
}

impl<Tf, Idf> TfIdf<Tf, Idf> where Idf: IdfAlgorithm {
    delegate::delegate! {
        to self.idf {
            pub fn calculate_idf<W, S: CorpusDocumentStatistics<Word=W>>(&self, statistics: &S, word: &W) -> Result<Option<f64>, Idf::Error>;
            pub fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, Idf::Error>;
        }
    }
}

impl<Tf, Idf> TfIdf<Tf, Idf> {
    pub const fn new(tf: Tf, idf: Idf) -> Self {
        Self { tf, idf }
    }
}

impl Default for TfIdf<Tf, Idf> {
    fn default() -> Self {
        defaults::RAW_INVERSE_SMOOTH
    }
}

impl<Tf, Idf> Copy for TfIdf<Tf, Idf> where Tf: Copy, Idf: Copy {}

/// Trait for IDF Algorithms
pub trait IdfAlgorithm {
    type Error: Error + 'static;

    /// Calculates the IDF value for a single word based on the provided statistics.
    /// Returns none if the word is not part of the corpus.
    #[inline]
    fn calculate_idf<W, S: CorpusDocumentStatistics<Word=W>>(&self, statistics: &S, word: &W) -> Result<Option<f64>, Self::Error> {
        statistics
            .document_frequency(word)
            .map(|value| self.calculate_idf_with_document_frequency(statistics, value))
            .transpose()
    }

    /// Calculates the IDF value of a word appearing in [document_frequency] documents of the corpus.
    fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, Self::Error>;
}

/// Default IDF Algorithms, all of them use the natural logarithm.
/// From https://en.wikipedia.org/wiki/Tf%E2%80%93idf
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub enum Idf {
    Unary,
    /// `ln(n / df)`
    InverseDocumentFrequency,
    /// `ln((1 + n) / (1 + df)) + 1`
    #[default]
    InverseDocumentFrequencySmooth,
    /// `ln(max_df / (1 + df))`
    InverseDocumentFrequencyMax,
    /// `ln((n - df) / df)`
    ProbabilisticInverseDocumentFrequency,
}

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum IdfError {
    #[error("The CorpusDocumentStatistics is seen as empty but this should not be possible.")]
    StatisticsEmptyError,
    #[error("A document frequency of 0 has no idf.")]
    ZeroDocumentFrequency,
}

impl IdfAlgorithm for Idf {
    type Error = IdfError;

    #[inline]
    fn calculate_idf<W, S: CorpusDocumentStatistics<Word=W>>(&self, statistics: &S, word: &W) -> Result<Option<f64>, IdfError> {
        match self {
            Idf::Unary => Ok(Some(1.0)),
            other => statistics
                .document_frequency(word)
                .map(|value| other.calculate_idf_with_document_frequency(statistics, value))
                .transpose(),
        }
    }

    fn calculate_idf_with_document_frequency<S: CorpusDocumentStatistics>(&self, statistics: &S, document_frequency: u64) -> Result<f64, IdfError> {
        if matches!(self, Idf::Unary) {
            return Ok(1.0);
        }
        let document_count = statistics.document_count();
        if document_count == 0 {
            return Err(IdfError::StatisticsEmptyError);
        }
        let n = document_count as f64;
        let df = document_frequency as f64;
        match self {
            Idf::Unary => Ok(1.0),
            Idf::InverseDocumentFrequency => {
                if document_frequency == 0 {
                    return Err(IdfError::ZeroDocumentFrequency);
                }
                Ok((n / df).ln())
            }
            Idf::InverseDocumentFrequencySmooth => Ok(((1.0 + n) / (1.0 + df)).ln() + 1.0),
            Idf::InverseDocumentFrequencyMax => {
                let max_value = statistics
                    .iter()
                    .map(|(_, value)| *value)
                    .max()
                    .ok_or(IdfError::StatisticsEmptyError)?;
                Ok((max_value as f64 / (df + 1.0)).ln())
            }
            Idf::ProbabilisticInverseDocumentFrequency => {
                if document_frequency == 0 {
                    return Err(IdfError::ZeroDocumentFrequency);
                }
                // A word in every document carries no information.
                Ok(((n - df) / df).ln().max(0.0))
            }
        }
    }
}

/// Trait for TF Algorithm
pub trait TfAlgorithm {
    /// Calculates the TF value of every distinct word in [doc].
    fn calculate_tf<W, D: IntoIterator<Item=W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq;
}

/// Default TF Algorithms
/// From https://en.wikipedia.org/wiki/Tf%E2%80%93idf
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub enum Tf {
    Binary,
    #[default]
    RawCount,
    TermFrequency,
    LogNormalization,
    DoubleNormalization,
}

impl Tf {
    fn raw_count<W, D: IntoIterator<Item=W>>(doc: D) -> HashMap<W, f64> where W: Hash + Eq {
        let mut result = HashMap::new();
        for word in doc {
            *result.entry(word).or_insert(0.0) += 1.0;
        }
        result
    }
}

impl TfAlgorithm for Tf {
    fn calculate_tf<W, D: IntoIterator<Item=W>>(&self, doc: D) -> HashMap<W, f64> where W: Hash + Eq {
        match self {
            Tf::Binary => doc.into_iter().map(|word| (word, 1.0)).collect(),
            Tf::RawCount => Self::raw_count(doc),
            Tf::TermFrequency => {
                let mut result = Self::raw_count(doc);
                let divider = result.values().sum::<f64>();
                for value in result.values_mut() {
                    *value /= divider;
                }
                result
            }
            Tf::LogNormalization => {
                let mut result = Self::raw_count(doc);
                for value in result.values_mut() {
                    *value = value.ln_1p();
                }
                result
            }
            Tf::DoubleNormalization => {
                let mut result = Self::raw_count(doc);
                let max_value = result.values().copied().fold(0.0, f64::max);
                if max_value > 0.0 {
                    for value in result.values_mut() {
                        *value = 0.5 + 0.5 * (*value / max_value);
                    }
                }
                result
            }
        }
    }
}

/// The normalization of a vectorized document.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub enum Normalization {
    None,
    /// Divides by the sum of the absolute values.
    L1,
    /// Divides by the euclidean length.
    #[default]
    L2,
}

impl Normalization {
    /// The norm of [values], none if no normalization is applied or the norm is zero.
    pub fn norm<I: IntoIterator<Item=f64>>(&self, values: I) -> Option<f64> {
        let norm = match self {
            Normalization::None => return None,
            Normalization::L1 => values.into_iter().map(f64::abs).sum::<f64>(),
            Normalization::L2 => values.into_iter().map(|value| value * value).sum::<f64>().sqrt(),
        };
        (norm > 0.0).then_some(norm)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use itertools::Itertools;
    use unicode_segmentation::UnicodeSegmentation;
    use crate::corpus::CorpusStatisticsCollector;
    use super::{defaults, Idf, IdfAlgorithm, IdfError, Normalization, Tf, TfAlgorithm};

    fn statistics() -> CorpusStatisticsCollector<&'static str> {
        let mut statistics = CorpusStatisticsCollector::default();
        statistics.add("it is going to rain today".unicode_words().collect_vec());
        statistics.add("today i am not going outside".unicode_words().collect_vec());
        statistics.add("i am going to watch the season premiere".unicode_words().collect_vec());
        statistics
    }

    #[test]
    fn term_frequencies() {
        let doc = "bad bad bad good".unicode_words().collect_vec();
        let raw = Tf::RawCount.calculate_tf(doc.clone());
        assert_approx_eq!(f64, 3.0, raw["bad"]);
        let tf = Tf::TermFrequency.calculate_tf(doc.clone());
        assert_approx_eq!(f64, 0.75, tf["bad"]);
        assert_approx_eq!(f64, 0.25, tf["good"]);
        let binary = Tf::Binary.calculate_tf(doc.clone());
        assert_approx_eq!(f64, 1.0, binary["bad"]);
        let double = Tf::DoubleNormalization.calculate_tf(doc.clone());
        assert_approx_eq!(f64, 1.0, double["bad"]);
        assert_approx_eq!(f64, 0.5 + 0.5 / 3.0, double["good"]);
        let log = Tf::LogNormalization.calculate_tf(doc);
        assert_approx_eq!(f64, 4f64.ln(), log["bad"]);
    }

    #[test]
    fn smooth_idf_matches_the_common_definition() {
        let statistics = statistics();
        let going = Idf::InverseDocumentFrequencySmooth.calculate_idf(&statistics, &"going").unwrap().unwrap();
        assert_approx_eq!(f64, 1.0, going);
        let today = Idf::InverseDocumentFrequencySmooth.calculate_idf(&statistics, &"today").unwrap().unwrap();
        assert_approx_eq!(f64, (4.0f64 / 3.0).ln() + 1.0, today);
        let rain = Idf::InverseDocumentFrequencySmooth.calculate_idf(&statistics, &"rain").unwrap().unwrap();
        assert_approx_eq!(f64, 2f64.ln() + 1.0, rain);
    }

    #[test]
    fn plain_idf() {
        let statistics = statistics();
        let going = Idf::InverseDocumentFrequency.calculate_idf(&statistics, &"going").unwrap().unwrap();
        assert_approx_eq!(f64, 0.0, going);
        let rain = Idf::InverseDocumentFrequency.calculate_idf(&statistics, &"rain").unwrap().unwrap();
        assert_approx_eq!(f64, 3f64.ln(), rain);
        assert_eq!(None, Idf::InverseDocumentFrequency.calculate_idf(&statistics, &"unknown").unwrap());
        assert_eq!(Some(1.0), Idf::Unary.calculate_idf(&statistics, &"unknown").unwrap());
    }

    #[test]
    fn combination_uses_both_algorithms() {
        let statistics = statistics();
        let tf_idf = defaults::TERM_FREQUENCY_INVERSE_SMOOTH;
        let tf = tf_idf.calculate_tf("bad bad bad good".unicode_words());
        assert_approx_eq!(f64, 0.75, tf["bad"]);
        let rain = tf_idf.calculate_idf(&statistics, &"rain").unwrap().unwrap();
        assert_approx_eq!(f64, 2f64.ln() + 1.0, rain);
        assert_approx_eq!(
            f64,
            rain,
            tf_idf.calculate_idf_with_document_frequency(&statistics, 1).unwrap()
        );
    }

    #[test]
    fn empty_statistics_fail() {
        let statistics = CorpusStatisticsCollector::<&str>::default();
        assert_eq!(
            Err(IdfError::StatisticsEmptyError),
            Idf::InverseDocumentFrequencySmooth.calculate_idf_with_document_frequency(&statistics, 1)
        );
    }

    #[test]
    fn norms() {
        assert_eq!(None, Normalization::None.norm([3.0, 4.0]));
        assert_eq!(Some(5.0), Normalization::L2.norm([3.0, 4.0]));
        assert_eq!(Some(7.0), Normalization::L1.norm([3.0, -4.0]));
        assert_eq!(None, Normalization::L2.norm([0.0, 0.0]));
    }
}
