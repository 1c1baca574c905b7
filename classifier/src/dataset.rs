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

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::str::FromStr;
use camino::Utf8Path;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::classifier::TrainDataEntry;
use crate::csv2::CsvProvider;
use crate::error::DatasetError;

/// The sentiment of a review.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub const fn as_label(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Positive => "positive",
        }
    }

    /// Positive for true.
    pub const fn from_label(is_positive: bool) -> Self {
        if is_positive {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub const fn is_positive(&self) -> bool {
        matches!(self, Sentiment::Positive)
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

#[derive(Debug, Error)]
#[error("{0:?} is not a sentiment, expected positive or negative.")]
pub struct SentimentParseError(String);

impl FromStr for Sentiment {
    type Err = SentimentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("positive") || value == "1" {
            Ok(Sentiment::Positive)
        } else if value.eq_ignore_ascii_case("negative") || value == "0" {
            Ok(Sentiment::Negative)
        } else {
            Err(SentimentParseError(s.to_string()))
        }
    }
}

impl TryFrom<String> for Sentiment {
    type Error = SentimentParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.as_label().to_string()
    }
}

/// A row of the review csv
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    #[serde(alias = "text")]
    pub review: String,
    #[serde(alias = "label")]
    pub sentiment: Sentiment,
}

impl ReviewEntry {
    pub fn new(review: impl Into<String>, sentiment: Sentiment) -> Self {
        Self { review: review.into(), sentiment }
    }
}

impl TrainDataEntry for ReviewEntry {
    fn get_label(&self) -> Sentiment {
        self.sentiment
    }

    fn get_text(&self) -> &str {
        &self.review
    }
}

/// Reads all reviews from the csv at [path], broken rows are skipped.
pub fn read_reviews(path: impl AsRef<Utf8Path>) -> Result<Vec<ReviewEntry>, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::IO(std::io::Error::new(
            ErrorKind::NotFound,
            format!("The file {path} was not found!"),
        )));
    }
    let mut reader = csv::ReaderBuilder::new();
    reader.has_headers(true).flexible(true);
    let mut provider: CsvProvider<ReviewEntry, _> =
        CsvProvider::new(reader.from_reader(BufReader::new(File::open(path)?)))?;
    let entries: Vec<ReviewEntry> = provider.by_ref().collect();
    if provider.skipped() > 0 {
        log::warn!("Skipped {} broken rows in {path}.", provider.skipped());
    }
    if entries.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }
    log::info!("Read {} reviews from {path}.", entries.len());
    Ok(entries)
}

/// The two parts of a shuffled dataset.
#[derive(Debug, Clone)]
pub struct Split<T> {
    pub train: Vec<T>,
    pub test: Vec<T>,
}

/// Shuffles [entries] with [seed] and moves `round(n * test_fraction)` of them to the test set.
pub fn train_test_split<T>(mut entries: Vec<T>, test_fraction: f64, seed: u64) -> Result<Split<T>, DatasetError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DatasetError::InvalidTestFraction(test_fraction));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    entries.shuffle(&mut rng);
    let n_test = (entries.len() as f64 * test_fraction).round() as usize;
    let test = entries.split_off(entries.len() - n_test);
    Ok(Split { train: entries, test })
}
