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

use camino::Utf8PathBuf;
use thiserror::Error;
use text_processing::corpus::VocabularyError;
use text_processing::tf_idf::IdfAlgorithm;
use crate::dataset::Sentiment;

/// An error while reading or splitting reviews
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    CSV(#[from] csv::Error),
    #[error("The test fraction has to be in (0, 1) but was {0}.")]
    InvalidTestFraction(f64),
    #[error("The dataset {0} contains no valid review.")]
    Empty(Utf8PathBuf),
}

/// An error from fitting the logistic regression
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("The train data contains no {0} review, both sentiments are needed.")]
    MissingClass(Sentiment),
    #[error("The vectorizer has no features.")]
    EmptyVocabulary,
    #[error(transparent)]
    Logistic(#[from] linfa_logistic::error::Error),
}

/// An error while storing or loading the artifacts
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("The artifact {0} does not exist.")]
    Missing(Utf8PathBuf),
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Serialisation(#[from] bincode::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An error from creating a document classifier
#[derive(Debug, Error)]
pub enum ClassifierCreationError<Idf: IdfAlgorithm> {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Vocabulary(VocabularyError<Idf::Error>),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
