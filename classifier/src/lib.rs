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

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod metrics;
pub mod persistence;

mod csv2;
#[cfg(test)]
mod test_support;

use crate::classifier::DocumentClassifier;
use crate::config::{ClassifierConfig, DocumentClassifierConfig};
use crate::dataset::{read_reviews, train_test_split};
use crate::error::ClassifierCreationError;
use crate::features::TextFeatures;
use crate::metrics::ClassificationReport;
use crate::persistence::{load_artifacts, save_artifacts, save_report, ArtifactPaths};
pub use csv2::CsvProvider;
use serde::de::DeserializeOwned;
use serde::Serialize;
use text_processing::create_vectorizer;
use text_processing::stopword_registry::StopWordRegistry;
use text_processing::tf_idf::{IdfAlgorithm, TfAlgorithm};
use text_processing::tokenizer::Tokenizer;

/// A freshly trained classifier and its scores on the held back reviews.
#[derive(Debug)]
pub struct TrainingOutcome<TF, IDF> {
    pub classifier: DocumentClassifier<TF, IDF>,
    pub report: ClassificationReport,
    pub train_size: usize,
    pub test_size: usize,
}

/// Reads the reviews, splits them, learns the vectorizer on the train split,
/// fits the model and evaluates it on the test split.
pub fn train<TF, IDF>(
    cfg: &DocumentClassifierConfig<TF, IDF>,
    stopword_registry: &StopWordRegistry,
) -> Result<TrainingOutcome<TF, IDF>, ClassifierCreationError<IDF>>
where
    TF: TfAlgorithm + Clone,
    IDF: IdfAlgorithm + Clone,
{
    log::info!("Train a sentiment classifier with {}", cfg.train_data);
    let entries = read_reviews(&cfg.train_data)?;
    let split = train_test_split(entries, cfg.test_fraction, cfg.seed)?;
    log::info!("Split into {} train and {} test reviews.", split.train.len(), split.test.len());

    let tokenizer = Tokenizer::from_config(&cfg.tokenizer, stopword_registry);
    let vectorizer = create_vectorizer(
        split.train.iter().map(|entry| entry.review.as_str()),
        &tokenizer,
        cfg.tf_idf(),
        cfg.normalization,
        cfg.limits,
    ).map_err(ClassifierCreationError::Vocabulary)?;

    let classifier = DocumentClassifier::train(
        TextFeatures::new(tokenizer, vectorizer),
        &split.train,
        &cfg.parameters,
        cfg.min_doc_length,
    )?;
    let report = classifier.evaluate(&split.test);
    Ok(TrainingOutcome {
        classifier,
        report,
        train_size: split.train.len(),
        test_size: split.test.len(),
    })
}

/// Creates the classifier described by [cfg].
pub fn create_document_classifier<TF, IDF>(
    cfg: &ClassifierConfig<TF, IDF>,
    stopword_registry: &StopWordRegistry,
) -> Result<DocumentClassifier<TF, IDF>, ClassifierCreationError<IDF>>
where
    TF: TfAlgorithm + Serialize + DeserializeOwned + Clone,
    IDF: IdfAlgorithm + Serialize + DeserializeOwned + Clone,
{
    let classifier = match cfg {
        ClassifierConfig::Load { artifacts } => load_artifacts(&ArtifactPaths::new(artifacts))?,
        ClassifierConfig::Train { classifier } => {
            let outcome = train(classifier, stopword_registry)?;
            log::info!("Trained classifier:\n{}", outcome.report);
            outcome.classifier
        }
        ClassifierConfig::All { artifacts, retrain_if_possible, classifier } => {
            let paths = ArtifactPaths::new(artifacts);
            if !retrain_if_possible && paths.exists() {
                load_artifacts(&paths)?
            } else {
                let outcome = train(classifier, stopword_registry)?;
                log::info!("Trained classifier:\n{}", outcome.report);
                save_artifacts(&outcome.classifier, &paths)?;
                save_report(&outcome.report, &paths)?;
                outcome.classifier
            }
        }
    };
    Ok(classifier)
}
