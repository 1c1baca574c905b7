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

use std::fmt::{Debug, Formatter};
use linfa::Dataset;
use linfa::traits::{Fit, Predict};
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use text_processing::tf_idf::{Idf, IdfAlgorithm, Tf, TfAlgorithm};
use crate::config::LogisticRegressionParameters;
use crate::dataset::Sentiment;
use crate::error::ClassifierError;
use crate::features::TextFeatures;
use crate::metrics::{ClassificationReport, ConfusionMatrix};

/// A struct implementing this is used as train data.
pub trait TrainDataEntry {
    /// The label of the entry
    fn get_label(&self) -> Sentiment;

    /// The text of the entry
    fn get_text(&self) -> &str;
}

impl<T> TrainDataEntry for &T where T: TrainDataEntry {
    fn get_label(&self) -> Sentiment {
        (*self).get_label()
    }

    fn get_text(&self) -> &str {
        (*self).get_text()
    }
}

impl<Text> TrainDataEntry for (Sentiment, Text) where Text: AsRef<str> {
    fn get_label(&self) -> Sentiment {
        self.0
    }

    fn get_text(&self) -> &str {
        self.1.as_ref()
    }
}

/// The sentiment of a review and the probability that it is positive.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub probability: f64,
}

/// The number of documents vectorized at once by [DocumentClassifier::predict_batch].
pub const BATCH_ROWS: usize = 512;

/// A binary logistic regression over the tf-idf features of a review.
pub struct DocumentClassifier<TF = Tf, IDF = Idf> {
    features: TextFeatures<TF, IDF>,
    model: FittedLogisticRegression<f64, bool>,
    /// True if the model reports the probability of `true`, aka [Sentiment::Positive].
    reports_positive: bool,
}

impl<TF, IDF> Debug for DocumentClassifier<TF, IDF> where TF: Debug, IDF: Debug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentClassifier")
            .field("features", &self.features)
            .field("intercept", &self.model.intercept())
            .field("reports_positive", &self.reports_positive)
            .finish()
    }
}

impl<TF, IDF> DocumentClassifier<TF, IDF> {
    /// Wraps an already fitted [model], the model has to know as many features as [features].
    pub fn new(features: TextFeatures<TF, IDF>, model: FittedLogisticRegression<f64, bool>) -> Self {
        let reports_positive = orientation(&model, features.len());
        Self { features, model, reports_positive }
    }

    pub fn model(&self) -> &FittedLogisticRegression<f64, bool> {
        &self.model
    }

    pub fn features(&self) -> &TextFeatures<TF, IDF> {
        &self.features
    }

    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        self.features.tokenize(doc)
    }

    pub fn into_parts(self) -> (TextFeatures<TF, IDF>, FittedLogisticRegression<f64, bool>) {
        (self.features, self.model)
    }

    fn positive_probabilities(&self, matrix: &Array2<f64>) -> Array1<f64> {
        let probabilities = self.model.predict_probabilities(matrix);
        if self.reports_positive {
            probabilities
        } else {
            probabilities.mapv(|p| 1.0 - p)
        }
    }
}

/// The probabilities belong to `true` iff the model predicts `true` for a row with a probability above 0.5.
///
/// The row has to score away from 0.5, the zero row only does so with an intercept.
/// Without one the feature with the strongest weight is set.
fn orientation(model: &FittedLogisticRegression<f64, bool>, feature_count: usize) -> bool {
    let mut probe = Array2::zeros((1, feature_count));
    if model.intercept() == 0.0 {
        let strongest = model
            .params()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()));
        if let Some((index, _)) = strongest {
            probe[[0, index]] = 1.0;
        }
    }
    let label = model.predict(&probe);
    let probability = model.predict_probabilities(&probe);
    match (label.get(0), probability.get(0)) {
        (Some(label), Some(probability)) if *probability != 0.5 => *label == (*probability > 0.5),
        // Every row scores 0.5, both readings agree.
        _ => true,
    }
}

impl<TF, IDF> DocumentClassifier<TF, IDF> where TF: TfAlgorithm, IDF: IdfAlgorithm {
    /// Fits a logistic regression on [data] with the features of [features].
    ///
    /// Entries with [min_doc_length] or fewer tokens are skipped.
    pub fn train<I: IntoIterator<Item=T>, T: TrainDataEntry>(
        features: TextFeatures<TF, IDF>,
        data: I,
        parameters: &LogisticRegressionParameters,
        min_doc_length: usize,
    ) -> Result<DocumentClassifier<TF, IDF>, ClassifierError> {
        if features.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }
        let mut labels = Vec::new();
        let mut documents = Vec::new();
        let mut skipped = 0usize;
        for value in data {
            let tokens = features.tokenize(value.get_text());
            if tokens.len() <= min_doc_length {
                skipped += 1;
                continue;
            }
            labels.push(value.get_label().is_positive());
            documents.push(tokens);
        }
        if skipped > 0 {
            log::info!("Skipped {skipped} reviews with {min_doc_length} or fewer tokens.");
        }
        if !labels.iter().any(|label| *label) {
            return Err(ClassifierError::MissingClass(Sentiment::Positive));
        }
        if labels.iter().all(|label| *label) {
            return Err(ClassifierError::MissingClass(Sentiment::Negative));
        }

        log::info!("Train logistic regression with {} reviews and {} features.", labels.len(), features.len());

        let records = features.to_matrix(documents.iter().map(Vec::as_slice));
        let dataset = Dataset::new(records, Array1::from_vec(labels));

        let model = LogisticRegression::default()
            .alpha(parameters.alpha)
            .max_iterations(parameters.max_iterations)
            .gradient_tolerance(parameters.gradient_tolerance)
            .with_intercept(parameters.fit_intercept)
            .fit(&dataset)?;

        Ok(DocumentClassifier::new(features, model))
    }

    pub fn predict(&self, doc: &str) -> Prediction {
        let row = self.features.to_row(doc);
        let probability = self.positive_probabilities(&row).get(0).copied().unwrap_or(0.5);
        Prediction {
            sentiment: Sentiment::from_label(probability >= 0.5),
            probability,
        }
    }

    /// Predicts [docs] in chunks of [BATCH_ROWS] documents.
    pub fn predict_batch<'a, I: IntoIterator<Item=&'a str>>(&self, docs: I) -> Vec<Prediction> {
        self.predict_batch_chunked(docs, BATCH_ROWS)
    }

    /// Predicts [docs], at most [chunk_size] documents are held as a dense matrix at once.
    pub fn predict_batch_chunked<'a, I: IntoIterator<Item=&'a str>>(&self, docs: I, chunk_size: usize) -> Vec<Prediction> {
        let docs: Vec<&str> = docs.into_iter().collect();
        let mut predictions = Vec::with_capacity(docs.len());
        for chunk in docs.chunks(chunk_size.max(1)) {
            let tokens: Vec<Vec<String>> = chunk.iter().map(|doc| self.features.tokenize(doc)).collect();
            let matrix = self.features.to_matrix(tokens.iter().map(Vec::as_slice));
            predictions.extend(
                self.positive_probabilities(&matrix)
                    .into_iter()
                    .map(|probability| Prediction {
                        sentiment: Sentiment::from_label(probability >= 0.5),
                        probability,
                    })
            );
        }
        predictions
    }

    /// Scores the classifier on the labeled [data].
    pub fn evaluate<I: IntoIterator<Item=T>, T: TrainDataEntry>(&self, data: I) -> ClassificationReport {
        let data: Vec<T> = data.into_iter().collect();
        let predictions = self.predict_batch(data.iter().map(TrainDataEntry::get_text));
        let matrix: ConfusionMatrix = data
            .iter()
            .zip(predictions)
            .map(|(entry, prediction)| (entry.get_label(), prediction.sentiment))
            .collect();
        let report = ClassificationReport::from(matrix);
        log::info!("Evaluated {} reviews with an accuracy of {:.4}.", report.support, report.accuracy);
        report
    }

    /// The cosine similarity of the two documents in the feature space.
    pub fn calculate_similarity(&self, doc_a: impl AsRef<str>, doc_b: impl AsRef<str>) -> f64 {
        let a = self.features.vectorize(doc_a.as_ref());
        let b = self.features.vectorize(doc_b.as_ref());
        a.cosine_sim(&b)
    }
}
