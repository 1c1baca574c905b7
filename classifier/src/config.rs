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

use std::fmt::Debug;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use text_processing::configs::TokenizerConfig;
use text_processing::corpus::VocabularyLimits;
use text_processing::tf_idf::{Idf, IdfAlgorithm, Normalization, Tf, TfAlgorithm, TfIdf};

/// The hyper parameters of the logistic regression.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionParameters {
    /// The strength of the L2 penalty
    pub alpha: f64,
    pub max_iterations: u64,
    pub gradient_tolerance: f64,
    pub fit_intercept: bool,
}

impl Default for LogisticRegressionParameters {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_iterations: 100,
            gradient_tolerance: 1e-4,
            fit_intercept: true,
        }
    }
}

/// Everything needed to train a [crate::classifier::DocumentClassifier] from a csv.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, bound(
    serialize = "TF: Serialize, IDF: Serialize",
    deserialize = "TF: DeserializeOwned + Default, IDF: DeserializeOwned + Default"
))]
pub struct DocumentClassifierConfig<TF = Tf, IDF = Idf> {
    pub tf: TF,
    pub idf: IDF,
    pub normalization: Normalization,
    pub limits: VocabularyLimits,
    pub train_data: Utf8PathBuf,
    pub tokenizer: TokenizerConfig,
    pub parameters: LogisticRegressionParameters,
    /// The fraction of the reviews held back for the evaluation.
    pub test_fraction: f64,
    pub seed: u64,
    /// Reviews with this many tokens or fewer are not trained on.
    pub min_doc_length: usize,
}

impl<TF, IDF> Default for DocumentClassifierConfig<TF, IDF> where TF: Default, IDF: Default {
    fn default() -> Self {
        Self {
            tf: TF::default(),
            idf: IDF::default(),
            normalization: Normalization::default(),
            limits: VocabularyLimits::default(),
            train_data: Utf8PathBuf::from("IMDB Dataset.csv"),
            tokenizer: TokenizerConfig::default(),
            parameters: LogisticRegressionParameters::default(),
            test_fraction: 0.2,
            seed: 42,
            min_doc_length: 0,
        }
    }
}

impl<TF, IDF> DocumentClassifierConfig<TF, IDF> where TF: TfAlgorithm + Clone, IDF: IdfAlgorithm + Clone {
    pub fn tf_idf(&self) -> TfIdf<TF, IDF> {
        TfIdf::new(self.tf.clone(), self.idf.clone())
    }
}

/// How a classifier is obtained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "TF: Clone + Serialize, IDF: Clone + Serialize",
    deserialize = "TF: Clone + DeserializeOwned + Default + Debug, IDF: Clone + DeserializeOwned + Default + Debug"
))]
#[serde(try_from = "ClassifierConfigSer<TF, IDF>", into = "ClassifierConfigSer<TF, IDF>")]
pub enum ClassifierConfig<TF = Tf, IDF = Idf> {
    /// Loads the artifacts from the directory.
    Load {
        artifacts: Utf8PathBuf,
    },
    /// Always trains and does not persist anything.
    Train {
        classifier: DocumentClassifierConfig<TF, IDF>,
    },
    /// Loads the artifacts if present, otherwise trains and saves them.
    All {
        artifacts: Utf8PathBuf,
        retrain_if_possible: bool,
        classifier: DocumentClassifierConfig<TF, IDF>,
    },
}

impl<TF, IDF> ClassifierConfig<TF, IDF> {
    pub fn training(&self) -> Option<&DocumentClassifierConfig<TF, IDF>> {
        match self {
            ClassifierConfig::Train { classifier } => Some(classifier),
            ClassifierConfig::All { classifier, .. } => Some(classifier),
            ClassifierConfig::Load { .. } => None,
        }
    }

    pub fn artifacts(&self) -> Option<&Utf8PathBuf> {
        match self {
            ClassifierConfig::Load { artifacts } => Some(artifacts),
            ClassifierConfig::All { artifacts, .. } => Some(artifacts),
            ClassifierConfig::Train { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, bound(
    serialize = "TF: Serialize, IDF: Serialize",
    deserialize = "TF: DeserializeOwned + Default, IDF: DeserializeOwned + Default"
))]
struct ClassifierConfigSer<TF, IDF> {
    #[serde(skip_serializing_if = "Option::is_none")]
    artifacts: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "std::ops::Not::not", rename = "retrain")]
    retrain_if_possible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    classifier: Option<DocumentClassifierConfig<TF, IDF>>,
}

impl<TF, IDF> Default for ClassifierConfigSer<TF, IDF> {
    fn default() -> Self {
        Self {
            artifacts: None,
            retrain_if_possible: false,
            classifier: None,
        }
    }
}

impl<TF, IDF> From<ClassifierConfig<TF, IDF>> for ClassifierConfigSer<TF, IDF> {
    fn from(value: ClassifierConfig<TF, IDF>) -> Self {
        match value {
            ClassifierConfig::Load { artifacts } => Self {
                artifacts: Some(artifacts),
                ..Default::default()
            },
            ClassifierConfig::Train { classifier } => Self {
                classifier: Some(classifier),
                ..Default::default()
            },
            ClassifierConfig::All { artifacts, retrain_if_possible, classifier } => Self {
                artifacts: Some(artifacts),
                retrain_if_possible,
                classifier: Some(classifier),
            },
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to initialize any meaningful classifier config from {0:?}")]
struct ClassifierConfigSerError<TF: Debug, IDF: Debug>(ClassifierConfigSer<TF, IDF>);

impl<TF, IDF> TryFrom<ClassifierConfigSer<TF, IDF>> for ClassifierConfig<TF, IDF> where TF: Debug, IDF: Debug {
    type Error = ClassifierConfigSerError<TF, IDF>;

    fn try_from(value: ClassifierConfigSer<TF, IDF>) -> Result<Self, Self::Error> {
        match value {
            ClassifierConfigSer { artifacts: Some(artifacts), retrain_if_possible: false, classifier: None } => {
                Ok(Self::Load { artifacts })
            }
            ClassifierConfigSer { artifacts: None, retrain_if_possible: false, classifier: Some(classifier) } => {
                Ok(Self::Train { classifier })
            }
            ClassifierConfigSer { artifacts: Some(artifacts), retrain_if_possible, classifier: Some(classifier) } => {
                Ok(Self::All { artifacts, retrain_if_possible, classifier })
            }
            err => Err(ClassifierConfigSerError(err)),
        }
    }
}
