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

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use camino::{Utf8Path, Utf8PathBuf};
use linfa_logistic::FittedLogisticRegression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::classifier::DocumentClassifier;
use crate::error::PersistenceError;
use crate::features::TextFeatures;
use crate::metrics::ClassificationReport;

/// The files of a persisted classifier inside of a directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ArtifactPaths {
    dir: Utf8PathBuf,
}

impl ArtifactPaths {
    pub const VECTORIZER: &'static str = "vectorizer.bin";
    pub const MODEL: &'static str = "model.bin";
    pub const REPORT: &'static str = "report.json";

    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn vectorizer(&self) -> Utf8PathBuf {
        self.dir.join(Self::VECTORIZER)
    }

    pub fn model(&self) -> Utf8PathBuf {
        self.dir.join(Self::MODEL)
    }

    pub fn report(&self) -> Utf8PathBuf {
        self.dir.join(Self::REPORT)
    }

    /// True if both binary artifacts exist.
    pub fn exists(&self) -> bool {
        self.vectorizer().exists() && self.model().exists()
    }
}

fn writer(path: &Utf8Path) -> Result<BufWriter<File>, PersistenceError> {
    Ok(BufWriter::new(
        File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?,
    ))
}

fn reader(path: Utf8PathBuf) -> Result<BufReader<File>, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::Missing(path));
    }
    Ok(BufReader::new(File::options().read(true).open(path)?))
}

/// Writes the vectorizer and the model of [classifier] to [paths].
pub fn save_artifacts<TF, IDF>(classifier: &DocumentClassifier<TF, IDF>, paths: &ArtifactPaths) -> Result<(), PersistenceError>
where
    TF: Serialize,
    IDF: Serialize,
{
    std::fs::create_dir_all(paths.dir())?;
    let mut out = writer(&paths.vectorizer())?;
    bincode::serialize_into(&mut out, classifier.features())?;
    out.flush()?;
    let mut out = writer(&paths.model())?;
    bincode::serialize_into(&mut out, classifier.model())?;
    out.flush()?;
    log::info!("Saved the classifier to {}.", paths.dir());
    Ok(())
}

/// Reads a classifier written by [save_artifacts].
pub fn load_artifacts<TF, IDF>(paths: &ArtifactPaths) -> Result<DocumentClassifier<TF, IDF>, PersistenceError>
where
    TF: DeserializeOwned,
    IDF: DeserializeOwned,
{
    let features: TextFeatures<TF, IDF> = bincode::deserialize_from(reader(paths.vectorizer())?)?;
    let model: FittedLogisticRegression<f64, bool> = bincode::deserialize_from(reader(paths.model())?)?;
    log::info!("Loaded a classifier with {} features from {}.", features.len(), paths.dir());
    Ok(DocumentClassifier::new(features, model))
}

pub fn save_report(report: &ClassificationReport, paths: &ArtifactPaths) -> Result<(), PersistenceError> {
    std::fs::create_dir_all(paths.dir())?;
    let mut out = writer(&paths.report())?;
    serde_json::to_writer_pretty(&mut out, report)?;
    out.flush()?;
    Ok(())
}

pub fn load_report(paths: &ArtifactPaths) -> Result<ClassificationReport, PersistenceError> {
    Ok(serde_json::from_reader(reader(paths.report())?)?)
}
