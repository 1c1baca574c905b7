// Copyright 2024. Felix Engl
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::File;
use std::io::BufWriter;
use anyhow::Context;
use camino::Utf8Path;
use classifier::classifier::{DocumentClassifier, Prediction};
use classifier::config::ClassifierConfig;
use classifier::dataset::read_reviews;
use classifier::metrics::ClassificationReport;
use classifier::persistence::{save_artifacts, save_report};
use text_processing::stopword_registry::StopWordRegistry;
use crate::config::Configs;

/// Runs the whole pipeline and persists the classifier and its report.
pub fn train(configs: &Configs) -> anyhow::Result<ClassificationReport> {
    let registry = StopWordRegistry::initialize(&configs.stopwords);
    let outcome = classifier::train(&configs.classifier_config(), &registry)
        .with_context(|| format!("Failed to train with {}", configs.paths.train_data))?;
    log::info!(
        "Trained on {} reviews, evaluated on {} reviews.",
        outcome.train_size,
        outcome.test_size
    );
    println!("{}", outcome.report);
    let paths = configs.paths.artifact_paths();
    save_artifacts(&outcome.classifier, &paths)?;
    save_report(&outcome.report, &paths)?;
    println!("Saved the classifier to {}.", paths.dir());
    Ok(outcome.report)
}

/// Loads the persisted classifier.
pub fn load(configs: &Configs) -> anyhow::Result<DocumentClassifier> {
    let registry = StopWordRegistry::initialize(&configs.stopwords);
    let artifacts = configs.paths.dir_artifacts();
    let cfg: ClassifierConfig = ClassifierConfig::Load { artifacts: artifacts.clone() };
    classifier::create_document_classifier(&cfg, &registry)
        .with_context(|| format!("Failed to load the classifier from {artifacts}, did you train it?"))
}

/// Scores the persisted classifier on every review of [data].
pub fn evaluate(configs: &Configs, data: &Utf8Path) -> anyhow::Result<ClassificationReport> {
    let classifier = load(configs)?;
    let reviews = read_reviews(data)?;
    let report = classifier.evaluate(&reviews);
    println!("{report}");
    Ok(report)
}

/// Predicts every non-empty text.
pub fn predict(configs: &Configs, texts: &[String]) -> anyhow::Result<Vec<Prediction>> {
    let classifier = load(configs)?;
    let mut predictions = Vec::with_capacity(texts.len());
    for text in texts {
        if text.trim().is_empty() {
            log::warn!("Skipped an empty text.");
            continue;
        }
        let prediction = classifier.predict(text);
        println!("{}\t{:.4}\t{}", prediction.sentiment, prediction.probability, text);
        predictions.push(prediction);
    }
    Ok(predictions)
}

pub fn serve(configs: &Configs) -> anyhow::Result<()> {
    let classifier = load(configs)?;
    crate::web::serve(classifier, configs.server.clone())?;
    Ok(())
}

/// Writes [configs] as `config.json` into the data root, an existing file is kept.
pub fn init(configs: &Configs) -> anyhow::Result<()> {
    let root = configs.paths.root_path();
    std::fs::create_dir_all(root)?;
    let path = configs.paths.file_config();
    if path.exists() {
        println!("The default config already exists in {path}.\nDelete it before regenerating.");
        return Ok(());
    }
    let file = File::options().create_new(true).write(true).open(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), configs)?;
    println!("Created the default config at {path}.");
    Ok(())
}

#[cfg(test)]
mod test {
    use camino::Utf8Path;
    use camino_tempfile::tempdir;
    use classifier::dataset::Sentiment;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use crate::config::Configs;

    const POSITIVE: &[&str] = &[
        "A wonderful movie, great acting and a brilliant story.",
        "I loved it, the cast was excellent and the music beautiful.",
        "Brilliant and moving, a great film with wonderful characters.",
        "Excellent direction, I loved every beautiful scene.",
    ];

    const NEGATIVE: &[&str] = &[
        "A terrible movie, awful acting and a boring story.",
        "I hated it, the cast was bad and the music awful.",
        "Boring and dull, a terrible film with awful characters.",
        "Bad direction, I hated every boring scene.",
    ];

    fn write_reviews(path: &Utf8Path) {
        let mut rng = StdRng::seed_from_u64(5);
        let mut rows = Vec::new();
        for _ in 0..6 {
            for text in POSITIVE {
                rows.push((format!("{text} {}", lipsum::lipsum_words_with_rng(&mut rng, 4)), "positive"));
            }
            for text in NEGATIVE {
                rows.push((format!("{text} {}", lipsum::lipsum_words_with_rng(&mut rng, 4)), "negative"));
            }
        }
        rows.shuffle(&mut rng);
        let mut content = String::from("review,sentiment\n");
        for (text, label) in rows {
            content.push_str(&format!("\"{}\",{label}\n", text.replace('"', "\"\"")));
        }
        std::fs::write(path, content).unwrap();
    }

    fn configs(root: &Utf8Path) -> Configs {
        let mut configs = Configs::default();
        configs.paths.root = root.to_path_buf();
        configs.paths.train_data = root.join("reviews.csv");
        configs.pipeline.parameters.alpha = 0.01;
        configs
    }

    #[test]
    fn train_evaluate_and_predict() {
        let dir = tempdir().unwrap();
        let configs = configs(dir.path());
        write_reviews(&configs.paths.train_data);

        let report = super::train(&configs).unwrap();
        assert_eq!(10, report.support);
        assert!(configs.paths.artifact_paths().exists());
        assert!(configs.paths.artifact_paths().report().exists());

        let report = super::evaluate(&configs, &configs.paths.train_data).unwrap();
        assert_eq!(48, report.support);
        assert!(report.accuracy > 0.8, "{report}");

        let predictions = super::predict(
            &configs,
            &["I loved this wonderful film.".to_string(), "  ".to_string(), "Awful and boring.".to_string()],
        ).unwrap();
        assert_eq!(2, predictions.len());
        assert_eq!(Sentiment::Positive, predictions[0].sentiment);
        assert_eq!(Sentiment::Negative, predictions[1].sentiment);
    }

    #[test]
    fn loading_without_training_fails() {
        let dir = tempdir().unwrap();
        assert!(super::load(&configs(dir.path())).is_err());
    }

    #[test]
    fn init_writes_a_loadable_config() {
        let dir = tempdir().unwrap();
        let configs = configs(dir.path());
        super::init(&configs).unwrap();
        assert!(configs.paths.file_config().exists());
        super::init(&configs).unwrap();

        let loaded = Configs::load_from(dir.path()).unwrap();
        assert_eq!(configs.paths, loaded.paths);
        assert_eq!(3000, loaded.server.port);
    }
}
