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

//! Fixtures shared by the tests of this crate.

use camino::Utf8Path;
use isolang::Language;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use text_processing::cleaning::TextCleaner;
use text_processing::corpus::VocabularyLimits;
use text_processing::create_vectorizer;
use text_processing::lemmatizer::Lemmatizer;
use text_processing::tf_idf::{defaults, Idf, Normalization, Tf};
use text_processing::tokenizer::Tokenizer;
use crate::config::LogisticRegressionParameters;
use crate::dataset::Sentiment;
use crate::features::TextFeatures;

const POSITIVE: &[&str] = &[
    "A wonderful movie, great acting and a brilliant story.",
    "I loved it, the cast was excellent and the music beautiful.",
    "Brilliant and moving, a great film with wonderful characters.",
    "Excellent direction, I loved every beautiful scene.",
    "Great fun, wonderful performances, a brilliant script.",
    "Beautiful, moving and excellent. I loved the story.",
];

const NEGATIVE: &[&str] = &[
    "A terrible movie, awful acting and a boring story.",
    "I hated it, the cast was bad and the music awful.",
    "Boring and dull, a terrible film with awful characters.",
    "Bad direction, I hated every boring scene.",
    "Awful mess, terrible performances, a dull script.",
    "Dull, boring and bad. I hated the story.",
];

pub fn reviews() -> Vec<(Sentiment, &'static str)> {
    POSITIVE
        .iter()
        .map(|text| (Sentiment::Positive, *text))
        .chain(NEGATIVE.iter().map(|text| (Sentiment::Negative, *text)))
        .collect()
}

pub fn tokenizer() -> Tokenizer {
    Tokenizer::new(Language::Eng, Some(TextCleaner::default()), true, None, Some(Lemmatizer::default()), None, 3)
}

pub fn text_features() -> TextFeatures<Tf, Idf> {
    let tokenizer = tokenizer();
    let data = reviews();
    let vectorizer = create_vectorizer(
        data.iter().map(|(_, text)| *text),
        &tokenizer,
        defaults::RAW_INVERSE_SMOOTH,
        Normalization::L2,
        VocabularyLimits::default(),
    ).unwrap();
    TextFeatures::new(tokenizer, vectorizer)
}

pub fn parameters() -> LogisticRegressionParameters {
    LogisticRegressionParameters {
        alpha: 0.01,
        max_iterations: 200,
        ..LogisticRegressionParameters::default()
    }
}

/// Writes [copies] shuffled copies of the reviews, padded with lorem ipsum, as a review csv.
pub fn write_review_csv(path: &Utf8Path, copies: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for copy in 0..copies {
        for (sentiment, text) in reviews() {
            rows.push((sentiment, format!("{text} {}", lipsum::lipsum_words_with_rng(&mut rng, 3 + copy % 4))));
        }
    }
    rows.shuffle(&mut rng);
    let mut writer = csv::Writer::from_writer(std::fs::File::create(path).unwrap());
    writer.write_record(["review", "sentiment"]).unwrap();
    for (sentiment, text) in rows {
        writer.write_record([text.as_str(), sentiment.as_label()]).unwrap();
    }
    writer.flush().unwrap();
}
