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

use crate::corpus::{CorpusDocumentStatistics, CorpusStatisticsCollector, VocabularyError, VocabularyLimits};
use crate::tf_idf::{IdfAlgorithm, Normalization, TfAlgorithm, TfIdf};
use crate::tokenizer::Tokenizer;
use crate::vectorizer::DocumentVectorizer;

pub mod cleaning;
pub mod configs;
pub mod corpus;
pub mod lemmatizer;
pub mod stopword_registry;
pub mod tf_idf;
pub mod tokenizer;
pub mod vectorizer;

/// Learns the vocabulary and idf values from [documents] tokenized by [tokenizer].
pub fn create_vectorizer<I, T, Tf, Idf>(
    documents: I,
    tokenizer: &Tokenizer,
    tf_idf: TfIdf<Tf, Idf>,
    normalization: Normalization,
    limits: VocabularyLimits,
) -> Result<DocumentVectorizer<String, Tf, Idf>, VocabularyError<Idf::Error>>
where
    I: IntoIterator<Item=T>,
    T: AsRef<str>,
    Tf: TfAlgorithm,
    Idf: IdfAlgorithm,
{
    let mut corpus_statistics = CorpusStatisticsCollector::default();
    for document in documents {
        corpus_statistics.add(tokenizer.tokenize(document.as_ref()));
    }
    log::info!(
        "Collected {} unique words from {} documents.",
        corpus_statistics.unique_word_count(),
        corpus_statistics.document_count()
    );
    corpus_statistics.provide_vectorizer(tf_idf, normalization, limits)
}

#[cfg(test)]
mod test {
    use crate::cleaning::TextCleaner;
    use crate::corpus::VocabularyLimits;
    use crate::lemmatizer::Lemmatizer;
    use crate::tf_idf::{defaults, Normalization};
    use crate::tokenizer::Tokenizer;
    use isolang::Language;

    #[test]
    fn vectorizer_is_learned_from_tokens() {
        let tokenizer = Tokenizer::new(
            Language::Eng,
            Some(TextCleaner::default()),
            true,
            None,
            Some(Lemmatizer::default()),
            None,
            2,
        );
        let vectorizer = super::create_vectorizer(
            ["Great movies!", "A great <b>movie</b>.", "Dull."],
            &tokenizer,
            defaults::RAW_INVERSE_SMOOTH,
            Normalization::L2,
            VocabularyLimits::default(),
        )
        .unwrap();
        let words: Vec<&String> = vectorizer.vocabulary().map(|(word, _)| word).collect();
        assert_eq!(vec!["dull", "great", "movie"], words);
    }
}
