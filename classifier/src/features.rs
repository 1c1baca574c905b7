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

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use text_processing::tf_idf::TfAlgorithm;
use text_processing::tokenizer::Tokenizer;
use text_processing::vectorizer::{DocumentVectorizer, VectorizedDocument};

/// The tokenizer and the fitted vectorizer, everything needed to turn a raw review into features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "TF: Serialize, IDF: Serialize",
    deserialize = "TF: DeserializeOwned, IDF: DeserializeOwned"
))]
pub struct TextFeatures<TF, IDF> {
    tokenizer: Tokenizer,
    vectorizer: DocumentVectorizer<String, TF, IDF>,
}

impl<TF, IDF> TextFeatures<TF, IDF> {
    pub fn new(tokenizer: Tokenizer, vectorizer: DocumentVectorizer<String, TF, IDF>) -> Self {
        Self { tokenizer, vectorizer }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn vectorizer(&self) -> &DocumentVectorizer<String, TF, IDF> {
        &self.vectorizer
    }

    /// The number of columns of a feature matrix.
    pub fn len(&self) -> usize {
        self.vectorizer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectorizer.is_empty()
    }

    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        self.tokenizer.tokenize(doc)
    }
}

impl<TF, IDF> TextFeatures<TF, IDF> where TF: TfAlgorithm {
    pub fn vectorize(&self, doc: &str) -> VectorizedDocument<&String> {
        self.vectorize_tokens(self.tokenizer.tokenize(doc))
    }

    pub fn vectorize_tokens(&self, tokens: Vec<String>) -> VectorizedDocument<&String> {
        self.vectorizer.vectorize_document(tokens)
    }

    /// Builds a dense row per token list.
    pub fn to_matrix<'a, I>(&self, documents: I) -> Array2<f64>
    where
        I: IntoIterator<Item=&'a [String]>,
        I::IntoIter: ExactSizeIterator,
    {
        let documents = documents.into_iter();
        let mut matrix = Array2::zeros((documents.len(), self.len()));
        for (row, tokens) in documents.enumerate() {
            let vector = self.vectorizer.vectorize_document(tokens.iter().cloned());
            for entry in vector.iter() {
                matrix[[row, entry.index]] = entry.value;
            }
        }
        matrix
    }

    /// Tokenizes and vectorizes [doc] into a matrix with a single row.
    pub fn to_row(&self, doc: &str) -> Array2<f64> {
        let tokens = self.tokenizer.tokenize(doc);
        self.to_matrix([tokens.as_slice()])
    }
}
