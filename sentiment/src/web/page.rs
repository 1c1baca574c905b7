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

use classifier::classifier::Prediction;
use maud::{html, Markup, DOCTYPE};

/// What is shown below the form.
#[derive(Debug, Copy, Clone)]
pub enum Outcome<'a> {
    Prediction(Prediction),
    Error(&'a str),
}

/// Renders the form, [review] is put back into the text area.
pub fn render(outcome: Option<Outcome>, review: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Movie Review Sentiment" }
            }
            body {
                h1 { "Movie Review Sentiment" }
                form method="post" action="/" {
                    label for="review" { "Enter a movie review:" }
                    br;
                    textarea id="review" name="review" rows="10" cols="80" { (review) }
                    br;
                    button type="submit" { "Analyze" }
                }
                @match outcome {
                    Some(Outcome::Prediction(prediction)) => {
                        p id="prediction" { "Sentiment: " (prediction.sentiment.as_label()) }
                        p id="probability" { "P(positive) = " (format!("{:.3}", prediction.probability)) }
                    }
                    Some(Outcome::Error(message)) => {
                        p id="error" { (message) }
                    }
                    None => {}
                }
            }
        }
    }
}
