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

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Sentiment analysis of movie reviews
pub struct SentimentArgs {
    /// The mode of the application
    #[command(subcommand)]
    pub mode: RunMode,
}

/// Flags shared by all modes that read the configs.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// The folder containing the config.
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,
    /// The directory of the persisted classifier.
    #[arg(short, long)]
    pub artifacts: Option<Utf8PathBuf>,
    /// Overrides the log level from the config.
    #[arg(long)]
    pub log_level: Option<log::LevelFilter>,
    /// Log to file
    #[arg(long)]
    pub log_to_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum RunMode {
    /// Trains on the labeled reviews, prints the evaluation and saves the classifier.
    TRAIN {
        #[command(flatten)]
        common: CommonArgs,
        /// The csv with the columns review and sentiment.
        #[arg(short, long)]
        data: Option<Utf8PathBuf>,
    },
    /// Evaluates the saved classifier on all reviews of a csv.
    EVALUATE {
        #[command(flatten)]
        common: CommonArgs,
        /// The csv with the columns review and sentiment.
        #[arg(short, long)]
        data: Utf8PathBuf,
    },
    /// Predicts the sentiment of the given texts.
    PREDICT {
        #[command(flatten)]
        common: CommonArgs,
        /// The reviews to classify.
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Serves the web form.
    SERVE {
        #[command(flatten)]
        common: CommonArgs,
        /// The host to bind to.
        #[arg(long)]
        host: Option<String>,
        /// The port to bind to.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Initializes the data root by creating the default config file.
    INIT,
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use super::{RunMode, SentimentArgs};

    #[test]
    fn subcommands_are_parsed() {
        let args = SentimentArgs::try_parse_from(["sentiment", "serve", "--port", "8080", "-a", "models"]).unwrap();
        match args.mode {
            RunMode::SERVE { common, host, port } => {
                assert_eq!(Some(8080), port);
                assert_eq!(None, host);
                assert_eq!("models", common.artifacts.unwrap().as_str());
            }
            other => panic!("Expected serve, got {other:?}"),
        }

        let args = SentimentArgs::try_parse_from(["sentiment", "predict", "great movie", "awful movie"]).unwrap();
        assert!(matches!(args.mode, RunMode::PREDICT { ref texts, .. } if texts.len() == 2));

        let args = SentimentArgs::try_parse_from(["sentiment", "train", "--log-level", "debug", "--log-to-file"]).unwrap();
        match args.mode {
            RunMode::TRAIN { common, data } => {
                assert_eq!(Some(log::LevelFilter::Debug), common.log_level);
                assert!(common.log_to_file);
                assert!(data.is_none());
            }
            other => panic!("Expected train, got {other:?}"),
        }
    }

    #[test]
    fn predict_needs_a_text() {
        assert!(SentimentArgs::try_parse_from(["sentiment", "predict"]).is_err());
        assert!(SentimentArgs::try_parse_from(["sentiment", "evaluate"]).is_err());
    }
}
