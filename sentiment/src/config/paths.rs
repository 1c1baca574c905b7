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

use camino::{Utf8Path, Utf8PathBuf};
use classifier::persistence::ArtifactPaths;
use serde::{Deserialize, Serialize};

/// Where the application reads and writes its files.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename(serialize = "Paths"))]
pub struct PathsConfig {
    /// The root path where the application runs
    #[serde(default = "_default_root_folder")]
    pub root: Utf8PathBuf,
    /// The labeled reviews, relative to the working directory
    #[serde(default = "_default_train_data")]
    pub train_data: Utf8PathBuf,
    /// The directory of the persisted classifier, relative to [root]
    #[serde(default = "_default_artifacts_dir")]
    pub artifacts: Utf8PathBuf,
}

fn _default_root_folder() -> Utf8PathBuf {
    Utf8PathBuf::from("sentiment_data")
}

fn _default_train_data() -> Utf8PathBuf {
    Utf8PathBuf::from("IMDB Dataset.csv")
}

fn _default_artifacts_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("artifacts")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: _default_root_folder(),
            train_data: _default_train_data(),
            artifacts: _default_artifacts_dir(),
        }
    }
}

impl PathsConfig {
    pub fn root_path(&self) -> &Utf8Path {
        self.root.as_path()
    }

    /// The artifact directory, an absolute [artifacts] is taken as is.
    pub fn dir_artifacts(&self) -> Utf8PathBuf {
        self.root.join(&self.artifacts)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(self.dir_artifacts())
    }

    pub fn file_log(&self) -> Utf8PathBuf {
        self.root.join("out.log")
    }

    pub fn file_config(&self) -> Utf8PathBuf {
        self.root.join("config.json")
    }
}
