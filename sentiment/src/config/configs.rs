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

use crate::config::paths::PathsConfig;
use crate::config::server::ServerConfig;
use crate::config::SystemConfig;
use camino::Utf8Path;
use classifier::config::DocumentClassifierConfig;
use config::Config;
use serde::{Deserialize, Serialize};
use text_processing::configs::StopwordRegistryConfig;

const ENV_PREFIX: &str = "SENTIMENT";

/// A collection of all configs used by the application.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename(serialize = "Config"))]
pub struct Configs {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub stopwords: StopwordRegistryConfig,
    #[serde(default)]
    pub pipeline: DocumentClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Configs {
    /// Loads `./config`, then `<folder>/config` and finally the environment.
    pub fn load_from<P: AsRef<Utf8Path>>(folder: P) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("./config").required(false))
            .add_source(config::File::with_name(folder.as_ref().join("config").as_str()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("."))
            .build()?
            .try_deserialize()
    }

    /// Loads the configs at the default paths, the defaults are used when nothing is found.
    pub fn discover_or_default() -> Result<Self, config::ConfigError> {
        Self::load_from(PathsConfig::default().root_path())
    }

    /// The pipeline config reading the reviews from [PathsConfig::train_data].
    pub fn classifier_config(&self) -> DocumentClassifierConfig {
        let mut cfg = self.pipeline.clone();
        cfg.train_data = self.paths.train_data.clone();
        cfg
    }
}

#[cfg(test)]
mod test {
    use crate::config::Configs;
    use camino_tempfile::tempdir;
    use std::fs::File;
    use std::io::{BufWriter, Write};

    #[test]
    fn can_create_hierarchical_config() {
        let dir = tempdir().unwrap();
        let mut config = Configs::default();
        config.pipeline.seed = 99;
        config.server.port = 8080;
        let mut writer = BufWriter::new(File::create(dir.path().join("config.json")).unwrap());
        write!(&mut writer, "{}", serde_json::to_string(&config).unwrap()).unwrap();
        drop(writer);

        unsafe {
            std::env::set_var("SENTIMENT.SYSTEM.LOG_TO_FILE", "true");
        }
        let loaded = Configs::load_from(dir.path()).unwrap();
        unsafe {
            std::env::remove_var("SENTIMENT.SYSTEM.LOG_TO_FILE");
        }

        assert_eq!(99, loaded.pipeline.seed);
        assert_eq!(8080, loaded.server.port);
        assert_eq!("127.0.0.1", loaded.server.host);
        assert!(loaded.system.log_to_file);
        assert_eq!(config.paths, loaded.paths);
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Configs::load_from(dir.path()).unwrap();
        assert_eq!(3000, loaded.server.port);
        assert_eq!(42, loaded.pipeline.seed);
        assert_eq!(0.2, loaded.pipeline.test_fraction);
    }

    #[test]
    fn train_data_comes_from_the_paths() {
        let mut config = Configs::default();
        config.paths.train_data = "reviews.csv".into();
        assert_eq!("reviews.csv", config.classifier_config().train_data.as_str());
    }
}
