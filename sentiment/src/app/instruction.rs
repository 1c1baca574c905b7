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

use crate::app::args::{CommonArgs, RunMode, SentimentArgs};
use crate::config::Configs;
use camino::Utf8PathBuf;

/// The kind of instruction provided by the args.
#[derive(Debug)]
pub enum Instruction {
    Train(Configs),
    Evaluate {
        configs: Configs,
        data: Utf8PathBuf,
    },
    Predict {
        configs: Configs,
        texts: Vec<String>,
    },
    Serve(Configs),
    Init(Configs),
}

impl Instruction {
    pub fn configs(&self) -> &Configs {
        match self {
            Instruction::Train(configs) => configs,
            Instruction::Evaluate { configs, .. } => configs,
            Instruction::Predict { configs, .. } => configs,
            Instruction::Serve(configs) => configs,
            Instruction::Init(configs) => configs,
        }
    }
}

fn load_configs(common: CommonArgs) -> Result<Configs, config::ConfigError> {
    let mut configs = match &common.config {
        None => Configs::discover_or_default()?,
        Some(path) => Configs::load_from(path)?,
    };
    if let Some(artifacts) = common.artifacts {
        configs.paths.artifacts = artifacts;
    }
    if let Some(log_level) = common.log_level {
        configs.system.log_level = log_level;
    }
    if common.log_to_file {
        configs.system.log_to_file = true;
    }
    Ok(configs)
}

/// Consumes the args and returns everything necessary to execute the application
pub fn prepare_instruction(args: SentimentArgs) -> Result<Instruction, config::ConfigError> {
    let instruction = match args.mode {
        RunMode::TRAIN { common, data } => {
            let mut configs = load_configs(common)?;
            if let Some(data) = data {
                configs.paths.train_data = data;
            }
            Instruction::Train(configs)
        }
        RunMode::EVALUATE { common, data } => Instruction::Evaluate {
            configs: load_configs(common)?,
            data,
        },
        RunMode::PREDICT { common, texts } => Instruction::Predict {
            configs: load_configs(common)?,
            texts,
        },
        RunMode::SERVE { common, host, port } => {
            let mut configs = load_configs(common)?;
            if let Some(host) = host {
                configs.server.host = host;
            }
            if let Some(port) = port {
                configs.server.port = port;
            }
            Instruction::Serve(configs)
        }
        RunMode::INIT => Instruction::Init(Configs::default()),
    };
    Ok(instruction)
}
