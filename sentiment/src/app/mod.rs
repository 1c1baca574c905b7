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

mod args;
mod commands;
mod instruction;
mod logging;

use std::process::ExitCode;
pub use args::SentimentArgs;
use instruction::{prepare_instruction, Instruction};
use logging::configure_logging;

/// Executes the parsed args.
pub fn exec_args(args: SentimentArgs) -> ExitCode {
    let instruction = match prepare_instruction(args) {
        Ok(instruction) => instruction,
        Err(err) => {
            eprintln!("Failed to load the configs: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logging(instruction.configs()) {
        eprintln!("Failed to configure the logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match execute(instruction) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(instruction: Instruction) -> anyhow::Result<()> {
    match instruction {
        Instruction::Train(configs) => {
            commands::train(&configs)?;
        }
        Instruction::Evaluate { configs, data } => {
            commands::evaluate(&configs, &data)?;
        }
        Instruction::Predict { configs, texts } => {
            commands::predict(&configs, &texts)?;
        }
        Instruction::Serve(configs) => commands::serve(&configs)?,
        Instruction::Init(configs) => commands::init(&configs)?,
    }
    Ok(())
}
