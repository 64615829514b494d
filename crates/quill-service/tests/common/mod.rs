// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

#![allow(dead_code)]

use quill_asset::AssetClient;
use quill_contracts::{FormatConfig, Outcome};
use quill_service::{EnvProvider, InputProvider, OutputSink, SnippetService, Toolchain};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use wiremock::MockServer;

pub const CONTAINER: &str = "snippets";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

#[derive(Debug, Clone)]
pub enum InterpretBehaviour {
    /// Read one scripted input and echo it as output and final value.
    Echo,
    Fixed(Outcome),
}

/// Configurable stand-in for the embedded toolchain.
#[derive(Debug, Clone)]
pub struct StubToolchain {
    pub validate: Outcome,
    pub interpret: InterpretBehaviour,
    pub analyse: Result<Vec<String>, String>,
    /// `Ok(contents)` rewrites the staged source in place; `Err` leaves
    /// it untouched.
    pub reformat: Result<String, String>,
}

impl Default for StubToolchain {
    fn default() -> Self {
        Self {
            validate: Outcome::Success(json!("ok")),
            interpret: InterpretBehaviour::Echo,
            analyse: Ok(Vec::new()),
            reformat: Ok("formatted".to_string()),
        }
    }
}

impl Toolchain for StubToolchain {
    fn validate(&self, _version: &str, _source: &Path) -> Outcome {
        self.validate.clone()
    }

    fn interpret(
        &self,
        _version: &str,
        _source: &Path,
        input: &mut dyn InputProvider,
        output: &mut dyn OutputSink,
        _env: &dyn EnvProvider,
    ) -> Outcome {
        match &self.interpret {
            InterpretBehaviour::Fixed(outcome) => outcome.clone(),
            InterpretBehaviour::Echo => match input.read_input("value") {
                Some(value) => {
                    output.emit(value.clone());
                    Outcome::Success(Value::String(value))
                }
                None => Outcome::Failure("No input available".to_string()),
            },
        }
    }

    fn analyse(&self, _version: &str, _source: &Path, _config: &Path) -> Result<Vec<String>, String> {
        self.analyse.clone()
    }

    fn reformat(&self, _version: &str, source: &Path, _config: &FormatConfig) -> Outcome {
        match &self.reformat {
            Ok(contents) => match std::fs::write(source, contents) {
                Ok(()) => Outcome::Success(Value::Null),
                Err(e) => Outcome::Failure(e.to_string()),
            },
            Err(message) => Outcome::Failure(message.clone()),
        }
    }
}

pub fn service_with(server: &MockServer, toolchain: StubToolchain) -> SnippetService {
    let assets = AssetClient::new(server.uri(), CONTAINER, Some(5));
    SnippetService::new(Arc::new(assets), Arc::new(toolchain))
}
