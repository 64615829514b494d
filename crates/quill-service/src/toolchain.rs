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

use quill_contracts::{FormatConfig, Outcome};
use std::path::Path;
use tracing::debug;

/// Pull-based input capability: the interpreter calls this each time it
/// needs a value. One call consumes at most one value.
pub trait InputProvider: Send {
    fn read_input(&mut self, prompt: &str) -> Option<String>;
}

/// Push-based output capability: the interpreter calls this for every
/// value it emits.
pub trait OutputSink: Send {
    fn emit(&mut self, value: String);
}

pub trait EnvProvider: Send + Sync {
    fn env(&self, name: &str) -> Option<String>;
}

/// The embedded language toolchain, consumed as a black box. Engines are
/// CPU-bound and synchronous; the pipeline invokes them inline.
///
/// `reformat` rewrites the staged source in place on success; the caller
/// reads the mutated file back for persistence. `analyse` takes its rule
/// set as a staged JSON file, which is the form the analyser consumes.
pub trait Toolchain: Send + Sync {
    fn validate(&self, version: &str, source: &Path) -> Outcome;

    fn interpret(
        &self,
        version: &str,
        source: &Path,
        input: &mut dyn InputProvider,
        output: &mut dyn OutputSink,
        env: &dyn EnvProvider,
    ) -> Outcome;

    fn analyse(&self, version: &str, source: &Path, config: &Path) -> Result<Vec<String>, String>;

    fn reformat(&self, version: &str, source: &Path, config: &FormatConfig) -> Outcome;
}

/// Input provider for plain execution: no scripted values are available.
#[derive(Debug, Default)]
pub struct DefaultInput;

impl InputProvider for DefaultInput {
    fn read_input(&mut self, _prompt: &str) -> Option<String> {
        None
    }
}

/// Output sink for plain execution: emitted values go to the log.
#[derive(Debug, Default)]
pub struct DefaultOutput;

impl OutputSink for DefaultOutput {
    fn emit(&mut self, value: String) {
        debug!(value = %value, "Interpreter output");
    }
}

/// Environment capability backed by the process environment.
#[derive(Debug, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
