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

use crate::results::render_value;
use crate::toolchain::{EnvProvider, InputProvider, OutputSink, Toolchain};
use quill_contracts::{Outcome, ServiceError, ServiceResult, TestCase, TestVerdict};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Feeds a fixed input sequence to the interpreter strictly in order.
/// Each read consumes exactly one value; exhaustion yields `None`, and
/// surfacing that as an error is the toolchain's job, not the driver's.
#[derive(Debug)]
pub struct ScriptedInput {
    inputs: Vec<String>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<String>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput {
    fn read_input(&mut self, _prompt: &str) -> Option<String> {
        let value = self.inputs.get(self.cursor).cloned();
        if value.is_some() {
            self.cursor += 1;
        }
        value
    }
}

/// Accumulates every emitted value in emission order.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    values: Vec<String>,
}

impl CapturedOutput {
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl OutputSink for CapturedOutput {
    fn emit(&mut self, value: String) {
        self.values.push(value);
    }
}

/// How the produced result is compared against the expected outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// The final interpreter value must be a member of the expected set.
    #[default]
    FinalValue,
    /// The captured output sequence must match the expected outputs with
    /// set semantics (order-free).
    FullOutput,
}

/// One scripted test run. Instantiated fresh per run: the input cursor
/// and output accumulator never survive an invocation.
#[derive(Debug)]
pub struct TestDriver {
    input: ScriptedInput,
    output: CapturedOutput,
    expected: Vec<String>,
    comparison: Comparison,
}

impl TestDriver {
    pub fn new(case: &TestCase) -> Self {
        Self::with_comparison(case, Comparison::default())
    }

    pub fn with_comparison(case: &TestCase, comparison: Comparison) -> Self {
        Self {
            input: ScriptedInput::new(case.input.clone()),
            output: CapturedOutput::default(),
            expected: case.output.clone(),
            comparison,
        }
    }

    /// Drives the interpreter over the staged source and computes the
    /// verdict. A toolchain failure short-circuits: no verdict exists.
    pub fn run(
        &mut self,
        toolchain: &dyn Toolchain,
        version: &str,
        source: &Path,
        env: &dyn EnvProvider,
    ) -> ServiceResult<TestVerdict> {
        match toolchain.interpret(version, source, &mut self.input, &mut self.output, env) {
            Outcome::Success(value) => {
                let verdict = self.verdict(&value);
                debug!(
                    final_value = %render_value(&value),
                    captured = self.output.values().len(),
                    verdict = ?verdict,
                    "Test run complete"
                );
                Ok(verdict)
            }
            Outcome::Failure(message) => Err(ServiceError::ToolchainFailure(message)),
        }
    }

    pub fn captured(&self) -> &[String] {
        self.output.values()
    }

    fn verdict(&self, value: &serde_json::Value) -> TestVerdict {
        let matched = match self.comparison {
            Comparison::FinalValue => {
                let rendered = render_value(value);
                self.expected.iter().any(|expected| *expected == rendered)
            }
            Comparison::FullOutput => {
                let expected: HashSet<&str> = self.expected.iter().map(String::as_str).collect();
                let actual: HashSet<&str> =
                    self.output.values().iter().map(String::as_str).collect();
                expected == actual
            }
        };
        if matched {
            TestVerdict::Success
        } else {
            TestVerdict::Fail
        }
    }
}
