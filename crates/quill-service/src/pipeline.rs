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

//! The execution orchestrator. Every operation follows the same skeleton:
//! fetch, stage, (build config), invoke the toolchain, translate, and for
//! format persist the rewritten snippet. Faults raised anywhere along the
//! way are converted into the operation's failure shape at this boundary;
//! nothing propagates to the caller as a raw error. A failed operation is
//! not retried.
//!
//! Concurrent operations against the same snippet id are not serialised
//! here: format is a fetch-then-unconditional-overwrite against the store.

use crate::config;
use crate::driver::TestDriver;
use crate::results;
use crate::staging::{SourceKind, StagedFile};
use crate::toolchain::{DefaultInput, DefaultOutput, SystemEnv, Toolchain};
use quill_asset::AssetStore;
use quill_contracts::{
    ConfigEntry, ExecuteResult, FormatResult, Outcome, ServiceError, ServiceResult, TestCase,
    TestRunResult, TestVerdict, ValidationResult,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Language version applied when a request does not carry one; the
/// analyser, formatter and test runner are pinned to it.
pub const DEFAULT_VERSION: &str = "1.1";

pub struct SnippetService {
    assets: Arc<dyn AssetStore>,
    toolchain: Arc<dyn Toolchain>,
}

impl SnippetService {
    pub fn new(assets: Arc<dyn AssetStore>, toolchain: Arc<dyn Toolchain>) -> Self {
        Self { assets, toolchain }
    }

    pub async fn validate(&self, version: &str, snippet_id: &str) -> ValidationResult {
        match self.validate_inner(version, snippet_id).await {
            Ok(result) => result,
            Err(err) => {
                warn!(snippet_id = snippet_id, error = %err, "Validation did not run");
                ValidationResult::failed(err.to_string())
            }
        }
    }

    async fn validate_inner(
        &self,
        version: &str,
        snippet_id: &str,
    ) -> ServiceResult<ValidationResult> {
        let staged = self.fetch_staged(snippet_id).await?;
        let outcome = self.toolchain.validate(version, staged.path());
        Ok(results::validation_result(outcome))
    }

    pub async fn execute(&self, version: &str, snippet_id: &str) -> ExecuteResult {
        match self.execute_inner(version, snippet_id).await {
            Ok(result) => result,
            Err(err) => {
                warn!(snippet_id = snippet_id, error = %err, "Execution did not run");
                ExecuteResult::failed(err.to_string())
            }
        }
    }

    async fn execute_inner(&self, version: &str, snippet_id: &str) -> ServiceResult<ExecuteResult> {
        let staged = self.fetch_staged(snippet_id).await?;
        let mut input = DefaultInput;
        let mut output = DefaultOutput;
        let outcome =
            self.toolchain
                .interpret(version, staged.path(), &mut input, &mut output, &SystemEnv);
        Ok(results::execute_result(outcome))
    }

    /// Static analysis. A failure anywhere in the pipeline degrades to an
    /// empty diagnostics list with a logged error, unlike the other
    /// operations which populate their error field.
    pub async fn lint(&self, snippet_id: &str, entries: &[ConfigEntry]) -> Vec<String> {
        match self.lint_inner(snippet_id, entries).await {
            Ok(diagnostics) => diagnostics,
            Err(err) => {
                error!(snippet_id = snippet_id, error = %err, "Error linting snippet");
                Vec::new()
            }
        }
    }

    async fn lint_inner(
        &self,
        snippet_id: &str,
        entries: &[ConfigEntry],
    ) -> ServiceResult<Vec<String>> {
        let staged = self.fetch_staged(snippet_id).await?;
        let rules = config::lint_config(entries);
        let transport = config::lint_transport_form(&rules);
        info!(snippet_id = snippet_id, config = %transport, "Linting snippet");
        let staged_config = StagedFile::stage(transport.as_bytes(), SourceKind::Config)?;
        self.toolchain
            .analyse(DEFAULT_VERSION, staged.path(), staged_config.path())
            .map_err(ServiceError::ToolchainFailure)
    }

    pub async fn format(&self, snippet_id: &str, entries: &[ConfigEntry]) -> FormatResult {
        match self.format_inner(snippet_id, entries).await {
            Ok(result) => result,
            Err(err) => {
                error!(snippet_id = snippet_id, error = %err, "Error formatting snippet");
                FormatResult::failed(err.to_string())
            }
        }
    }

    async fn format_inner(
        &self,
        snippet_id: &str,
        entries: &[ConfigEntry],
    ) -> ServiceResult<FormatResult> {
        let staged = self.fetch_staged(snippet_id).await?;
        let rules = config::format_config(entries);
        info!(
            snippet_id = snippet_id,
            config = %config::format_transport_form(&rules),
            "Formatting snippet"
        );
        match self.toolchain.reformat(DEFAULT_VERSION, staged.path(), &rules) {
            Outcome::Success(_) => {
                let rewritten = staged.contents()?;
                self.assets.put_snippet(snippet_id, rewritten).await?;
                info!(snippet_id = snippet_id, "Snippet formatted successfully");
                Ok(FormatResult::ok("Snippet formatted successfully"))
            }
            Outcome::Failure(message) => Err(ServiceError::ToolchainFailure(message)),
        }
    }

    pub async fn run_test(
        &self,
        version: &str,
        snippet_id: &str,
        case: &TestCase,
    ) -> TestRunResult {
        match self.run_test_inner(version, snippet_id, case).await {
            Ok(verdict) => TestRunResult::finished(verdict),
            Err(err) => {
                warn!(snippet_id = snippet_id, error = %err, "Test run did not finish");
                TestRunResult::failed(err.to_string())
            }
        }
    }

    async fn run_test_inner(
        &self,
        version: &str,
        snippet_id: &str,
        case: &TestCase,
    ) -> ServiceResult<TestVerdict> {
        let staged = self.fetch_staged(snippet_id).await?;
        // A fresh driver per run: the input cursor and output accumulator
        // never survive an invocation.
        let mut driver = TestDriver::new(case);
        driver.run(self.toolchain.as_ref(), version, staged.path(), &SystemEnv)
    }

    /// Returns the raw snippet text. Unlike the five pipeline operations
    /// this surfaces faults to the caller, which maps them to a transport
    /// status.
    pub async fn fetch_source(&self, snippet_id: &str) -> ServiceResult<String> {
        let bytes = self.assets.get_snippet(snippet_id).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_staged(&self, snippet_id: &str) -> ServiceResult<StagedFile> {
        let bytes = self.assets.get_snippet(snippet_id).await?;
        StagedFile::stage(&bytes, SourceKind::Source)
    }
}
