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

use crate::types::TestVerdict;
use serde::{Deserialize, Serialize};

// Each result record holds at most one of its two fields. The pipeline
// only builds them through the constructors below; the both-empty shape
// is reserved as an internal-error sentinel.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            message: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResult {
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ExecuteResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            output: None,
            error: Some(error.into()),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            output: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResult {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl FormatResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunResult {
    pub verdict: Option<TestVerdict>,
    pub error: Option<String>,
}

impl TestRunResult {
    pub fn finished(verdict: TestVerdict) -> Self {
        Self {
            verdict: Some(verdict),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            verdict: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_constructors_are_mutually_exclusive() {
        let ok = ValidationResult::ok("valid");
        assert!(ok.message.is_some() && ok.error.is_none());

        let failed = ValidationResult::failed("boom");
        assert!(failed.message.is_none() && failed.error.is_some());
    }

    #[test]
    fn execute_constructors_are_mutually_exclusive() {
        let ok = ExecuteResult::ok("5");
        assert!(ok.output.is_some() && ok.error.is_none());

        let failed = ExecuteResult::failed("boom");
        assert!(failed.output.is_none() && failed.error.is_some());
    }

    #[test]
    fn internal_error_sentinel_is_both_empty() {
        let sentinel = ExecuteResult::internal_error();
        assert!(sentinel.output.is_none() && sentinel.error.is_none());
    }

    #[test]
    fn test_run_result_carries_verdict_or_error() {
        let finished = TestRunResult::finished(TestVerdict::Success);
        assert!(finished.verdict.is_some() && finished.error.is_none());

        let failed = TestRunResult::failed("interpreter exploded");
        assert!(failed.verdict.is_none() && failed.error.is_some());
    }
}
