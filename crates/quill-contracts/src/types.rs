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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Outcome of a single toolchain invocation. Exactly one variant exists
/// per invocation; there is no third state.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestVerdict {
    Pending,
    Success,
    Fail,
}

/// A scripted test: ordered inputs fed to the interpreter and the set of
/// outputs accepted as a passing result. Built per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub output: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TestVerdict>,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),

    // Declared for completeness; config translation degrades to
    // defaults instead of raising this.
    #[error("Malformed configuration: {0}")]
    MalformedConfig(String),

    #[error("Staging failure: {0}")]
    Staging(String),

    #[error("Toolchain failure: {0}")]
    ToolchainFailure(String),

    #[error("Toolchain returned no outcome")]
    UnexpectedOutcome,
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Staging(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
