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

//! Pure translation from toolchain outcomes to the stable result records.
//! No I/O happens here.

use quill_contracts::{ExecuteResult, Outcome, ValidationResult};
use serde_json::Value;

/// Type-specific stringification of an interpreter value: strings render
/// without quotes, everything else in its compact JSON form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn validation_result(outcome: Outcome) -> ValidationResult {
    match outcome {
        Outcome::Success(value) => ValidationResult::ok(render_value(&value)),
        Outcome::Failure(message) => ValidationResult::failed(message),
    }
}

pub fn execute_result(outcome: Outcome) -> ExecuteResult {
    match outcome {
        Outcome::Success(value) => ExecuteResult::ok(render_value(&value)),
        Outcome::Failure(message) => ExecuteResult::failed(message),
    }
}
