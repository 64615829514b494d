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

/// A single named setting as supplied by callers. Only entries with
/// `is_active` set participate in translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
    pub is_active: bool,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCasing {
    CamelCase,
    SnakeCase,
}

impl From<String> for IdentifierCasing {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "snake case" | "snake_case" => IdentifierCasing::SnakeCase,
            "camel case" | "camelcase" | "camel_case" => IdentifierCasing::CamelCase,
            _ => IdentifierCasing::CamelCase,
        }
    }
}

/// Formatter settings. Every field has a documented default; resolution
/// from a configuration set is total and never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    /// Default: false.
    pub space_before_colon: bool,
    /// Default: true.
    pub space_after_colon: bool,
    /// Default: true.
    pub space_around_assignment: bool,
    /// Blank lines inserted before each `println`. Default: 0.
    pub newline_before_println: u32,
    /// Default: 4.
    pub indent_inside_braces: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            space_before_colon: false,
            space_after_colon: true,
            space_around_assignment: true,
            newline_before_println: 0,
            indent_inside_braces: 4,
        }
    }
}

/// Analyser settings, same resolution rules as [`FormatConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Default: camel case.
    pub identifier_casing: IdentifierCasing,
    /// Restrict `println` arguments to identifiers and literals. Default: false.
    pub restrict_println_expressions: bool,
    /// Restrict `read_input` arguments to identifiers and literals. Default: false.
    pub restrict_read_input_expressions: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            identifier_casing: IdentifierCasing::CamelCase,
            restrict_println_expressions: false,
            restrict_read_input_expressions: false,
        }
    }
}
