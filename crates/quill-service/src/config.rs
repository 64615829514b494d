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

//! Translation between loosely-typed configuration sets and the typed
//! formatter/analyser records. Resolution is pure and total: a missing or
//! unparsable entry falls back to the field default, never to an error.
//! When two active entries share a name, the last declared wins.

use quill_contracts::{ConfigEntry, FormatConfig, IdentifierCasing, LintConfig};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

fn active_lookup(entries: &[ConfigEntry]) -> HashMap<&str, &str> {
    let mut lookup = HashMap::new();
    for entry in entries.iter().filter(|e| e.is_active) {
        lookup.insert(entry.name.as_str(), entry.value.as_str());
    }
    lookup
}

fn setting<T: FromStr>(lookup: &HashMap<&str, &str>, name: &str, default: T) -> T {
    lookup
        .get(name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

pub fn format_config(entries: &[ConfigEntry]) -> FormatConfig {
    let lookup = active_lookup(entries);
    let defaults = FormatConfig::default();
    FormatConfig {
        space_before_colon: setting(&lookup, "spaceBeforeColon", defaults.space_before_colon),
        space_after_colon: setting(&lookup, "spaceAfterColon", defaults.space_after_colon),
        space_around_assignment: setting(
            &lookup,
            "spaceAroundAssignment",
            defaults.space_around_assignment,
        ),
        newline_before_println: setting(
            &lookup,
            "newlineBeforePrintln",
            defaults.newline_before_println,
        ),
        indent_inside_braces: setting(&lookup, "indentInsideBraces", defaults.indent_inside_braces),
    }
}

pub fn lint_config(entries: &[ConfigEntry]) -> LintConfig {
    let lookup = active_lookup(entries);
    let defaults = LintConfig::default();
    LintConfig {
        identifier_casing: lookup
            .get("identifierCasing")
            .map(|value| IdentifierCasing::from((*value).to_string()))
            .unwrap_or(defaults.identifier_casing),
        restrict_println_expressions: setting(
            &lookup,
            "restrictPrintlnExpressions",
            defaults.restrict_println_expressions,
        ),
        restrict_read_input_expressions: setting(
            &lookup,
            "restrictReadInputExpressions",
            defaults.restrict_read_input_expressions,
        ),
    }
}

fn casing_value(casing: IdentifierCasing) -> &'static str {
    match casing {
        IdentifierCasing::CamelCase => "camel case",
        IdentifierCasing::SnakeCase => "snake case",
    }
}

/// Deterministic serialization of a formatter configuration: keys are
/// sorted, values are the string renderings the translator parses back.
pub fn format_transport_form(config: &FormatConfig) -> String {
    let mut fields = BTreeMap::new();
    fields.insert("spaceBeforeColon", config.space_before_colon.to_string());
    fields.insert("spaceAfterColon", config.space_after_colon.to_string());
    fields.insert(
        "spaceAroundAssignment",
        config.space_around_assignment.to_string(),
    );
    fields.insert(
        "newlineBeforePrintln",
        config.newline_before_println.to_string(),
    );
    fields.insert(
        "indentInsideBraces",
        config.indent_inside_braces.to_string(),
    );
    serde_json::to_string(&fields).unwrap_or_else(|_| "{}".to_string())
}

/// Deterministic serialization of an analyser configuration; same
/// guarantees as [`format_transport_form`].
pub fn lint_transport_form(config: &LintConfig) -> String {
    let mut fields = BTreeMap::new();
    fields.insert(
        "identifierCasing",
        casing_value(config.identifier_casing).to_string(),
    );
    fields.insert(
        "restrictPrintlnExpressions",
        config.restrict_println_expressions.to_string(),
    );
    fields.insert(
        "restrictReadInputExpressions",
        config.restrict_read_input_expressions.to_string(),
    );
    serde_json::to_string(&fields).unwrap_or_else(|_| "{}".to_string())
}

/// Inverse of the transport form: a flat JSON object becomes a set of
/// active entries. Used for persistence and debugging round trips.
pub fn entries_from_transport(json: &str) -> Vec<ConfigEntry> {
    let parsed: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(json).unwrap_or_default();
    parsed
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            ConfigEntry::new(name, value, true)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_active_entries_yields_defaults() {
        let entries = vec![
            ConfigEntry::new("spaceBeforeColon", "true", false),
            ConfigEntry::new("indentInsideBraces", "8", false),
            ConfigEntry::new("identifierCasing", "snake case", false),
        ];
        assert_eq!(format_config(&entries), FormatConfig::default());
        assert_eq!(lint_config(&entries), LintConfig::default());
    }

    #[test]
    fn inactive_entries_never_influence_translation() {
        let entries = vec![
            ConfigEntry::new("spaceBeforeColon", "true", true),
            ConfigEntry::new("spaceAfterColon", "false", false),
        ];
        let config = format_config(&entries);
        assert!(config.space_before_colon);
        assert!(config.space_after_colon, "inactive entry leaked through");
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        let entries = vec![
            ConfigEntry::new("spaceBeforeColon", "yes please", true),
            ConfigEntry::new("indentInsideBraces", "wide", true),
        ];
        assert_eq!(format_config(&entries), FormatConfig::default());
    }

    #[test]
    fn duplicate_active_names_last_declared_wins() {
        let entries = vec![
            ConfigEntry::new("indentInsideBraces", "2", true),
            ConfigEntry::new("indentInsideBraces", "8", true),
        ];
        assert_eq!(format_config(&entries).indent_inside_braces, 8);
    }

    #[test]
    fn translation_is_idempotent_through_transport_form() {
        let entries = vec![
            ConfigEntry::new("spaceBeforeColon", "true", true),
            ConfigEntry::new("newlineBeforePrintln", "2", true),
        ];
        let config = format_config(&entries);
        let round_tripped = format_config(&entries_from_transport(&format_transport_form(&config)));
        assert_eq!(config, round_tripped);

        let lint = lint_config(&[ConfigEntry::new("identifierCasing", "snake case", true)]);
        let round_tripped = lint_config(&entries_from_transport(&lint_transport_form(&lint)));
        assert_eq!(lint, round_tripped);
    }

    #[test]
    fn transport_form_is_deterministic() {
        let config = FormatConfig::default();
        assert_eq!(format_transport_form(&config), format_transport_form(&config));
        // Keys come out sorted regardless of declaration order.
        assert!(
            format_transport_form(&config).starts_with("{\"indentInsideBraces\""),
            "unexpected key order: {}",
            format_transport_form(&config)
        );
    }

    #[test]
    fn casing_falls_back_on_unknown_value() {
        let lint = lint_config(&[ConfigEntry::new("identifierCasing", "kebab case", true)]);
        assert_eq!(lint.identifier_casing, IdentifierCasing::CamelCase);
    }
}
