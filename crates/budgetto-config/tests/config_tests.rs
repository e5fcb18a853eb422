// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Budgetto configuration system.

use std::io::Write;

use budgetto_config::diagnostic::ConfigError;
use budgetto_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_budgetto_config() {
    let toml = r#"
[api]
base_url = "https://budget.example.com/api"
timeout_secs = 10

[identity]
token = "eyJ0eXAi"
domain = "budgetto.eu.auth0.com"
client_id = "abc123"
audience = "https://budgetto-api"
user_name = "Ada"
user_email = "ada@example.com"
return_to = "https://budget.example.com"

[ui]
log_level = "debug"
color = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://budget.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.identity.token.as_deref(), Some("eyJ0eXAi"));
    assert_eq!(config.identity.domain.as_deref(), Some("budgetto.eu.auth0.com"));
    assert_eq!(config.identity.client_id.as_deref(), Some("abc123"));
    assert_eq!(config.identity.audience.as_deref(), Some("https://budgetto-api"));
    assert_eq!(config.identity.user_name.as_deref(), Some("Ada"));
    assert_eq!(config.identity.user_email.as_deref(), Some("ada@example.com"));
    assert_eq!(config.identity.return_to, "https://budget.example.com");
    assert_eq!(config.ui.log_level, "debug");
    assert!(!config.ui.color);
}

/// Missing sections fall back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_and_validate_str("").expect("empty config is valid");
    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_secs, 30);
    assert!(config.identity.token.is_none());
}

/// Partial sections keep defaults for the keys they omit.
#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[api]\ntimeout_secs = 5\n").unwrap();
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.base_url, "http://localhost:5000/api");
}

/// Unknown field in [api] is rejected with a suggestion.
#[test]
fn unknown_field_in_api_suggests_correction() {
    let errors = load_and_validate_str("[api]\nbase_ulr = \"http://x\"\n")
        .expect_err("should reject unknown field");

    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "base_ulr" && suggestion.as_deref() == Some("base_url")
    )));
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let err = load_config_from_str("[database]\nurl = \"postgres://\"\n")
        .expect_err("should reject unknown section");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("database"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Wrong value types surface as InvalidType diagnostics.
#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[api]\ntimeout_secs = \"soon\"\n")
        .expect_err("string timeout should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { detail, .. } if detail.contains("string")))
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn semantic_errors_are_reported_after_parse() {
    let errors = load_and_validate_str("[api]\nbase_url = \"localhost:5000\"\n")
        .expect_err("scheme-less URL should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("api.base_url"))
    ));
}

/// An explicit config file is read and its typos are still diagnosed.
#[test]
fn explicit_path_is_loaded_and_checked() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[ui]\ncolor = false\n").unwrap();
    let config = load_and_validate_path(file.path()).expect("valid file");
    assert!(!config.ui.color);

    let mut bad = tempfile::NamedTempFile::new().unwrap();
    writeln!(bad, "[ui]\nlog_lvel = \"debug\"\n").unwrap();
    let errors = load_and_validate_path(bad.path()).expect_err("typo should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { suggestion, .. } if suggestion.as_deref() == Some("log_level")
    )));
}
