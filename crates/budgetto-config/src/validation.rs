// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, positive timeouts, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::BudgettoConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &BudgettoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else {
        let host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"));
        match host {
            None => errors.push(ConfigError::Validation {
                message: format!("api.base_url `{base_url}` must start with http:// or https://"),
            }),
            Some(rest) if rest.split('/').next().is_none_or(str::is_empty) => {
                errors.push(ConfigError::Validation {
                    message: format!("api.base_url `{base_url}` has no host"),
                });
            }
            Some(_) => {}
        }
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(token) = &config.identity.token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "identity.token must not be blank when set".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.ui.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "ui.log_level `{}` is not one of {}",
                config.ui.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
