// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Budgetto client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Budgetto configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BudgettoConfig {
    /// Category REST API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Identity provider settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Terminal front-end settings.
    #[serde(default)]
    pub ui: UiConfig,
}

impl BudgettoConfig {
    /// Renders the configuration as TOML with the bearer token masked.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let mut redacted = self.clone();
        if redacted.identity.token.is_some() {
            redacted.identity.token = Some("[REDACTED]".to_string());
        }
        toml::to_string_pretty(&redacted)
    }
}

/// Category REST API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL that `v1/categories` paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Identity provider configuration.
///
/// The client does not run the login protocol. `token` is the bearer token
/// handed to the API; the tenant fields are informational and shown by
/// `budgetto config`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Bearer token. `None` leaves the session unauthenticated.
    #[serde(default)]
    pub token: Option<String>,

    /// Identity tenant domain.
    #[serde(default)]
    pub domain: Option<String>,

    /// OAuth client identifier registered with the tenant.
    #[serde(default)]
    pub client_id: Option<String>,

    /// API audience the token is issued for.
    #[serde(default)]
    pub audience: Option<String>,

    /// Display name reported for the signed-in user.
    #[serde(default)]
    pub user_name: Option<String>,

    /// Email reported for the signed-in user.
    #[serde(default)]
    pub user_email: Option<String>,

    /// Where the provider should send the user after logout.
    #[serde(default = "default_return_to")]
    pub return_to: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token: None,
            domain: None,
            client_id: None,
            audience: None,
            user_name: None,
            user_email: None,
            return_to: default_return_to(),
        }
    }
}

fn default_return_to() -> String {
    "http://localhost:5173".to_string()
}

/// Terminal front-end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colorize shell output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            color: default_color(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_color() -> bool {
    true
}
