// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./budgetto.toml` > `~/.config/budgetto/budgetto.toml` > `/etc/budgetto/budgetto.toml`
//! with environment variable overrides via `BUDGETTO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::BudgettoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/budgetto/budgetto.toml` (system-wide)
/// 3. `~/.config/budgetto/budgetto.toml` (user XDG config)
/// 4. `./budgetto.toml` (local directory)
/// 5. `BUDGETTO_*` environment variables
pub fn load_config() -> Result<BudgettoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<BudgettoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BudgettoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BudgettoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BudgettoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BudgettoConfig::default()))
        .merge(Toml::file("/etc/budgetto/budgetto.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("budgetto/budgetto.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("budgetto.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `BUDGETTO_API_BASE_URL`
/// must map to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("BUDGETTO_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("identity_", "identity.", 1)
            .replacen("ui_", "ui.", 1);
        mapped.into()
    })
}
