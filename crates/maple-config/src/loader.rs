// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./maple.toml` > `~/.config/maple/maple.toml` > `/etc/maple/maple.toml`
//! with environment variable overrides via `MAPLE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MapleConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/maple/maple.toml` (system-wide)
/// 3. `~/.config/maple/maple.toml` (user XDG config)
/// 4. `./maple.toml` (local directory)
/// 5. `MAPLE_*` environment variables
pub fn load_config() -> Result<MapleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MapleConfig::default()))
        .merge(Toml::file("/etc/maple/maple.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("maple/maple.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("maple.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MapleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MapleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MapleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MapleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MAPLE_VAULT_ENCRYPTION_KEY` must map
/// to `vault.encryption_key`, not `vault.encryption.key`.
fn env_provider() -> Env {
    Env::prefixed("MAPLE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("vault_", "vault.", 1)
            .replacen("throttle_", "throttle.", 1);
        mapped.into()
    })
}
