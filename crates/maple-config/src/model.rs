// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process configuration model for the Maple pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Maple configuration.
///
/// Loaded from TOML files with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MapleConfig {
    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Credential vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Request throttle settings.
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires an environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for drafting, analysis, and classification.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate for a draft reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Hard deadline for a single provider call, in seconds.
    /// Expiry surfaces as a timeout and the draft is recorded as failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Credential vault configuration.
///
/// The key protects mailbox credentials at rest and must be exactly
/// 32 bytes. The vault refuses to start without it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// 256-bit encryption key as a 32-byte string. `None` is fatal at
    /// vault construction, before any traffic is accepted.
    #[serde(default)]
    pub encryption_key: Option<String>,
}

/// Request throttle configuration.
///
/// Two named profiles: `api` for general traffic and `auth` for
/// authentication-sensitive endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ThrottleConfig {
    /// General API window length in seconds.
    #[serde(default = "default_api_window_secs")]
    pub api_window_secs: u64,

    /// Maximum requests per token within the general API window.
    #[serde(default = "default_api_ceiling")]
    pub api_ceiling: usize,

    /// Auth-sensitive window length in seconds.
    #[serde(default = "default_auth_window_secs")]
    pub auth_window_secs: u64,

    /// Maximum requests per token within the auth window.
    #[serde(default = "default_auth_ceiling")]
    pub auth_ceiling: usize,

    /// Interval between background sweeps of stale throttle buckets
    /// and expired state tokens, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Lifetime of a single-use state token, in seconds.
    #[serde(default = "default_state_token_ttl_secs")]
    pub state_token_ttl_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            api_window_secs: default_api_window_secs(),
            api_ceiling: default_api_ceiling(),
            auth_window_secs: default_auth_window_secs(),
            auth_ceiling: default_auth_ceiling(),
            sweep_interval_secs: default_sweep_interval_secs(),
            state_token_ttl_secs: default_state_token_ttl_secs(),
        }
    }
}

fn default_api_window_secs() -> u64 {
    15 * 60
}

fn default_api_ceiling() -> usize {
    100
}

fn default_auth_window_secs() -> u64 {
    60
}

fn default_auth_ceiling() -> usize {
    5
}

fn default_sweep_interval_secs() -> u64 {
    5 * 60
}

fn default_state_token_ttl_secs() -> u64 {
    10 * 60
}
