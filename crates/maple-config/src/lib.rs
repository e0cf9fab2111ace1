// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Maple pipeline.
//!
//! Two kinds of configuration live here:
//! - [`model`]: process configuration (provider credentials, vault key,
//!   throttle profiles), loaded from TOML with env overrides.
//! - [`org`]: per-organization settings (brand voice, auto-send policy),
//!   supplied by the external persistence layer and validated on entry.

pub mod loader;
pub mod model;
pub mod org;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AnthropicConfig, MapleConfig, ThrottleConfig, VaultConfig};
pub use org::{AutoSendPolicy, OrganizationSettings, SentimentFilter, WorkingHours};
