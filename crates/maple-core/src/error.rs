// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Maple response pipeline.

use thiserror::Error;

/// The primary error type used across all Maple pipeline crates.
///
/// The taxonomy maps onto caller-facing semantics: `NotFound` and
/// `Validation` are terminal caller mistakes, `Generation` marks a draft
/// as failed, `Integrity` covers credential decryption, and
/// `ThrottleExceeded` tells the caller to back off.
#[derive(Debug, Error)]
pub enum MapleError {
    /// A referenced conversation or message does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed caller input (bad identifiers, out-of-range fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// The hosted model call failed or returned unusable content.
    /// Surfaced as a failed draft lifecycle state, never retried silently.
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential encryption or decryption failed. The message never
    /// contains plaintext or key material.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// The sliding-window throttle rejected the request.
    #[error("throttle exceeded for token {token}")]
    ThrottleExceeded { token: String },

    /// Configuration errors (missing key, invalid TOML, bad field values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A provider call exceeded its configured deadline.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// A draft lifecycle state was asked to move backwards.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MapleError {
    /// Shorthand for a generation error without an underlying source.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
            source: None,
        }
    }
}
