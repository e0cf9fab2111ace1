// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sliding-window admission control keyed by an opaque token.
//!
//! State is process-local and owned by the limiter instance, so tests
//! (and separate profiles) run against isolated instances. Per-token
//! read-modify-write is serialized by the map's entry lock; contention
//! is bounded by the number of distinct concurrent tokens.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use maple_config::ThrottleConfig;
use maple_core::MapleError;
use tracing::debug;

/// Result of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleDecision {
    /// Whether the request was admitted.
    pub allowed: bool,
    /// Admissions left in the current window after this check.
    pub remaining: usize,
}

/// A sliding-window rate limiter.
///
/// Maintains, per token, the timestamps of admitted requests within the
/// trailing window. No persistence across restarts: the limiter is a
/// denial-of-abuse backstop, not a billing meter.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    ceiling: usize,
    buckets: DashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter admitting at most `ceiling` requests per token
    /// within any trailing `window`.
    pub fn new(window: Duration, ceiling: usize) -> Self {
        Self {
            window,
            ceiling,
            buckets: DashMap::new(),
        }
    }

    /// The permissive profile for general API traffic (100 req / 15 min
    /// by default).
    pub fn api(config: &ThrottleConfig) -> Self {
        Self::new(
            Duration::from_secs(config.api_window_secs),
            config.api_ceiling,
        )
    }

    /// The strict profile for authentication-sensitive endpoints
    /// (5 req / min by default).
    pub fn auth(config: &ThrottleConfig) -> Self {
        Self::new(
            Duration::from_secs(config.auth_window_secs),
            config.auth_ceiling,
        )
    }

    /// Checks and records a request for `token`.
    pub fn check(&self, token: &str) -> ThrottleDecision {
        self.check_at(token, Instant::now())
    }

    /// Like [`check`](Self::check) but against a supplied clock reading.
    pub fn check_at(&self, token: &str, now: Instant) -> ThrottleDecision {
        let mut bucket = self.buckets.entry(token.to_string()).or_default();

        // Discard timestamps that have slid out of the window.
        bucket.retain(|ts| now.duration_since(*ts) < self.window);

        if bucket.len() >= self.ceiling {
            debug!(token, "throttle ceiling reached");
            return ThrottleDecision {
                allowed: false,
                remaining: 0,
            };
        }

        bucket.push(now);
        ThrottleDecision {
            allowed: true,
            remaining: self.ceiling - bucket.len(),
        }
    }

    /// Checks `token` and returns the remaining budget, or
    /// `ThrottleExceeded` when the ceiling is reached.
    pub fn enforce(&self, token: &str) -> Result<usize, MapleError> {
        let decision = self.check(token);
        if decision.allowed {
            Ok(decision.remaining)
        } else {
            Err(MapleError::ThrottleExceeded {
                token: token.to_string(),
            })
        }
    }

    /// Removes buckets whose every timestamp has left the window.
    ///
    /// Called by the background sweeper; only removes entries and never
    /// blocks `check` callers beyond the per-entry lock.
    pub fn prune_stale(&self) {
        let now = Instant::now();
        self.buckets
            .retain(|_, bucket| bucket.iter().any(|ts| now.duration_since(*ts) < self.window));
    }

    /// Number of tracked tokens (for sweeper diagnostics).
    pub fn tracked_tokens(&self) -> usize {
        self.buckets.len()
    }
}

/// Derives the throttle token for a request: the authenticated user id
/// when available, else the client network address.
pub fn throttle_token(user_id: Option<&str>, remote_addr: &str) -> String {
    match user_id {
        Some(id) => format!("user:{id}"),
        None => format!("ip:{remote_addr}"),
    }
}
