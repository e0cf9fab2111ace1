// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-use state tokens for the provider-connect flow.
//!
//! A token is issued when an organization starts connecting a mailbox
//! provider and must come back exactly once, within its TTL. Expired
//! tokens are removed by the background sweeper.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::debug;

/// Issuer and validator of single-use state tokens.
///
/// Instance-owned state; construct one per process and share it behind
/// an `Arc`.
#[derive(Debug)]
pub struct StateTokenStore {
    ttl: Duration,
    issued: DashMap<String, Instant>,
}

impl StateTokenStore {
    /// Creates a store whose tokens expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: DashMap::new(),
        }
    }

    /// Issues a fresh random token (16 bytes, hex-encoded).
    pub fn issue(&self) -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.issued.insert(token.clone(), Instant::now());
        token
    }

    /// Consumes a token. Returns true only for a known, unexpired token,
    /// and removes it so a replay fails.
    pub fn consume(&self, token: &str) -> bool {
        match self.issued.remove(token) {
            Some((_, issued_at)) => issued_at.elapsed() < self.ttl,
            None => false,
        }
    }

    /// Removes expired tokens. Called by the background sweeper.
    pub fn prune_expired(&self) {
        let before = self.issued.len();
        self.issued.retain(|_, issued_at| issued_at.elapsed() < self.ttl);
        // issue() may run concurrently, so the count can grow between
        // the two reads.
        let removed = before.saturating_sub(self.issued.len());
        if removed > 0 {
            debug!(removed, "expired state tokens pruned");
        }
    }

    /// Number of outstanding tokens.
    pub fn outstanding(&self) -> usize {
        self.issued.len()
    }
}
