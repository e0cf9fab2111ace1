// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic sweep of stale throttle buckets and expired state tokens.
//!
//! Runs on its own schedule, independent of request handling, and only
//! removes entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::limiter::RateLimiter;
use crate::state::StateTokenStore;

/// Spawns the background sweeper task.
///
/// Each tick prunes every supplied limiter and the state-token store.
/// Dropping the returned handle detaches the task; abort it for a clean
/// shutdown.
pub fn spawn_sweeper(
    limiters: Vec<Arc<RateLimiter>>,
    tokens: Arc<StateTokenStore>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick fires immediately; skip it so a sweep never
        // races process startup.
        interval.tick().await;
        loop {
            interval.tick().await;
            for limiter in &limiters {
                limiter.prune_stale();
            }
            tokens.prune_expired();
            trace!("throttle sweep complete");
        }
    })
}
