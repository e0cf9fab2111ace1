// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request throttling for the Maple pipeline.
//!
//! A sliding-window [`RateLimiter`] gates every externally triggered
//! operation, keyed by user id or client address. [`StateTokenStore`]
//! issues the single-use tokens the provider-connect flow round-trips.
//! Both are instance-owned (no module-level singletons) so tests and
//! profiles stay isolated; a background [`sweep`] keeps them bounded.

pub mod limiter;
pub mod state;
pub mod sweep;

pub use limiter::{RateLimiter, ThrottleDecision, throttle_token};
pub use state::StateTokenStore;
pub use sweep::spawn_sweeper;
