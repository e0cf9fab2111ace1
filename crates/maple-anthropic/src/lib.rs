// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API client for the Maple pipeline.
//!
//! Non-streaming text completion only, with a single attempt per call
//! and an explicit per-request deadline.

pub mod client;
pub mod types;

pub use client::AnthropicClient;
pub use types::{ApiMessage, MessageRequest, MessageResponse, ResponseContentBlock};
