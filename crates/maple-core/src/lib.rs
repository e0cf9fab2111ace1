// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Maple customer-support assistant.
//!
//! This crate provides the error taxonomy and the shared domain types
//! consumed by the response-generation pipeline. All other workspace
//! crates depend on it.

pub mod error;
pub mod types;

pub use error::MapleError;
pub use types::{
    Conversation, ConversationId, Direction, DraftStatus, GeneratedDraft, KnowledgeEntry,
    Message, MessageClassification, MessageId, OrganizationId, Sentiment, Urgency,
};
