// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared domain types for the Maple response pipeline.
//!
//! These are the already-loaded records the core consumes (conversations,
//! messages, knowledge entries) and the transient records it produces
//! (drafts, classifications). Persistence is an external collaborator;
//! nothing here touches storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::MapleError;

/// Unique identifier for a conversation (email thread).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub Uuid);

/// Unique identifier for a message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

/// Unique identifier for an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub Uuid);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a message was received from the customer or sent by the org.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// A single stored email message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub direction: Direction,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// An email thread with its ordered message history, as handed to the
/// core by the external persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub organization_id: OrganizationId,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub subject: Option<String>,
    /// Messages ordered by `created_at` ascending.
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Looks up a message by id within this conversation.
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}

/// A stored Q/A pair from an organization's knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub question: String,
    pub answer: String,
    pub is_active: bool,
}

/// Sentiment classification of an inbound customer message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Urgency classification of an inbound customer message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Model-extracted classification of the triggering customer message.
///
/// The auto-send policy engine consumes `sentiment` and `category`;
/// `intent` and `urgency` are carried for the reviewing human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageClassification {
    pub intent: String,
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    pub category: Option<String>,
}

impl Default for MessageClassification {
    fn default() -> Self {
        Self {
            intent: "General inquiry".to_string(),
            sentiment: Sentiment::Neutral,
            urgency: Urgency::Medium,
            category: None,
        }
    }
}

/// A generated candidate reply with its trust analysis.
///
/// Persisted by the external caller; `reasoning` is analyzer-internal
/// and not required to survive persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDraft {
    pub response: String,
    /// Trust score, always within `0..=100`.
    pub confidence: u8,
    /// Free-form tone label (`professional`, `friendly`, `empathetic`, ...).
    pub tone: String,
    pub used_knowledge_base: bool,
    pub reasoning: String,
}

/// Lifecycle state of a generated draft.
///
/// States only advance forward; `Sent` and `Failed` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DraftStatus {
    Pending,
    Processing,
    Ready,
    Sent,
    Failed,
}

impl DraftStatus {
    /// True for states that admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Sent | Self::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Ready => 2,
            Self::Sent | Self::Failed => 3,
        }
    }

    /// Advances to `next`, rejecting regressions and transitions out of
    /// terminal states.
    pub fn advance(self, next: DraftStatus) -> Result<DraftStatus, MapleError> {
        if self.is_terminal() || next.rank() <= self.rank() {
            return Err(MapleError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            });
        }
        Ok(next)
    }
}
