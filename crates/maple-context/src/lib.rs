// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for the Maple draft generator.
//!
//! Turns a conversation's stored message history plus an organization's
//! active knowledge entries into model-ready input: a two-role
//! transcript and rendered `Q:`/`A:` snippets. Pure and side-effect
//! free; the caller supplies already-loaded records.

use maple_core::{Conversation, Direction, KnowledgeEntry, MapleError, MessageId};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

/// Default cap on knowledge entries included as context.
pub const DEFAULT_KNOWLEDGE_CAP: usize = 5;

/// Role of a transcript turn as presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TranscriptRole {
    /// Inbound customer messages.
    User,
    /// Outbound replies from the organization.
    Assistant,
}

impl From<Direction> for TranscriptRole {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Inbound => Self::User,
            Direction::Outbound => Self::Assistant,
        }
    }
}

/// One turn of the conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: TranscriptRole,
    pub content: String,
}

/// Model-ready input assembled from stored records.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// Prior messages, oldest first, mapped to user/assistant roles.
    pub transcript: Vec<TranscriptTurn>,
    /// Rendered `Q: ...\nA: ...` knowledge snippets, at most the cap.
    pub knowledge_snippets: Vec<String>,
    /// Body of the target inbound message.
    pub customer_message: String,
}

/// Assembles model context from a conversation and knowledge entries.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    knowledge_cap: usize,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self {
            knowledge_cap: DEFAULT_KNOWLEDGE_CAP,
        }
    }

    /// Overrides the knowledge-entry cap.
    pub fn with_knowledge_cap(knowledge_cap: usize) -> Self {
        Self { knowledge_cap }
    }

    /// Assembles context for replying to `target` within `conversation`.
    ///
    /// History is every message strictly earlier than the target; later
    /// messages are irrelevant to the reply. Knowledge selection takes
    /// active entries for the owning organization up to the cap, in
    /// stored order -- there is no semantic ranking.
    pub fn assemble(
        &self,
        conversation: &Conversation,
        target: MessageId,
        knowledge: &[KnowledgeEntry],
    ) -> Result<AssembledContext, MapleError> {
        let target_message = conversation.message(target).ok_or_else(|| {
            MapleError::NotFound(format!(
                "message {target} in conversation {}",
                conversation.id
            ))
        })?;

        let transcript: Vec<TranscriptTurn> = conversation
            .messages
            .iter()
            .filter(|m| m.created_at < target_message.created_at)
            .map(|m| TranscriptTurn {
                role: m.direction.into(),
                content: m.body.clone(),
            })
            .collect();

        let knowledge_snippets: Vec<String> = knowledge
            .iter()
            .filter(|entry| entry.is_active && entry.organization_id == conversation.organization_id)
            .take(self.knowledge_cap)
            .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
            .collect();

        debug!(
            conversation = %conversation.id,
            history_turns = transcript.len(),
            knowledge_snippets = knowledge_snippets.len(),
            "context assembled"
        );

        Ok(AssembledContext {
            transcript,
            knowledge_snippets,
            customer_message: target_message.body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use maple_core::{ConversationId, Message, OrganizationId};
    use uuid::Uuid;

    fn org() -> OrganizationId {
        OrganizationId(Uuid::new_v4())
    }

    fn conversation_with_bodies(bodies: &[(&str, Direction)]) -> (Conversation, Vec<MessageId>) {
        let conv_id = ConversationId(Uuid::new_v4());
        let base = Utc::now();
        let mut ids = Vec::new();
        let messages = bodies
            .iter()
            .enumerate()
            .map(|(i, (body, direction))| {
                let id = MessageId(Uuid::new_v4());
                ids.push(id);
                Message {
                    id,
                    conversation_id: conv_id,
                    direction: *direction,
                    body: body.to_string(),
                    created_at: base + Duration::seconds(i as i64),
                }
            })
            .collect();
        (
            Conversation {
                id: conv_id,
                organization_id: org(),
                customer_email: "customer@example.com".into(),
                customer_name: Some("Jo".into()),
                subject: Some("Shipping".into()),
                messages,
            },
            ids,
        )
    }

    fn entry(org_id: OrganizationId, q: &str, a: &str, active: bool) -> KnowledgeEntry {
        KnowledgeEntry {
            id: Uuid::new_v4(),
            organization_id: org_id,
            question: q.into(),
            answer: a.into(),
            is_active: active,
        }
    }

    #[test]
    fn history_is_prior_messages_with_mapped_roles() {
        let (conv, ids) = conversation_with_bodies(&[
            ("Where is my order?", Direction::Inbound),
            ("It shipped yesterday.", Direction::Outbound),
            ("Still nothing. Tracking?", Direction::Inbound),
        ]);

        let ctx = ContextAssembler::new()
            .assemble(&conv, ids[2], &[])
            .unwrap();

        assert_eq!(ctx.transcript.len(), 2);
        assert_eq!(ctx.transcript[0].role, TranscriptRole::User);
        assert_eq!(ctx.transcript[0].content, "Where is my order?");
        assert_eq!(ctx.transcript[1].role, TranscriptRole::Assistant);
        assert_eq!(ctx.customer_message, "Still nothing. Tracking?");
    }

    #[test]
    fn messages_after_target_are_ignored() {
        let (conv, ids) = conversation_with_bodies(&[
            ("First question", Direction::Inbound),
            ("Answer", Direction::Outbound),
            ("Later follow-up", Direction::Inbound),
        ]);

        let ctx = ContextAssembler::new()
            .assemble(&conv, ids[0], &[])
            .unwrap();

        assert!(ctx.transcript.is_empty());
        assert_eq!(ctx.customer_message, "First question");
    }

    #[test]
    fn missing_target_message_is_not_found() {
        let (conv, _) = conversation_with_bodies(&[("Hi", Direction::Inbound)]);
        let err = ContextAssembler::new()
            .assemble(&conv, MessageId(Uuid::new_v4()), &[])
            .unwrap_err();
        assert!(matches!(err, MapleError::NotFound(_)));
    }

    #[test]
    fn knowledge_is_capped_at_five_by_default() {
        let (conv, ids) = conversation_with_bodies(&[("Q", Direction::Inbound)]);
        let entries: Vec<KnowledgeEntry> = (0..8)
            .map(|i| entry(conv.organization_id, &format!("q{i}"), "a", true))
            .collect();

        let ctx = ContextAssembler::new()
            .assemble(&conv, ids[0], &entries)
            .unwrap();
        assert_eq!(ctx.knowledge_snippets.len(), 5);
    }

    #[test]
    fn inactive_and_foreign_entries_are_excluded() {
        let (conv, ids) = conversation_with_bodies(&[("Q", Direction::Inbound)]);
        let entries = vec![
            entry(conv.organization_id, "active", "yes", true),
            entry(conv.organization_id, "inactive", "no", false),
            entry(org(), "other org", "no", true),
        ];

        let ctx = ContextAssembler::new()
            .assemble(&conv, ids[0], &entries)
            .unwrap();
        assert_eq!(ctx.knowledge_snippets.len(), 1);
        assert_eq!(ctx.knowledge_snippets[0], "Q: active\nA: yes");
    }

    #[test]
    fn snippets_render_as_q_a_pairs() {
        let (conv, ids) = conversation_with_bodies(&[("Q", Direction::Inbound)]);
        let entries = vec![entry(
            conv.organization_id,
            "What is your return policy?",
            "30 days, no questions asked.",
            true,
        )];

        let ctx = ContextAssembler::new()
            .assemble(&conv, ids[0], &entries)
            .unwrap();
        assert_eq!(
            ctx.knowledge_snippets[0],
            "Q: What is your return policy?\nA: 30 days, no questions asked."
        );
    }
}
