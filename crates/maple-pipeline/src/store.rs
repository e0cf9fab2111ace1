// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence seams for the response pipeline.
//!
//! The pipeline never touches a database. The outer request handler
//! implements these traits over whatever store it owns and injects
//! them at construction time.

use async_trait::async_trait;
use chrono::NaiveDate;
use maple_config::OrganizationSettings;
use maple_core::{Conversation, ConversationId, KnowledgeEntry, MapleError, OrganizationId};

/// Read access to conversations, knowledge entries, and org settings.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads a conversation with its full message history.
    async fn conversation(&self, id: ConversationId) -> Result<Conversation, MapleError>;

    /// Loads the knowledge entries for an organization. The assembler
    /// filters for active entries and applies the cap.
    async fn knowledge_entries(
        &self,
        org: OrganizationId,
    ) -> Result<Vec<KnowledgeEntry>, MapleError>;

    /// Loads the organization's brand voice and auto-send policy.
    async fn organization_settings(
        &self,
        org: OrganizationId,
    ) -> Result<OrganizationSettings, MapleError>;
}

/// Day-scoped auto-send accounting, owned by the external store.
#[async_trait]
pub trait AutoSendLedger: Send + Sync {
    /// Auto-sent responses recorded for `org` on `day`.
    async fn auto_send_count(
        &self,
        org: OrganizationId,
        day: NaiveDate,
    ) -> Result<u32, MapleError>;

    /// Records one auto-sent response for `org` on `day`. Called
    /// exactly once per send decision.
    async fn record_auto_send(
        &self,
        org: OrganizationId,
        day: NaiveDate,
    ) -> Result<(), MapleError>;
}
