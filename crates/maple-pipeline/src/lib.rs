// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end response pipeline.
//!
//! One inbound message runs assemble, generate, analyze, classify, and
//! decide as a single logical unit over non-shared data, so any number
//! of pipeline invocations may proceed concurrently without
//! coordination. Lifecycle bookkeeping follows the draft state machine
//! in `maple-core`: a generation failure lands in `Failed`, a held
//! draft stays `Ready`, and a send decision advances to `Sent` with
//! the daily ledger incremented exactly once.

mod store;

pub use store::{AutoSendLedger, ConversationStore};

use std::sync::Arc;

use chrono::Utc;
use maple_anthropic::AnthropicClient;
use maple_context::ContextAssembler;
use maple_core::{ConversationId, DraftStatus, GeneratedDraft, MapleError, MessageClassification, MessageId};
use maple_draft::{DraftService, MessageClassifier};
use maple_policy::{decide, Decision, DecisionContext};
use tracing::{info, warn};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub draft: GeneratedDraft,
    pub classification: MessageClassification,
    pub status: DraftStatus,
    pub decision: Decision,
}

/// Orchestrates the response pipeline over injected stores.
pub struct ResponsePipeline {
    store: Arc<dyn ConversationStore>,
    ledger: Arc<dyn AutoSendLedger>,
    assembler: ContextAssembler,
    drafts: DraftService,
    classifier: MessageClassifier,
}

impl ResponsePipeline {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        ledger: Arc<dyn AutoSendLedger>,
        client: AnthropicClient,
        max_tokens: u32,
    ) -> Self {
        Self {
            store,
            ledger,
            assembler: ContextAssembler::new(),
            drafts: DraftService::new(client.clone(), max_tokens),
            classifier: MessageClassifier::new(client),
        }
    }

    /// Generates, scores, classifies, and routes a draft reply to the
    /// given inbound message.
    ///
    /// Errors before generation (missing conversation or message,
    /// invalid policy) propagate without a draft record. A generation
    /// failure also propagates, after the lifecycle state is recorded
    /// as failed; the caller persists that state.
    pub async fn generate(
        &self,
        conversation_id: ConversationId,
        message_id: MessageId,
    ) -> Result<PipelineOutcome, MapleError> {
        let conversation = self.store.conversation(conversation_id).await?;
        let org = conversation.organization_id;
        let settings = self.store.organization_settings(org).await?;
        settings.auto_send.validate()?;
        let knowledge = self.store.knowledge_entries(org).await?;

        let context = self.assembler.assemble(&conversation, message_id, &knowledge)?;

        let status = DraftStatus::Pending.advance(DraftStatus::Processing)?;

        let draft = match self
            .drafts
            .draft(&context, settings.brand_voice.as_deref())
            .await
        {
            Ok(draft) => draft,
            Err(err) => {
                warn!(conversation = %conversation_id, %err, "draft generation failed");
                status.advance(DraftStatus::Failed)?;
                return Err(err);
            }
        };
        let status = status.advance(DraftStatus::Ready)?;

        let classification = self.classifier.classify(&context.customer_message).await;

        let now = Utc::now();
        let daily_count = self.ledger.auto_send_count(org, now.date_naive()).await?;
        let decision = decide(
            &draft,
            &classification,
            &settings.auto_send,
            &DecisionContext::new(now, daily_count),
        );

        let status = match decision {
            Decision::Send => {
                self.ledger.record_auto_send(org, now.date_naive()).await?;
                status.advance(DraftStatus::Sent)?
            }
            Decision::Hold(_) => status,
        };

        info!(
            conversation = %conversation_id,
            confidence = draft.confidence,
            %status,
            ?decision,
            "pipeline completed"
        );

        Ok(PipelineOutcome {
            draft,
            classification,
            status,
            decision,
        })
    }
}
