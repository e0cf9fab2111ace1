// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft generation and evaluation for Maple.
//!
//! Model-backed stages over one [`AnthropicClient`]:
//! [`DraftGenerator`] writes the candidate reply, [`ResponseAnalyzer`]
//! scores it, [`MessageClassifier`] labels the triggering customer
//! message, and [`KnowledgeEntryGenerator`] turns resolved exchanges
//! into reusable knowledge entries. Generation failures propagate; the
//! evaluation stages degrade to conservative defaults instead.

mod analyzer;
mod classifier;
mod generator;
mod knowledge;
mod prompt;

pub use analyzer::{Analysis, ResponseAnalyzer, apply_heuristics, contains_hedging};
pub use classifier::MessageClassifier;
pub use generator::DraftGenerator;
pub use knowledge::{KnowledgeEntryGenerator, ProposedEntry};
pub use prompt::build_system_prompt;

use maple_anthropic::AnthropicClient;
use maple_context::AssembledContext;
use maple_core::{GeneratedDraft, MapleError};

/// Generates a reply and its trust analysis in one pass.
///
/// Convenience wrapper over the generator and analyzer stages; the
/// draft records whether knowledge snippets were available to the
/// prompt, which the auto-send policy may require.
#[derive(Debug, Clone)]
pub struct DraftService {
    generator: DraftGenerator,
    analyzer: ResponseAnalyzer,
}

impl DraftService {
    pub fn new(client: AnthropicClient, max_tokens: u32) -> Self {
        Self {
            generator: DraftGenerator::new(client.clone(), max_tokens),
            analyzer: ResponseAnalyzer::new(client),
        }
    }

    /// Drafts a reply to `context` and scores it.
    pub async fn draft(
        &self,
        context: &AssembledContext,
        brand_voice: Option<&str>,
    ) -> Result<GeneratedDraft, MapleError> {
        let used_knowledge_base = !context.knowledge_snippets.is_empty();
        let response = self.generator.generate(context, brand_voice).await?;
        let analysis = self
            .analyzer
            .analyze(&response, &context.customer_message, used_knowledge_base)
            .await;

        Ok(GeneratedDraft {
            response,
            confidence: analysis.confidence,
            tone: analysis.tone,
            used_knowledge_base,
            reasoning: analysis.reasoning,
        })
    }
}
