// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base entry generation from a resolved conversation.
//!
//! When an agent marks a question-and-answer exchange as worth keeping,
//! the model generalizes it into a reusable entry with a category and
//! tags. Like the other evaluation stages, failure degrades instead of
//! erroring: the caller gets the original text back under the default
//! category.

use maple_anthropic::{AnthropicClient, ApiMessage, MessageRequest};
use serde::Deserialize;
use tracing::{debug, warn};

/// Maximum tokens for the entry-generation call.
const KNOWLEDGE_MAX_TOKENS: u32 = 300;

/// A generalized knowledge-base entry proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedEntry {
    /// Generalized question with specific details removed.
    pub question: String,
    /// Clear, concise answer.
    pub answer: String,
    /// Entry category, defaulting to `General`.
    pub category: String,
    /// Three to five relevant tags; empty when the model omits them.
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// Generalizes resolved exchanges into knowledge-base entries.
#[derive(Debug, Clone)]
pub struct KnowledgeEntryGenerator {
    client: AnthropicClient,
}

impl KnowledgeEntryGenerator {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Proposes an entry from a customer question and its answer.
    ///
    /// Any provider or parse failure, and any missing field, falls back
    /// to the original text with category `General` and no tags.
    pub async fn propose(&self, question: &str, answer: &str) -> ProposedEntry {
        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage::user(entry_prompt(question, answer))],
            system: None,
            max_tokens: KNOWLEDGE_MAX_TOKENS,
        };

        let raw: RawEntry = match self.client.complete(&request).await {
            Ok(response) => {
                let text = response.first_text().unwrap_or("{}");
                match serde_json::from_str(text.trim()) {
                    Ok(raw) => raw,
                    Err(err) => {
                        warn!(%err, "entry output unparseable, keeping original text");
                        return fallback(question, answer);
                    }
                }
            }
            Err(err) => {
                warn!(%err, "entry generation failed, keeping original text");
                return fallback(question, answer);
            }
        };

        let entry = ProposedEntry {
            question: raw
                .question
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| question.to_string()),
            answer: raw
                .answer
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| answer.to_string()),
            category: raw
                .category
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "General".to_string()),
            tags: raw.tags,
        };

        debug!(category = %entry.category, tags = entry.tags.len(), "entry proposed");
        entry
    }
}

fn fallback(question: &str, answer: &str) -> ProposedEntry {
    ProposedEntry {
        question: question.to_string(),
        answer: answer.to_string(),
        category: "General".to_string(),
        tags: Vec::new(),
    }
}

fn entry_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"Given this customer question and answer, create a knowledge base entry:

Question: "{question}"
Answer: "{answer}"

Provide:
1. A generalized version of the question (remove specific details)
2. A clear, concise answer
3. A category for this entry
4. 3-5 relevant tags

Respond in JSON format: {{"question": string, "answer": string, "category": string, "tags": string[]}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_generator(base_url: &str) -> KnowledgeEntryGenerator {
        let client = AnthropicClient::new(
            "test-key",
            "2023-06-01",
            "claude-sonnet-4-20250514".into(),
            Duration::from_secs(2),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        KnowledgeEntryGenerator::new(client)
    }

    fn entry_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_entry",
            "content": [{"type": "text", "text": text}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 60, "output_tokens": 50}
        })
    }

    const QUESTION: &str = "Can I return order #8812 after 25 days?";
    const ANSWER: &str = "Yes, order #8812 is within our 30-day return window.";

    #[tokio::test]
    async fn well_formed_output_becomes_an_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("create a knowledge base entry"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry_body(
                r#"{"question": "Can I return an order after several weeks?",
                    "answer": "Orders can be returned within 30 days of delivery.",
                    "category": "Returns",
                    "tags": ["returns", "refunds", "policy"]}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let entry = test_generator(&server.uri()).propose(QUESTION, ANSWER).await;
        assert_eq!(entry.question, "Can I return an order after several weeks?");
        assert_eq!(entry.category, "Returns");
        assert_eq!(entry.tags, vec!["returns", "refunds", "policy"]);
    }

    #[tokio::test]
    async fn missing_fields_fall_back_to_original_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(entry_body(r#"{"category": "Returns"}"#)),
            )
            .mount(&server)
            .await;

        let entry = test_generator(&server.uri()).propose(QUESTION, ANSWER).await;
        assert_eq!(entry.question, QUESTION);
        assert_eq!(entry.answer, ANSWER);
        assert_eq!(entry.category, "Returns");
        assert!(entry.tags.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_keeps_original_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"type": "api_error", "message": "down"}
            })))
            .mount(&server)
            .await;

        let entry = test_generator(&server.uri()).propose(QUESTION, ANSWER).await;
        assert_eq!(entry.question, QUESTION);
        assert_eq!(entry.answer, ANSWER);
        assert_eq!(entry.category, "General");
        assert!(entry.tags.is_empty());
    }

    #[tokio::test]
    async fn non_json_output_keeps_original_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(entry_body("Here is a great knowledge base entry!")),
            )
            .mount(&server)
            .await;

        let entry = test_generator(&server.uri()).propose(QUESTION, ANSWER).await;
        assert_eq!(entry, super::fallback(QUESTION, ANSWER));
    }
}
