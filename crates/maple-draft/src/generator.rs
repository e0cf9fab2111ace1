// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft generation: one provider call per inbound customer message.
//!
//! Failures surface as generation errors -- the caller records the draft
//! lifecycle state as failed. There is no silent retry.

use maple_anthropic::{AnthropicClient, ApiMessage, MessageRequest};
use maple_context::AssembledContext;
use maple_core::MapleError;
use tracing::{debug, warn};

use crate::prompt::build_system_prompt;

/// Generates candidate replies with the hosted model.
#[derive(Debug, Clone)]
pub struct DraftGenerator {
    client: AnthropicClient,
    max_tokens: u32,
}

impl DraftGenerator {
    pub fn new(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    /// Drafts a reply to the assembled context.
    ///
    /// Sends the system instruction plus the transcript plus the new
    /// customer message, and extracts the first text content block.
    /// A deadline expiry is reported as a generation failure.
    pub async fn generate(
        &self,
        context: &AssembledContext,
        brand_voice: Option<&str>,
    ) -> Result<String, MapleError> {
        let system = build_system_prompt(brand_voice, &context.knowledge_snippets);

        let mut messages: Vec<ApiMessage> = context
            .transcript
            .iter()
            .map(|turn| ApiMessage {
                role: turn.role.to_string(),
                content: turn.content.clone(),
            })
            .collect();
        messages.push(ApiMessage::user(context.customer_message.clone()));

        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            messages,
            system: Some(system),
            max_tokens: self.max_tokens,
        };

        let response = match self.client.complete(&request).await {
            Ok(response) => response,
            Err(MapleError::Timeout { duration }) => {
                warn!(?duration, "draft generation timed out");
                return Err(MapleError::generation(format!(
                    "provider call timed out after {duration:?}"
                )));
            }
            Err(err) => return Err(err),
        };

        let text = response
            .first_text()
            .ok_or_else(|| MapleError::generation("provider returned no text content"))?;

        debug!(
            output_tokens = response.usage.output_tokens,
            chars = text.len(),
            "draft generated"
        );
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_context::{TranscriptRole, TranscriptTurn};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_generator(base_url: &str) -> DraftGenerator {
        let client = AnthropicClient::new(
            "test-key",
            "2023-06-01",
            "claude-sonnet-4-20250514".into(),
            Duration::from_secs(2),
        )
        .unwrap()
        .with_base_url(base_url.to_string());
        DraftGenerator::new(client, 1024)
    }

    fn test_context() -> AssembledContext {
        AssembledContext {
            transcript: vec![
                TranscriptTurn {
                    role: TranscriptRole::User,
                    content: "Where is my order?".into(),
                },
                TranscriptTurn {
                    role: TranscriptRole::Assistant,
                    content: "It shipped yesterday.".into(),
                },
            ],
            knowledge_snippets: vec!["Q: Shipping?\nA: 2-4 business days.".into()],
            customer_message: "Can I get a tracking number?".into(),
        }
    }

    fn draft_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_draft",
            "content": [{"type": "text", "text": text}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 50, "output_tokens": 40}
        })
    }

    #[tokio::test]
    async fn generate_sends_transcript_and_new_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "messages": [
                    {"role": "user", "content": "Where is my order?"},
                    {"role": "assistant", "content": "It shipped yesterday."},
                    {"role": "user", "content": "Can I get a tracking number?"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(draft_response("Here is the tracking...")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = test_generator(&server.uri())
            .generate(&test_context(), Some("Friendly and direct."))
            .await
            .unwrap();
        assert_eq!(draft, "Here is the tracking...");
    }

    #[tokio::test]
    async fn provider_error_surfaces_as_generation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"type": "api_error", "message": "boom"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_generator(&server.uri())
            .generate(&test_context(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, MapleError::Generation { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn missing_text_block_is_a_generation_error() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "id": "msg_empty",
            "content": [],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 5, "output_tokens": 0}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let err = test_generator(&server.uri())
            .generate(&test_context(), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no text content"));
    }

    #[tokio::test]
    async fn timeout_is_reported_as_generation_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(draft_response("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = test_generator(&server.uri())
            .generate(&test_context(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, MapleError::Generation { .. }), "got: {err}");
        assert!(err.to_string().contains("timed out"));
    }
}
