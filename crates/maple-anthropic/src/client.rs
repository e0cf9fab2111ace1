// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! A single attempt per call: provider failures are surfaced to the
//! caller, never retried silently. Every request carries an explicit
//! deadline; expiry maps to [`MapleError::Timeout`].

use std::time::Duration;

use maple_config::AnthropicConfig;
use maple_core::MapleError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    default_model: String,
    timeout: Duration,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a client from the `[anthropic]` config section.
    ///
    /// Fails if the API key is absent or not a valid header value.
    pub fn from_config(config: &AnthropicConfig) -> Result<Self, MapleError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| MapleError::Config("anthropic.api_key is not set".into()))?;
        Self::new(
            api_key,
            &config.api_version,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Creates a new Anthropic API client.
    pub fn new(
        api_key: &str,
        api_version: &str,
        model: String,
        timeout: Duration,
    ) -> Result<Self, MapleError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| MapleError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(api_version).map_err(|e| {
                MapleError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MapleError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            timeout,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a request and returns the full response.
    ///
    /// One attempt only. A deadline expiry returns `Timeout`; any other
    /// failure returns `Generation` with the API's diagnostic when the
    /// error body is parseable.
    pub async fn complete(&self, request: &MessageRequest) -> Result<MessageResponse, MapleError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MapleError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    MapleError::Generation {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| MapleError::Generation {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            let msg_response: MessageResponse =
                serde_json::from_str(&body).map_err(|e| MapleError::Generation {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(msg_response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!(
                "Anthropic API error ({}): {}",
                api_err.error.type_, api_err.error.message
            )
        } else {
            format!("API returned {status}: {body}")
        };
        Err(MapleError::Generation {
            message,
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> AnthropicClient {
        AnthropicClient::new(
            "test-api-key",
            "2023-06-01",
            "claude-sonnet-4-20250514".into(),
            Duration::from_secs(2),
        )
        .unwrap()
        .with_base_url(base_url.to_string())
    }

    fn test_request() -> MessageRequest {
        MessageRequest {
            model: "claude-sonnet-4-20250514".into(),
            messages: vec![ApiMessage::user("Hello")],
            system: None,
            max_tokens: 1024,
        }
    }

    #[tokio::test]
    async fn complete_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hi there!"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await.unwrap();

        assert_eq!(result.id, "msg_test");
        assert_eq!(result.first_text(), Some("Hi there!"));
        assert_eq!(result.usage.input_tokens, 10);
    }

    #[tokio::test]
    async fn complete_does_not_retry_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        // Exactly one request is expected: no silent retry.
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("rate_limit_error"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_fails_on_400_with_api_diagnostic() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Bad model"}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("invalid_request_error"));
    }

    #[tokio::test]
    async fn complete_times_out_with_explicit_deadline() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "msg_slow",
            "content": [{"type": "text", "text": "late"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(&response_body)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete(&test_request()).await.unwrap_err();
        assert!(matches!(err, MapleError::Timeout { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_correct_headers() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "msg_headers",
            "content": [{"type": "text", "text": "ok"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1, "output_tokens": 1}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AnthropicConfig::default();
        let result = AnthropicClient::from_config(&config);
        assert!(matches!(result, Err(MapleError::Config(_))));
    }
}
