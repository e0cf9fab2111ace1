// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent, sentiment, and urgency classification of inbound messages.
//!
//! Like the analyzer, classification never fails the pipeline: anything
//! the model or parser rejects comes back as the conservative default,
//! which the policy layer treats as "route to a human".

use maple_anthropic::{AnthropicClient, ApiMessage, MessageRequest};
use maple_core::{MessageClassification, Sentiment, Urgency};
use serde::Deserialize;
use tracing::{debug, warn};

/// Maximum tokens for the classification call.
const CLASSIFY_MAX_TOKENS: u32 = 150;

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    urgency: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Classifies inbound customer messages for the auto-send policy.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    client: AnthropicClient,
}

impl MessageClassifier {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Extracts intent, sentiment, urgency, and category from a message.
    ///
    /// Unknown sentiment or urgency labels fall back field-by-field to
    /// neutral and medium rather than discarding the whole result.
    pub async fn classify(&self, message: &str) -> MessageClassification {
        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage::user(classification_prompt(message))],
            system: None,
            max_tokens: CLASSIFY_MAX_TOKENS,
        };

        let raw: RawClassification = match self.client.complete(&request).await {
            Ok(response) => {
                let text = response.first_text().unwrap_or("{}");
                match serde_json::from_str(text.trim()) {
                    Ok(raw) => raw,
                    Err(err) => {
                        warn!(%err, "classification output unparseable, using defaults");
                        return MessageClassification::default();
                    }
                }
            }
            Err(err) => {
                warn!(%err, "classification call failed, using defaults");
                return MessageClassification::default();
            }
        };

        let classification = MessageClassification {
            intent: raw
                .intent
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "General inquiry".to_string()),
            sentiment: raw
                .sentiment
                .and_then(|s| s.parse::<Sentiment>().ok())
                .unwrap_or(Sentiment::Neutral),
            urgency: raw
                .urgency
                .and_then(|s| s.parse::<Urgency>().ok())
                .unwrap_or(Urgency::Medium),
            category: raw.category.filter(|s| !s.is_empty()),
        };

        debug!(
            intent = %classification.intent,
            sentiment = %classification.sentiment,
            urgency = %classification.urgency,
            category = ?classification.category,
            "message classified"
        );
        classification
    }
}

fn classification_prompt(message: &str) -> String {
    format!(
        r#"Analyze this customer support message and extract:
1. Primary intent (what does the customer want?)
2. Sentiment (positive, neutral, or negative)
3. Urgency level (low, medium, or high)
4. Category (billing, technical, general inquiry, feature request, complaint, etc.)

Message: "{message}"

Respond in JSON format: {{"intent": string, "sentiment": string, "urgency": string, "category": string}}"#
    )
}
