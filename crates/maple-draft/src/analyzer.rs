// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Confidence and tone analysis of a generated draft.
//!
//! A second model call self-evaluates the draft along five axes, then
//! deterministic heuristics adjust the self-reported score. This is the
//! only pipeline stage allowed to swallow failures: a conservative
//! default still routes the draft to human review under most policies.

use maple_anthropic::{AnthropicClient, ApiMessage, MessageRequest};
use maple_core::MapleError;
use serde::Deserialize;
use tracing::{debug, warn};

/// Maximum tokens for the analysis call.
const ANALYSIS_MAX_TOKENS: u32 = 200;

/// Drafts shorter than this are presumed incomplete.
const SHORT_DRAFT_CHARS: usize = 100;

/// Penalty applied to drafts under [`SHORT_DRAFT_CHARS`].
const SHORT_DRAFT_PENALTY: f64 = 15.0;

/// Penalty applied when any hedging phrase is present.
const HEDGING_PENALTY: f64 = 20.0;

/// Textual markers of self-expressed uncertainty, matched as
/// case-insensitive substrings of the draft.
const HEDGING_PHRASES: [&str; 6] = [
    "not sure",
    "maybe",
    "possibly",
    "might be",
    "i think",
    "uncertain",
];

/// Confidence and tone assessment of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Final trust score, always within `0..=100`.
    pub confidence: u8,
    /// Tone label (`professional`, `friendly`, `empathetic`, ...).
    pub tone: String,
    /// Analyzer-internal rationale.
    pub reasoning: String,
}

impl Analysis {
    /// The conservative default used when analysis fails.
    fn fallback() -> Self {
        Self {
            confidence: 60,
            tone: "professional".to_string(),
            reasoning: "Error in analysis, using default score".to_string(),
        }
    }
}

/// The model's structured self-evaluation, with documented defaults for
/// missing fields.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default = "default_confidence")]
    confidence: f64,
    #[serde(default = "default_tone")]
    tone: String,
    #[serde(default = "default_reasoning")]
    reasoning: String,
}

fn default_confidence() -> f64 {
    70.0
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_reasoning() -> String {
    "Analysis completed".to_string()
}

/// Scores drafts with a model self-evaluation plus deterministic
/// heuristics.
#[derive(Debug, Clone)]
pub struct ResponseAnalyzer {
    client: AnthropicClient,
}

impl ResponseAnalyzer {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Analyzes a draft against the original customer message.
    ///
    /// Never errors outward: any provider or parse failure degrades to
    /// the fixed conservative default.
    pub async fn analyze(
        &self,
        draft: &str,
        customer_message: &str,
        used_knowledge_base: bool,
    ) -> Analysis {
        let prompt = analysis_prompt(draft, customer_message, used_knowledge_base);
        let request = MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage::user(prompt)],
            system: None,
            max_tokens: ANALYSIS_MAX_TOKENS,
        };

        let raw = match self.client.complete(&request).await {
            Ok(response) => match response.first_text() {
                Some(text) => match parse_analysis(text) {
                    Ok(raw) => raw,
                    Err(err) => {
                        warn!(%err, "analysis output unparseable, using fallback");
                        return Analysis::fallback();
                    }
                },
                None => {
                    warn!("analysis returned no text, using fallback");
                    return Analysis::fallback();
                }
            },
            Err(err) => {
                warn!(%err, "analysis call failed, using fallback");
                return Analysis::fallback();
            }
        };

        let confidence = apply_heuristics(raw.confidence, draft);
        debug!(
            self_reported = raw.confidence,
            final_confidence = confidence,
            tone = %raw.tone,
            "draft analyzed"
        );

        Analysis {
            confidence,
            tone: raw.tone,
            reasoning: raw.reasoning,
        }
    }
}

/// Applies the deterministic scoring adjustments on top of the model's
/// self-reported confidence.
///
/// Clamp to [0,100]; short drafts lose 15 points; any hedging phrase
/// costs 20 points; each subtraction floors at zero; the result is
/// rounded to the nearest integer.
pub fn apply_heuristics(self_reported: f64, draft: &str) -> u8 {
    let mut confidence = self_reported.clamp(0.0, 100.0);

    if draft.chars().count() < SHORT_DRAFT_CHARS {
        confidence = (confidence - SHORT_DRAFT_PENALTY).max(0.0);
    }

    if contains_hedging(draft) {
        confidence = (confidence - HEDGING_PENALTY).max(0.0);
    }

    confidence.round() as u8
}

/// True when the draft contains any hedging phrase, case-insensitively.
pub fn contains_hedging(draft: &str) -> bool {
    let lowered = draft.to_lowercase();
    HEDGING_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Parses the model's JSON output, tolerating a surrounding code fence.
fn parse_analysis(text: &str) -> Result<RawAnalysis, MapleError> {
    let trimmed = strip_code_fence(text);
    serde_json::from_str(trimmed)
        .map_err(|e| MapleError::Internal(format!("invalid analysis JSON: {e}")))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|inner| inner.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

fn analysis_prompt(draft: &str, customer_message: &str, used_knowledge_base: bool) -> String {
    let kb_line = if used_knowledge_base {
        "\n- Response uses verified knowledge base information (+10 bonus)"
    } else {
        ""
    };
    format!(
        r#"Analyze this customer support response in detail:

Original customer message: "{customer_message}"

AI Response: "{draft}"

Evaluate the following factors:
1. Completeness: Does it fully address the customer's question? (0-100)
2. Accuracy: Is the information specific and actionable? (0-100)
3. Clarity: Is it clear and easy to understand? (0-100)
4. Professionalism: Is the tone appropriate? (0-100)
5. Uncertainty indicators: Does it contain phrases like "I'm not sure", "maybe", "possibly" that reduce confidence?

Calculate an overall confidence score (0-100) considering all factors.
Higher scores for:
- Complete, specific answers
- Clear action steps
- No hedging language{kb_line}

Lower scores for:
- Vague or generic responses
- Uncertainty phrases
- Incomplete answers
- Off-topic responses

Also identify the tone (professional, friendly, empathetic, formal, casual).

Respond in JSON format: {{"confidence": number, "tone": string, "reasoning": "brief explanation"}}"#
    )
}
