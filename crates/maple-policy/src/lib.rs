// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auto-send decision engine.
//!
//! Decides whether a scored draft may bypass human review. Checks run
//! in a fixed order and any failing check holds the draft; the engine
//! is a pure function of the draft, the message classification, the
//! organization policy, and an injected [`DecisionContext`] -- it never
//! owns storage or clocks.

use chrono::{DateTime, Utc};
use maple_config::AutoSendPolicy;
use maple_core::{GeneratedDraft, MessageClassification, Sentiment};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

/// Why a draft was held for human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HoldReason {
    /// Auto-send is switched off for the organization.
    Disabled,
    /// The message category is on the never-auto-send list.
    NeverCategory,
    /// An allow-list is configured and the category is not on it.
    CategoryNotAllowed,
    /// Confidence fell below the configured threshold.
    LowConfidence,
    /// The policy requires a knowledge-base match and the draft has none.
    NoKnowledgeBaseMatch,
    /// Outside the configured working-hours window, or the window could
    /// not be interpreted.
    OutsideWorkingHours,
    /// The message sentiment is gated to human review.
    SentimentRequiresReview,
    /// The daily auto-send ceiling has been reached.
    DailyLimitReached,
}

/// Outcome of the auto-send decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "reason")]
pub enum Decision {
    /// Deliver without human review.
    Send,
    /// Keep the draft ready and await human action.
    Hold(HoldReason),
}

impl Decision {
    pub fn is_send(&self) -> bool {
        matches!(self, Decision::Send)
    }
}

/// Externally supplied facts the decision depends on.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext {
    /// Decision time. Converted to the organization timezone for the
    /// working-hours check.
    pub now: DateTime<Utc>,
    /// Auto-sent responses already recorded for the current calendar
    /// day, read from the external ledger.
    pub daily_auto_send_count: u32,
}

impl DecisionContext {
    pub fn new(now: DateTime<Utc>, daily_auto_send_count: u32) -> Self {
        Self {
            now,
            daily_auto_send_count,
        }
    }
}

/// Runs the ordered auto-send checks. Any failing check holds.
///
/// The never-list always overrides the allow-list. Category comparison
/// is case-insensitive because the labels are model-produced free text.
pub fn decide(
    draft: &GeneratedDraft,
    classification: &MessageClassification,
    policy: &AutoSendPolicy,
    ctx: &DecisionContext,
) -> Decision {
    let decision = run_checks(draft, classification, policy, ctx);
    debug!(
        confidence = draft.confidence,
        category = ?classification.category,
        sentiment = %classification.sentiment,
        ?decision,
        "auto-send decided"
    );
    decision
}

fn run_checks(
    draft: &GeneratedDraft,
    classification: &MessageClassification,
    policy: &AutoSendPolicy,
    ctx: &DecisionContext,
) -> Decision {
    if !policy.enabled {
        return Decision::Hold(HoldReason::Disabled);
    }

    let category = classification.category.as_deref().map(str::to_lowercase);

    if category
        .as_deref()
        .is_some_and(|c| list_contains(&policy.never_auto_send_categories, c))
    {
        return Decision::Hold(HoldReason::NeverCategory);
    }

    if !policy.auto_send_categories.is_empty() {
        let allowed = category
            .as_deref()
            .is_some_and(|c| list_contains(&policy.auto_send_categories, c));
        if !allowed {
            return Decision::Hold(HoldReason::CategoryNotAllowed);
        }
    }

    if draft.confidence < policy.confidence_threshold
        && policy.require_approval_for_low_confidence
    {
        return Decision::Hold(HoldReason::LowConfidence);
    }

    if policy.require_knowledge_base_match && !draft.used_knowledge_base {
        return Decision::Hold(HoldReason::NoKnowledgeBaseMatch);
    }

    if policy.only_during_working_hours && !within_working_hours(policy, ctx.now) {
        return Decision::Hold(HoldReason::OutsideWorkingHours);
    }

    let sentiment_ok = match classification.sentiment {
        Sentiment::Negative => !policy.sentiment_filter.require_approval_negative,
        Sentiment::Positive => policy.sentiment_filter.auto_send_positive,
        Sentiment::Neutral => policy.sentiment_filter.auto_send_neutral,
    };
    if !sentiment_ok {
        return Decision::Hold(HoldReason::SentimentRequiresReview);
    }

    if let Some(ceiling) = policy.max_auto_responses_per_day {
        if ctx.daily_auto_send_count >= ceiling {
            return Decision::Hold(HoldReason::DailyLimitReached);
        }
    }

    Decision::Send
}

fn list_contains(list: &[String], category: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(category))
}

/// True when `now` falls inside the policy's working-hours window in
/// the organization timezone. An absent or unparseable window counts as
/// outside: the conservative reading routes the draft to a human.
fn within_working_hours(policy: &AutoSendPolicy, now: DateTime<Utc>) -> bool {
    let Some(hours) = &policy.working_hours else {
        return false;
    };
    let Ok((start, end, tz)) = hours.window() else {
        return false;
    };

    let local = now.with_timezone(&tz).time();
    if start <= end {
        start <= local && local < end
    } else {
        // Overnight window, e.g. 22:00-06:00.
        local >= start || local < end
    }
}
