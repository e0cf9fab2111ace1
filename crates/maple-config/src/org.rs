// SPDX-FileCopyrightText: 2026 Maple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed organization settings consumed read-only by the pipeline.
//!
//! The original system stored these as an untyped JSON blob on the
//! organization row. Here every field is named, optional fields have
//! documented defaults, and [`AutoSendPolicy::validate`] runs at the
//! boundary where external data enters the core.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use maple_core::MapleError;

/// Organization settings relevant to the response pipeline.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrganizationSettings {
    /// Free-text brand voice description, appended verbatim to the
    /// drafting system prompt when present.
    #[serde(default)]
    pub brand_voice: Option<String>,

    /// Auto-send rules. Absent means auto-send disabled.
    #[serde(default)]
    pub auto_send: AutoSendPolicy,
}

/// Rules governing whether a scored draft may bypass human review.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoSendPolicy {
    /// Master switch. Everything below is ignored when false.
    #[serde(default)]
    pub enabled: bool,

    /// Minimum confidence score (0-100) for auto-send.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: u8,

    /// Hold for review when confidence falls below the threshold.
    #[serde(default = "default_true")]
    pub require_approval_for_low_confidence: bool,

    /// When non-empty, only these categories may auto-send.
    #[serde(default)]
    pub auto_send_categories: Vec<String>,

    /// These categories never auto-send. Takes precedence over
    /// `auto_send_categories`.
    #[serde(default)]
    pub never_auto_send_categories: Vec<String>,

    /// Daily safety ceiling on auto-sent responses. `None` means
    /// unlimited.
    #[serde(default)]
    pub max_auto_responses_per_day: Option<u32>,

    /// Restrict auto-send to the configured working-hours window.
    #[serde(default)]
    pub only_during_working_hours: bool,

    /// Working-hours window, in the organization's timezone.
    #[serde(default)]
    pub working_hours: Option<WorkingHours>,

    /// Only auto-send drafts that drew on the knowledge base.
    #[serde(default)]
    pub require_knowledge_base_match: bool,

    /// Per-sentiment gates.
    #[serde(default)]
    pub sentiment_filter: SentimentFilter,
}

impl Default for AutoSendPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            confidence_threshold: default_confidence_threshold(),
            require_approval_for_low_confidence: true,
            auto_send_categories: Vec::new(),
            never_auto_send_categories: Vec::new(),
            max_auto_responses_per_day: None,
            only_during_working_hours: false,
            working_hours: None,
            require_knowledge_base_match: false,
            sentiment_filter: SentimentFilter::default(),
        }
    }
}

impl AutoSendPolicy {
    /// Validates externally supplied policy data before it enters the
    /// decision engine.
    pub fn validate(&self) -> Result<(), MapleError> {
        if self.confidence_threshold > 100 {
            return Err(MapleError::Validation(format!(
                "confidence_threshold must be 0-100, got {}",
                self.confidence_threshold
            )));
        }
        if self.only_during_working_hours {
            let Some(hours) = &self.working_hours else {
                return Err(MapleError::Validation(
                    "only_during_working_hours set without a working_hours window".into(),
                ));
            };
            hours.window()?;
        }
        Ok(())
    }
}

fn default_confidence_threshold() -> u8 {
    80
}

fn default_true() -> bool {
    true
}

/// A daily working-hours window in an IANA timezone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkingHours {
    /// Window start, `HH:MM` 24-hour.
    pub start: String,
    /// Window end, `HH:MM` 24-hour.
    pub end: String,
    /// IANA timezone name, e.g. `America/New_York`.
    pub timezone: String,
}

impl WorkingHours {
    /// Parses the window into `(start, end, tz)`.
    pub fn window(&self) -> Result<(NaiveTime, NaiveTime, Tz), MapleError> {
        let start = NaiveTime::parse_from_str(&self.start, "%H:%M").map_err(|e| {
            MapleError::Validation(format!("invalid working_hours.start {:?}: {e}", self.start))
        })?;
        let end = NaiveTime::parse_from_str(&self.end, "%H:%M").map_err(|e| {
            MapleError::Validation(format!("invalid working_hours.end {:?}: {e}", self.end))
        })?;
        let tz: Tz = self.timezone.parse().map_err(|_| {
            MapleError::Validation(format!("unknown timezone {:?}", self.timezone))
        })?;
        Ok((start, end, tz))
    }
}

/// Per-sentiment auto-send gates.
///
/// Defaults are conservative: neutral and positive are allowed through,
/// negative always requires approval.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentimentFilter {
    #[serde(default = "default_true")]
    pub auto_send_positive: bool,
    #[serde(default = "default_true")]
    pub auto_send_neutral: bool,
    #[serde(default = "default_true")]
    pub require_approval_negative: bool,
}

impl Default for SentimentFilter {
    fn default() -> Self {
        Self {
            auto_send_positive: true,
            auto_send_neutral: true,
            require_approval_negative: true,
        }
    }
}
