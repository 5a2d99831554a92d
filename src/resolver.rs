//! Confidence/NA resolver
//!
//! Decides the applicability bucket and confidence band for a criterion. The
//! NA suggestion is the single source of truth for the NA/applicable split
//! used in summary reporting; the editable conformance level is deliberately
//! not consulted, so a stale human edit cannot quietly shrink the applicable
//! set. The resolver only classifies — whether to silently accept a
//! suggestion is caller policy, expressed through [`AUTO_APPLY_NA_THRESHOLD`]
//! so every caller shares one definition.

use crate::models::{ConformanceLevel, CriterionRecord, NaSuggestion};
use serde::{Deserialize, Serialize};

/// Suggestions at or above this confidence may be accepted without human
/// review; below it they are surfaced for manual confirmation
pub const AUTO_APPLY_NA_THRESHOLD: f64 = 0.80;

/// Confidence band derived from the audit-service score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn name(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolver thresholds
///
/// Carried as a value (loaded from workspace config, overridable per test
/// scenario) rather than read from a global.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfig {
    /// Scores at or above this are the high band
    pub high_band: f64,

    /// Scores at or above this (and below `high_band`) are the medium band
    pub medium_band: f64,

    /// Auto-apply cutoff for NA suggestions
    pub auto_apply_na: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            high_band: 0.90,
            medium_band: 0.70,
            auto_apply_na: AUTO_APPLY_NA_THRESHOLD,
        }
    }
}

impl ResolverConfig {
    /// Band for a raw confidence score
    pub fn band(&self, score: f64) -> ConfidenceBand {
        if score >= self.high_band {
            ConfidenceBand::High
        } else if score >= self.medium_band {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    /// True when a suggestion is confident enough to apply without review
    pub fn may_auto_apply(&self, suggestion: &NaSuggestion) -> bool {
        suggestion.confidence >= self.auto_apply_na
    }
}

/// Applicability classification for one criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    /// False when the NA suggestion marks the criterion not applicable
    pub is_applicable: bool,

    /// Band derived from the record's confidence score
    pub confidence_band: ConfidenceBand,
}

/// Classify a criterion record
///
/// Not applicable if and only if the record carries an NA suggestion whose
/// suggested status is `not_applicable`. A missing suggestion means
/// applicable; a missing confidence score defaults to 0 (low band).
/// Out-of-range scores are a caller error rejected at intake, not here.
pub fn classify(record: &CriterionRecord, config: &ResolverConfig) -> Classification {
    let is_applicable = !matches!(
        record.na_suggestion,
        Some(NaSuggestion {
            suggested_status: ConformanceLevel::NotApplicable,
            ..
        })
    );

    Classification {
        is_applicable,
        confidence_band: config.band(record.effective_confidence()),
    }
}
