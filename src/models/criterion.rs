use super::{VerificationEntry, VerificationStatus};
use serde::{Deserialize, Serialize};

/// WCAG conformance level of a success criterion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

impl WcagLevel {
    pub fn name(&self) -> &'static str {
        match self {
            WcagLevel::A => "A",
            WcagLevel::AA => "AA",
            WcagLevel::AAA => "AAA",
        }
    }
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Assessed support status of a criterion (VPAT terminology)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConformanceLevel {
    /// The product fully meets the criterion
    Supports,
    /// Some functionality meets the criterion, some does not
    PartiallySupports,
    /// The product does not meet the criterion
    DoesNotSupport,
    /// The criterion does not apply to the product
    NotApplicable,
}

impl ConformanceLevel {
    pub fn name(&self) -> &'static str {
        match self {
            ConformanceLevel::Supports => "Supports",
            ConformanceLevel::PartiallySupports => "Partially Supports",
            ConformanceLevel::DoesNotSupport => "Does Not Support",
            ConformanceLevel::NotApplicable => "Not Applicable",
        }
    }

    /// Parse the snake_case wire form (e.g., "partially_supports")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "supports" => Some(ConformanceLevel::Supports),
            "partially_supports" => Some(ConformanceLevel::PartiallySupports),
            "does_not_support" => Some(ConformanceLevel::DoesNotSupport),
            "not_applicable" => Some(ConformanceLevel::NotApplicable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConformanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provenance of a criterion's current assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Attribution {
    /// Produced by the automated audit pipeline
    #[serde(rename = "AUTOMATED")]
    Automated,
    /// Produced by the AI suggestion service, not yet confirmed
    #[serde(rename = "AI-SUGGESTED")]
    AiSuggested,
    /// A human edited or verified this criterion
    #[serde(rename = "HUMAN-VERIFIED")]
    HumanVerified,
}

impl Attribution {
    pub fn name(&self) -> &'static str {
        match self {
            Attribution::Automated => "AUTOMATED",
            Attribution::AiSuggested => "AI-SUGGESTED",
            Attribution::HumanVerified => "HUMAN-VERIFIED",
        }
    }
}

impl std::fmt::Display for Attribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An externally supplied "Not Applicable" suggestion for a criterion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NaSuggestion {
    /// Suggested conformance status (authoritative for applicability
    /// bucketing when it says `not_applicable`)
    pub suggested_status: ConformanceLevel,

    /// Suggestion confidence in [0,1]
    pub confidence: f64,

    /// Free-text rationale from the suggestion service
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Current conformance state of one success criterion inside a report
///
/// One record exists per (report, criterion id). Records are created once at
/// report initialization and mutated in place between snapshots; they are
/// never deleted and the criterion id set never changes across versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CriterionRecord {
    /// Stable success-criterion identifier (e.g., "1.4.3")
    pub criterion_id: String,

    /// Display name from the WCAG catalog (e.g., "Contrast (Minimum)")
    #[serde(default)]
    pub name: Option<String>,

    /// WCAG level of the criterion itself
    pub wcag_level: WcagLevel,

    /// Assessed support status
    pub conformance_level: ConformanceLevel,

    /// Provenance of the current assessment
    pub attribution: Attribution,

    /// Free-text remarks/explanations shown in the published report
    #[serde(default)]
    pub remarks: String,

    /// Audit-service confidence in [0,1]; absent means unknown (treated as 0)
    #[serde(default)]
    pub confidence_score: Option<f64>,

    /// Optional NA suggestion from the audit/AI service
    #[serde(default)]
    pub na_suggestion: Option<NaSuggestion>,

    /// Append-only manual verification history, oldest first
    #[serde(default)]
    pub verification: Vec<VerificationEntry>,
}

impl CriterionRecord {
    /// Create a new record with AUTOMATED attribution and no history
    pub fn new(
        criterion_id: impl Into<String>,
        wcag_level: WcagLevel,
        conformance_level: ConformanceLevel,
    ) -> Self {
        Self {
            criterion_id: criterion_id.into(),
            name: None,
            wcag_level,
            conformance_level,
            attribution: Attribution::Automated,
            remarks: String::new(),
            confidence_score: None,
            na_suggestion: None,
            verification: Vec::new(),
        }
    }

    /// Confidence score with the missing-value default applied
    pub fn effective_confidence(&self) -> f64 {
        self.confidence_score.unwrap_or(0.0)
    }

    /// Most recent verification entry, if any (the "current" verification
    /// status shown in summaries)
    pub fn current_verification(&self) -> Option<&VerificationEntry> {
        self.verification.last()
    }

    /// Current verification status, defaulting to pending when no manual
    /// verification has been recorded yet
    pub fn verification_status(&self) -> VerificationStatus {
        self.current_verification()
            .map(|e| e.status)
            .unwrap_or(VerificationStatus::Pending)
    }
}

/// Partial update to a criterion's human-editable fields
///
/// `confidence_score` and `na_suggestion` are deliberately absent: they are
/// supplied by the external audit service at intake and are not editable
/// through this model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CriterionPatch {
    /// New conformance level
    #[serde(default)]
    pub conformance_level: Option<ConformanceLevel>,

    /// New remarks text
    #[serde(default)]
    pub remarks: Option<String>,
}

impl CriterionPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.conformance_level.is_none() && self.remarks.is_none()
    }
}
