//! Manual verification workflow types
//!
//! Each criterion carries an append-only history of verification attempts.
//! There is no terminal state: any status may follow any status, so a
//! criterion can be reopened and re-verified indefinitely. The most recent
//! entry is the criterion's current verification status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one manual verification round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet manually verified this round
    Pending,
    /// Verified and the criterion passes
    VerifiedPass,
    /// Verified and the criterion fails
    VerifiedFail,
    /// Verified with mixed results
    VerifiedPartial,
    /// Verification postponed
    Deferred,
}

impl VerificationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "Pending",
            VerificationStatus::VerifiedPass => "Verified Pass",
            VerificationStatus::VerifiedFail => "Verified Fail",
            VerificationStatus::VerifiedPartial => "Verified Partial",
            VerificationStatus::Deferred => "Deferred",
        }
    }

    /// Parse the snake_case wire form (e.g., "verified_fail")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "verified_pass" => Some(VerificationStatus::VerifiedPass),
            "verified_fail" => Some(VerificationStatus::VerifiedFail),
            "verified_partial" => Some(VerificationStatus::VerifiedPartial),
            "deferred" => Some(VerificationStatus::Deferred),
            _ => None,
        }
    }

    /// True when recording this status requires non-empty notes
    pub fn requires_notes(&self) -> bool {
        matches!(
            self,
            VerificationStatus::VerifiedFail | VerificationStatus::VerifiedPartial
        )
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry in a criterion's verification history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationEntry {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Outcome of this round
    pub status: VerificationStatus,

    /// How the criterion was checked (e.g., "Manual Review", "NVDA 2024.1")
    pub method: String,

    /// Reviewer notes; required for fail/partial outcomes
    #[serde(default)]
    pub notes: String,

    /// Opaque reviewer identity from the auth/session layer
    pub verified_by: String,

    /// When the entry was recorded
    pub verified_at: DateTime<Utc>,
}

impl VerificationEntry {
    pub fn new(
        status: VerificationStatus,
        method: impl Into<String>,
        notes: impl Into<String>,
        verified_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status,
            method: method.into(),
            notes: notes.into(),
            verified_by: verified_by.into(),
            verified_at: Utc::now(),
        }
    }
}
