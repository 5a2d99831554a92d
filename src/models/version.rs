//! Immutable report version snapshots
//!
//! A `ReportVersion` freezes the full criterion state and the derived summary
//! at snapshot time. Once written it is never modified; restore creates a new
//! version rather than rewinding history. Each snapshot carries a sha256
//! checksum of its canonical criteria JSON so reads can detect post-hoc
//! tampering with "immutable" history.

use super::{CriterionRecord, Summary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Workflow status of a version
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// Working snapshot, remediation ongoing
    InProgress,
    /// Submitted for review
    ReadyForReview,
    /// Review complete
    Reviewed,
    /// Approved for publication
    Approved,
}

impl VersionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            VersionStatus::InProgress => "In Progress",
            VersionStatus::ReadyForReview => "Ready for Review",
            VersionStatus::Reviewed => "Reviewed",
            VersionStatus::Approved => "Approved",
        }
    }

    /// Parse the snake_case wire form (e.g., "ready_for_review")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(VersionStatus::InProgress),
            "ready_for_review" => Some(VersionStatus::ReadyForReview),
            "reviewed" => Some(VersionStatus::Reviewed),
            "approved" => Some(VersionStatus::Approved),
            _ => None,
        }
    }
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable snapshot of a report at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Report this version belongs to
    pub report_id: String,

    /// Strictly increasing, gapless, starting at 1
    pub version_number: u32,

    /// Workflow status at snapshot time
    pub status: VersionStatus,

    /// Optional save message supplied by the caller
    #[serde(default)]
    pub reason: Option<String>,

    /// Version number this snapshot was restored from, when created by a
    /// restore operation
    #[serde(default)]
    pub restored_from: Option<u32>,

    pub created_at: DateTime<Utc>,
    pub created_by: String,

    /// True only for the highest version number of the report
    pub is_latest: bool,

    /// Derived summary frozen at snapshot time
    pub summary: Summary,

    /// sha256 over the canonical criteria snapshot JSON
    pub snapshot_checksum: String,

    /// Frozen copy of every criterion record
    pub criteria_snapshot: BTreeMap<String, CriterionRecord>,
}

impl ReportVersion {
    /// Compute the canonical checksum of a criteria snapshot
    ///
    /// BTreeMap keys keep the JSON deterministic, so equal snapshots always
    /// hash equal.
    pub fn checksum_of(snapshot: &BTreeMap<String, CriterionRecord>) -> String {
        let canonical =
            serde_json::to_string(snapshot).expect("criteria snapshot serializes to JSON");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("sha256:{:x}", hasher.finalize())
    }

    /// True when the stored checksum still matches the stored snapshot
    pub fn checksum_valid(&self) -> bool {
        Self::checksum_of(&self.criteria_snapshot) == self.snapshot_checksum
    }

    /// Cheap listing row without the full snapshot
    pub fn to_listing(&self) -> VersionListing {
        VersionListing {
            report_id: self.report_id.clone(),
            version_number: self.version_number,
            status: self.status,
            reason: self.reason.clone(),
            restored_from: self.restored_from,
            created_at: self.created_at,
            created_by: self.created_by.clone(),
            is_latest: self.is_latest,
            summary: self.summary,
        }
    }
}

/// Summary-only view of a version, used by history listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionListing {
    pub report_id: String,
    pub version_number: u32,
    pub status: VersionStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub restored_from: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub is_latest: bool,
    pub summary: Summary,
}
