use super::CriterionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live state of one conformance report
///
/// Holds report metadata plus the mutable CriterionRecord store. Criteria are
/// keyed by criterion id; a BTreeMap keeps snapshots and diffs in stable
/// order. The key set is fixed at report creation and never changes across
/// versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier (e.g., "acme-portal-2026")
    pub id: String,

    /// Report title shown in listings
    pub title: String,

    /// Product or service under assessment
    #[serde(default)]
    pub product: Option<String>,

    /// Guideline edition string (e.g., "WCAG 2.1")
    pub wcag_edition: String,

    /// When the report was initialized
    pub created_at: DateTime<Utc>,

    /// Opaque creator identity from the auth/session layer
    pub created_by: String,

    /// When the live state last changed
    pub updated_at: DateTime<Utc>,

    /// Current conformance state per criterion id
    pub criteria: BTreeMap<String, CriterionRecord>,
}

impl Report {
    /// Create an empty report shell; criteria are attached at intake
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        wcag_edition: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            product: None,
            wcag_edition: wcag_edition.into(),
            created_at: now,
            created_by: created_by.into(),
            updated_at: now,
            criteria: BTreeMap::new(),
        }
    }

    /// Look up a criterion record
    pub fn criterion(&self, criterion_id: &str) -> Option<&CriterionRecord> {
        self.criteria.get(criterion_id)
    }

    /// Records in stable criterion-id order
    pub fn records(&self) -> impl Iterator<Item = &CriterionRecord> {
        self.criteria.values()
    }

    /// Mark the live state as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
