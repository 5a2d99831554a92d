//! Version comparison
//!
//! Diffs are computed per criterion, per tracked field. Unchanged criteria
//! contribute no entries, which is what keeps a review of two versions
//! readable. The comparison is order-symmetric: swapping the inputs swaps
//! `value_a`/`value_b` and changes nothing else.

use super::CriterionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Criterion field tracked by version comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffField {
    ConformanceLevel,
    Remarks,
    Attribution,
}

impl DiffField {
    pub fn name(&self) -> &'static str {
        match self {
            DiffField::ConformanceLevel => "conformance_level",
            DiffField::Remarks => "remarks",
            DiffField::Attribution => "attribution",
        }
    }

    const ALL: [DiffField; 3] = [
        DiffField::ConformanceLevel,
        DiffField::Remarks,
        DiffField::Attribution,
    ];
}

impl std::fmt::Display for DiffField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One field-level difference between two snapshots
///
/// A `None` value means the criterion was absent from that snapshot. The
/// criterion id set is fixed per report, so this only occurs on corrupted or
/// hand-edited stores; it is reported loudly rather than skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diff {
    pub criterion_id: String,
    pub field: DiffField,
    pub value_a: Option<String>,
    pub value_b: Option<String>,
}

fn field_value(record: &CriterionRecord, field: DiffField) -> String {
    match field {
        DiffField::ConformanceLevel => record.conformance_level.name().to_string(),
        DiffField::Remarks => record.remarks.clone(),
        DiffField::Attribution => record.attribution.name().to_string(),
    }
}

/// Compare two criteria snapshots field by field
///
/// Emits one entry per (criterion, tracked field) whose value differs.
/// Entries are ordered by criterion id, then by field declaration order.
pub fn diff_snapshots(
    snapshot_a: &BTreeMap<String, CriterionRecord>,
    snapshot_b: &BTreeMap<String, CriterionRecord>,
) -> Vec<Diff> {
    let mut ids: Vec<&String> = snapshot_a.keys().collect();
    for id in snapshot_b.keys() {
        if !snapshot_a.contains_key(id) {
            ids.push(id);
        }
    }
    ids.sort();

    let mut diffs = Vec::new();
    for id in ids {
        let record_a = snapshot_a.get(id);
        let record_b = snapshot_b.get(id);

        for field in DiffField::ALL {
            let value_a = record_a.map(|r| field_value(r, field));
            let value_b = record_b.map(|r| field_value(r, field));
            if value_a != value_b {
                diffs.push(Diff {
                    criterion_id: id.clone(),
                    field,
                    value_a,
                    value_b,
                });
            }
        }
    }
    diffs
}
