//! Score aggregation
//!
//! Partitions criterion records into NA and applicable via the resolver, then
//! counts applicable records by conformance level. A record whose editable
//! conformance level says `not_applicable` while the resolver classifies it
//! as applicable is stale state; it counts as failed so inconsistent data
//! degrades the score instead of inflating it.

use crate::models::{ConformanceLevel, CriterionRecord, Summary};
use crate::resolver::{classify, ResolverConfig};

/// Compute the derived summary for a set of criterion records
///
/// An empty slice yields an all-zero summary (and percentage 0), not an
/// error; refusing to snapshot an empty report is the version engine's job.
pub fn compute_summary<'a, I>(records: I, config: &ResolverConfig) -> Summary
where
    I: IntoIterator<Item = &'a CriterionRecord>,
{
    let mut summary = Summary::default();

    for record in records {
        summary.total += 1;

        if !classify(record, config).is_applicable {
            summary.na += 1;
            continue;
        }

        summary.applicable += 1;
        match record.conformance_level {
            ConformanceLevel::Supports => summary.passed += 1,
            ConformanceLevel::PartiallySupports => summary.partially_passed += 1,
            ConformanceLevel::DoesNotSupport => summary.failed += 1,
            // Stale NA on an applicable record
            ConformanceLevel::NotApplicable => summary.failed += 1,
        }
    }

    summary
}

/// True when a record carries the stale-NA inconsistency: the editable
/// conformance level says not applicable but the resolver does not
pub fn is_inconsistent_na(record: &CriterionRecord, config: &ResolverConfig) -> bool {
    record.conformance_level == ConformanceLevel::NotApplicable
        && classify(record, config).is_applicable
}
