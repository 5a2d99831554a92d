use serde::{Deserialize, Serialize};

/// Derived conformance counts for a set of criterion records
///
/// Computed by the score aggregator and frozen into every version snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    /// All criteria in the report
    pub total: usize,

    /// Criteria the resolver classifies as applicable
    pub applicable: usize,

    /// Applicable criteria at `supports`
    pub passed: usize,

    /// Applicable criteria at `does_not_support`, plus applicable criteria
    /// carrying a stale `not_applicable` conformance level
    pub failed: usize,

    /// Applicable criteria at `partially_supports`
    pub partially_passed: usize,

    /// Criteria the resolver classifies as not applicable
    pub na: usize,
}

impl Summary {
    /// Conformance percentage: passed over applicable, rounded to the
    /// nearest integer. Defined as 0 (not an error) when nothing applies.
    pub fn conformance_percentage(&self) -> u32 {
        if self.applicable == 0 {
            return 0;
        }
        (self.passed as f64 / self.applicable as f64 * 100.0).round() as u32
    }
}
