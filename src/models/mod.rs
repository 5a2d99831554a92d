pub mod criterion;
pub mod diff;
pub mod report;
pub mod summary;
pub mod verification;
pub mod version;

pub use criterion::{
    Attribution, ConformanceLevel, CriterionPatch, CriterionRecord, NaSuggestion, WcagLevel,
};
pub use diff::{diff_snapshots, Diff, DiffField};
pub use report::Report;
pub use summary::Summary;
pub use verification::{VerificationEntry, VerificationStatus};
pub use version::{ReportVersion, VersionListing, VersionStatus};
