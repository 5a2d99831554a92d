//! Service layer for acrd
//!
//! Business logic shared between the CLI commands and the HTTP API so the
//! two surfaces stay consistent. The report service is the facade external
//! layers call; intake and verification carry the creation and workflow
//! rules it delegates to.

pub mod intake_service;
pub mod report_service;
pub mod verification_service;

// Re-export commonly used types
pub use intake_service::{build_report, seed_from_catalog, CreateReportInput, CriterionIntake};
pub use report_service::{ReportService, ReportState};
pub use verification_service::{submit_verification, SubmitVerificationInput};
