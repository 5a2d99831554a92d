// Acrd - Versioned Conformance Report Engine
// Entity model, scoring, verification workflow, and append-only version
// history behind WCAG/Section 508 Accessibility Conformance Reports

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod resolver;
pub mod scoring;
pub mod services;
pub mod store;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use config::AcrConfig;
pub use errors::{AcrError, AcrResult};
pub use models::{
    Attribution, ConformanceLevel, CriterionPatch, CriterionRecord, Report, ReportVersion,
    Summary, VerificationEntry, VerificationStatus, VersionStatus, WcagLevel,
};
pub use resolver::{classify, ResolverConfig, AUTO_APPLY_NA_THRESHOLD};
pub use scoring::compute_summary;
pub use services::{ReportService, ReportState};
pub use store::ReportStore;
