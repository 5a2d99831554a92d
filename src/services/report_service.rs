//! Report service - the facade external layers call
//!
//! CLI commands and HTTP handlers both go through this service so the two
//! surfaces cannot drift apart. Everything here is synchronous with respect
//! to the model's own state; serializing concurrent writers per report is
//! the persistence layer's optimistic check (see the store).

use crate::errors::{AcrError, AcrResult};
use crate::models::{
    diff_snapshots, CriterionPatch, CriterionRecord, Diff, Report, ReportVersion, Summary,
    VerificationEntry, VersionListing, VersionStatus,
};
use crate::resolver::ResolverConfig;
use crate::scoring::{compute_summary, is_inconsistent_na};
use crate::services::verification_service::{self, SubmitVerificationInput};
use crate::store::ReportStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current state of a report plus its derived summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportState {
    pub report: Report,
    pub summary: Summary,
    /// Criteria whose editable conformance level says NA without the NA
    /// suggestion backing it up; flagged for product owners, counted as
    /// failed by the aggregator
    pub inconsistent_na: Vec<String>,
}

/// Facade over the criterion store, verification workflow, aggregator, and
/// version engine for one workspace
#[derive(Debug, Clone)]
pub struct ReportService {
    store: ReportStore,
    resolver: ResolverConfig,
}

impl ReportService {
    pub fn new(store: ReportStore, resolver: ResolverConfig) -> Self {
        Self { store, resolver }
    }

    /// The underlying store (used by intake to create reports)
    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Resolver thresholds in effect for this workspace
    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }

    /// Ids of all reports in the workspace
    pub fn list_reports(&self) -> AcrResult<Vec<String>> {
        self.store.list_reports()
    }

    /// Live state plus derived summary and consistency flags
    pub fn get_current_state(&self, report_id: &str) -> AcrResult<ReportState> {
        let report = self.store.load_report(report_id)?;
        let summary = compute_summary(report.records(), &self.resolver);
        let inconsistent_na = report
            .records()
            .filter(|r| is_inconsistent_na(r, &self.resolver))
            .map(|r| r.criterion_id.clone())
            .collect();

        Ok(ReportState {
            report,
            summary,
            inconsistent_na,
        })
    }

    /// Apply a human edit to a criterion's editable fields
    ///
    /// Does not snapshot; versions are created only on explicit save or
    /// restore. A human edit to conformance level or remarks always flips
    /// attribution to HUMAN-VERIFIED.
    pub fn update_criterion(
        &self,
        report_id: &str,
        criterion_id: &str,
        patch: CriterionPatch,
    ) -> AcrResult<CriterionRecord> {
        if patch.is_empty() {
            return Err(AcrError::validation(
                "patch must set conformance_level or remarks",
            ));
        }

        let mut report = self.store.load_report(report_id)?;
        let record = report
            .criteria
            .get_mut(criterion_id)
            .ok_or_else(|| AcrError::not_found(format!("criterion '{}'", criterion_id)))?;

        if let Some(level) = patch.conformance_level {
            record.conformance_level = level;
        }
        if let Some(remarks) = patch.remarks {
            record.remarks = remarks;
        }
        record.attribution = crate::models::Attribution::HumanVerified;

        let updated = record.clone();
        report.touch();
        self.store.save_report(&report)?;
        Ok(updated)
    }

    /// Record a manual verification round (delegates to the state machine)
    pub fn submit_verification(
        &self,
        report_id: &str,
        input: SubmitVerificationInput,
    ) -> AcrResult<VerificationEntry> {
        let mut report = self.store.load_report(report_id)?;
        let entry = verification_service::submit_verification(&mut report, input)?;
        self.store.save_report(&report)?;
        Ok(entry)
    }

    /// Snapshot the current live state as the next version
    ///
    /// Version numbers are gapless and strictly increasing from 1. The
    /// snapshot freezes a deep copy of every criterion record plus the
    /// derived summary; the live state is not modified.
    pub fn save_version(
        &self,
        report_id: &str,
        status: VersionStatus,
        reason: Option<String>,
        created_by: &str,
    ) -> AcrResult<ReportVersion> {
        self.create_version(report_id, status, reason, None, created_by)
    }

    fn create_version(
        &self,
        report_id: &str,
        status: VersionStatus,
        reason: Option<String>,
        restored_from: Option<u32>,
        created_by: &str,
    ) -> AcrResult<ReportVersion> {
        let report = self.store.load_report(report_id)?;
        if report.criteria.is_empty() {
            return Err(AcrError::EmptyReport(format!(
                "report '{}' has no criteria to snapshot",
                report_id
            )));
        }

        let summary = compute_summary(report.records(), &self.resolver);
        let snapshot = report.criteria.clone();
        let version = ReportVersion {
            report_id: report.id.clone(),
            version_number: self.store.max_version_number(report_id)? + 1,
            status,
            reason,
            restored_from,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
            is_latest: true,
            summary,
            snapshot_checksum: ReportVersion::checksum_of(&snapshot),
            criteria_snapshot: snapshot,
        };

        self.store.write_version(&version)?;
        Ok(version)
    }

    /// All versions, newest first, summary fields only
    pub fn get_version_history(&self, report_id: &str) -> AcrResult<Vec<VersionListing>> {
        self.store.list_versions(report_id)
    }

    /// One version with its full frozen snapshot
    pub fn get_version_detail(
        &self,
        report_id: &str,
        version_number: u32,
    ) -> AcrResult<ReportVersion> {
        self.store.load_version(report_id, version_number)
    }

    /// Field-level differences between two versions
    ///
    /// A/B order is the caller's; swapping the arguments swaps the values.
    pub fn compare_versions(
        &self,
        report_id: &str,
        version_a: u32,
        version_b: u32,
    ) -> AcrResult<Vec<Diff>> {
        let a = self.store.load_version(report_id, version_a)?;
        let b = self.store.load_version(report_id, version_b)?;
        Ok(diff_snapshots(&a.criteria_snapshot, &b.criteria_snapshot))
    }

    /// Restore a prior version's content as a brand-new version
    ///
    /// Copies the target's frozen snapshot onto the live store, then
    /// snapshots that as version N+1. The target version itself is never
    /// mutated or promoted; an unknown target fails before any live-state
    /// mutation.
    pub fn restore_version(
        &self,
        report_id: &str,
        target_version: u32,
        created_by: &str,
    ) -> AcrResult<ReportVersion> {
        let target = self.store.load_version(report_id, target_version)?;
        let mut report = self.store.load_report(report_id)?;

        report.criteria = target.criteria_snapshot.clone();
        report.touch();
        self.store.save_report(&report)?;

        self.create_version(
            report_id,
            VersionStatus::InProgress,
            Some(format!("restored from v{}", target_version)),
            Some(target_version),
            created_by,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribution, ConformanceLevel, CriterionRecord, WcagLevel};
    use crate::models::VerificationStatus;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ReportService {
        ReportService::new(ReportStore::new(temp.path()), ResolverConfig::default())
    }

    fn seed(service: &ReportService, levels: &[(&str, ConformanceLevel)]) {
        let mut report = Report::new("demo", "Demo", "WCAG 2.1", "tester");
        for (id, level) in levels {
            report
                .criteria
                .insert(id.to_string(), CriterionRecord::new(*id, WcagLevel::A, *level));
        }
        service.store().create_report(&report).unwrap();
    }

    #[test]
    fn test_get_current_state_summary() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(
            &service,
            &[
                ("1.1.1", ConformanceLevel::Supports),
                ("1.2.1", ConformanceLevel::DoesNotSupport),
            ],
        );

        let state = service.get_current_state("demo").unwrap();
        assert_eq!(state.summary.total, 2);
        assert_eq!(state.summary.passed, 1);
        assert_eq!(state.summary.failed, 1);
        assert_eq!(state.summary.conformance_percentage(), 50);
        assert!(state.inconsistent_na.is_empty());
    }

    #[test]
    fn test_inconsistent_na_flagged() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::NotApplicable)]);

        let state = service.get_current_state("demo").unwrap();
        assert_eq!(state.inconsistent_na, vec!["1.1.1"]);
        assert_eq!(state.summary.failed, 1);
    }

    #[test]
    fn test_update_criterion_flips_attribution() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::DoesNotSupport)]);

        let updated = service
            .update_criterion(
                "demo",
                "1.1.1",
                CriterionPatch {
                    conformance_level: Some(ConformanceLevel::Supports),
                    remarks: Some("alt text added".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated.conformance_level, ConformanceLevel::Supports);
        assert_eq!(updated.attribution, Attribution::HumanVerified);

        // Persisted, and no version was auto-created
        let state = service.get_current_state("demo").unwrap();
        assert_eq!(
            state.report.criterion("1.1.1").unwrap().remarks,
            "alt text added"
        );
        assert_eq!(service.store().max_version_number("demo").unwrap(), 0);
    }

    #[test]
    fn test_update_criterion_empty_patch() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::Supports)]);

        assert!(matches!(
            service.update_criterion("demo", "1.1.1", CriterionPatch::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_update_unknown_criterion() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::Supports)]);

        let patch = CriterionPatch {
            conformance_level: Some(ConformanceLevel::Supports),
            remarks: None,
        };
        assert!(matches!(
            service.update_criterion("demo", "9.9.9", patch),
            Err(AcrError::NotFound(_))
        ));
    }

    #[test]
    fn test_version_numbers_gapless_from_one() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::Supports)]);

        for expected in 1..=3 {
            let version = service
                .save_version("demo", VersionStatus::InProgress, None, "tester")
                .unwrap();
            assert_eq!(version.version_number, expected);
        }

        let history = service.get_version_history("demo").unwrap();
        let numbers: Vec<u32> = history.iter().map(|v| v.version_number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
    }

    #[test]
    fn test_save_version_freezes_summary() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::DoesNotSupport)]);

        let v1 = service
            .save_version("demo", VersionStatus::InProgress, None, "tester")
            .unwrap();
        assert_eq!(v1.summary.failed, 1);

        // Later edits do not touch the frozen summary
        service
            .update_criterion(
                "demo",
                "1.1.1",
                CriterionPatch {
                    conformance_level: Some(ConformanceLevel::Supports),
                    remarks: None,
                },
            )
            .unwrap();

        let reread = service.get_version_detail("demo", 1).unwrap();
        assert_eq!(reread.summary.failed, 1);
        assert_eq!(
            reread
                .criteria_snapshot
                .get("1.1.1")
                .unwrap()
                .conformance_level,
            ConformanceLevel::DoesNotSupport
        );
    }

    #[test]
    fn test_save_version_empty_report() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[]);

        assert!(matches!(
            service.save_version("demo", VersionStatus::InProgress, None, "tester"),
            Err(AcrError::EmptyReport(_))
        ));
    }

    #[test]
    fn test_compare_versions_two_edits() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(
            &service,
            &[
                ("1.1.1", ConformanceLevel::DoesNotSupport),
                ("1.2.1", ConformanceLevel::DoesNotSupport),
                ("1.3.1", ConformanceLevel::Supports),
            ],
        );
        service
            .save_version("demo", VersionStatus::InProgress, None, "tester")
            .unwrap();

        for id in ["1.1.1", "1.2.1"] {
            service
                .update_criterion(
                    "demo",
                    id,
                    CriterionPatch {
                        conformance_level: Some(ConformanceLevel::Supports),
                        remarks: None,
                    },
                )
                .unwrap();
        }
        service
            .save_version("demo", VersionStatus::InProgress, None, "tester")
            .unwrap();

        let diffs = service.compare_versions("demo", 1, 2).unwrap();
        // attribution also flipped on edit, so two fields per criterion
        let conformance_diffs: Vec<_> = diffs
            .iter()
            .filter(|d| d.field == crate::models::DiffField::ConformanceLevel)
            .collect();
        assert_eq!(conformance_diffs.len(), 2);
        assert!(diffs.iter().all(|d| d.criterion_id != "1.3.1"));
    }

    #[test]
    fn test_restore_creates_new_version() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::DoesNotSupport)]);

        service
            .save_version("demo", VersionStatus::InProgress, None, "tester")
            .unwrap();

        service
            .update_criterion(
                "demo",
                "1.1.1",
                CriterionPatch {
                    conformance_level: Some(ConformanceLevel::Supports),
                    remarks: None,
                },
            )
            .unwrap();
        service
            .save_version("demo", VersionStatus::InProgress, None, "tester")
            .unwrap();

        let restored = service.restore_version("demo", 1, "tester").unwrap();
        assert_eq!(restored.version_number, 3);
        assert_eq!(restored.restored_from, Some(1));
        assert_eq!(restored.status, VersionStatus::InProgress);

        // New version's snapshot deep-equals the target's
        let v1 = service.get_version_detail("demo", 1).unwrap();
        assert_eq!(restored.criteria_snapshot, v1.criteria_snapshot);
        assert_eq!(restored.snapshot_checksum, v1.snapshot_checksum);

        // Live state was overwritten with the restored content
        let state = service.get_current_state("demo").unwrap();
        assert_eq!(
            state.report.criterion("1.1.1").unwrap().conformance_level,
            ConformanceLevel::DoesNotSupport
        );

        // Target version untouched, and only the newest version is latest
        assert!(!service.get_version_detail("demo", 1).unwrap().is_latest);
        assert!(service.get_version_detail("demo", 3).unwrap().is_latest);
    }

    #[test]
    fn test_restore_unknown_target_no_mutation() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::Supports)]);

        let before = service.get_current_state("demo").unwrap();
        assert!(matches!(
            service.restore_version("demo", 7, "tester"),
            Err(AcrError::NotFound(_))
        ));

        let after = service.get_current_state("demo").unwrap();
        assert_eq!(before.report.criteria, after.report.criteria);
        assert_eq!(service.store().max_version_number("demo").unwrap(), 0);
    }

    #[test]
    fn test_submit_verification_persists() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        seed(&service, &[("1.1.1", ConformanceLevel::DoesNotSupport)]);

        service
            .submit_verification(
                "demo",
                SubmitVerificationInput {
                    criterion_id: "1.1.1".to_string(),
                    status: VerificationStatus::VerifiedFail,
                    method: "Manual Review".to_string(),
                    notes: "missing alt text on hero image".to_string(),
                    verified_by: "reviewer".to_string(),
                },
            )
            .unwrap();

        let state = service.get_current_state("demo").unwrap();
        let record = state.report.criterion("1.1.1").unwrap();
        assert_eq!(record.verification.len(), 1);
        assert_eq!(record.attribution, Attribution::HumanVerified);
    }
}
