//! File-backed report store
//!
//! Durable state lives under `<workspace>/acrd/reports/<report-id>/`:
//!
//! ```text
//! acrd/reports/acme-portal/
//!   report.json            live CriterionRecord store + metadata
//!   versions/v0001.json    immutable snapshots, one file per version
//!   versions/v0002.json
//! ```
//!
//! Live-state writes go through a temp file + rename so a crash never leaves
//! a half-written `report.json`. Version files are staged in a temp file and
//! published with a hard link, which doubles as the optimistic
//! version-counter check: two writers racing to the same version number
//! produce one winner and one `Concurrency` error the caller may retry.
//!
//! `is_latest` is derived from the highest on-disk version number at read
//! time rather than trusted from file contents; snapshot and summary bytes
//! are never rewritten after creation.

use crate::errors::{AcrError, AcrResult};
use crate::models::{Report, ReportVersion, VersionListing};
use std::io::Write;
use std::path::PathBuf;

/// Handle to the reports directory of one workspace
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Open (without creating) the store for a workspace root
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            root: workspace_root.into().join("acrd/reports"),
        }
    }

    /// Directory holding one report
    pub fn report_dir(&self, report_id: &str) -> PathBuf {
        self.root.join(report_id)
    }

    fn report_path(&self, report_id: &str) -> PathBuf {
        self.report_dir(report_id).join("report.json")
    }

    fn versions_dir(&self, report_id: &str) -> PathBuf {
        self.report_dir(report_id).join("versions")
    }

    fn version_path(&self, report_id: &str, version_number: u32) -> PathBuf {
        self.versions_dir(report_id)
            .join(format!("v{:04}.json", version_number))
    }

    /// True when the report exists on disk
    pub fn exists(&self, report_id: &str) -> bool {
        self.report_path(report_id).exists()
    }

    /// Ids of all reports in the workspace, sorted
    pub fn list_reports(&self) -> AcrResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
        {
            if entry.path().join("report.json").exists() {
                if let Some(name) = entry.file_name().to_str() {
                    ids.push(name.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    // =========================================================================
    // Live report state
    // =========================================================================

    /// Load the live state of a report
    pub fn load_report(&self, report_id: &str) -> AcrResult<Report> {
        let path = self.report_path(report_id);
        if !path.exists() {
            return Err(AcrError::not_found(format!("report '{}'", report_id)));
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist the live state of a report (temp file + rename)
    pub fn save_report(&self, report: &Report) -> AcrResult<()> {
        let dir = self.report_dir(&report.id);
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(report)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(self.report_path(&report.id))
            .map_err(|e| AcrError::Io(e.error))?;
        Ok(())
    }

    /// Create a brand-new report; fails if the id is already taken
    pub fn create_report(&self, report: &Report) -> AcrResult<()> {
        if self.exists(&report.id) {
            return Err(AcrError::validation(format!(
                "report '{}' already exists",
                report.id
            )));
        }
        self.save_report(report)
    }

    // =========================================================================
    // Versions
    // =========================================================================

    /// Highest version number on disk, 0 when no versions exist
    pub fn max_version_number(&self, report_id: &str) -> AcrResult<u32> {
        let dir = self.versions_dir(report_id);
        if !dir.exists() {
            return Ok(0);
        }

        let mut max = 0;
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(n) = parse_version_filename(&entry.file_name().to_string_lossy()) {
                max = max.max(n);
            }
        }
        Ok(max)
    }

    /// Write a new version file
    ///
    /// The payload is staged in a temp file and published with a hard link,
    /// so an interrupted writer never leaves a partial `vNNNN.json` claiming
    /// its number. The link fails with `AlreadyExists` when a concurrent
    /// writer already claimed this version number, surfacing as a retryable
    /// `Concurrency` error.
    pub fn write_version(&self, version: &ReportVersion) -> AcrResult<()> {
        let dir = self.versions_dir(&version.report_id);
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(version)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;

        let path = self.version_path(&version.report_id, version.version_number);
        match std::fs::hard_link(temp.path(), &path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(AcrError::Concurrency(format!(
                    "version {} of report '{}' was created by another writer",
                    version.version_number, version.report_id
                )))
            }
            Err(e) => Err(e.into()),
        }
        // temp is dropped here, unlinking the staging file
    }

    /// Load one version in full, verifying its snapshot checksum
    pub fn load_version(&self, report_id: &str, version_number: u32) -> AcrResult<ReportVersion> {
        let path = self.version_path(report_id, version_number);
        if !path.exists() {
            return Err(AcrError::not_found(format!(
                "version {} of report '{}'",
                version_number, report_id
            )));
        }

        let content = std::fs::read_to_string(&path)?;
        let mut version: ReportVersion = serde_json::from_str(&content)?;

        if !version.checksum_valid() {
            return Err(AcrError::validation(format!(
                "version {} of report '{}' failed its snapshot checksum; history has been tampered with",
                version_number, report_id
            )));
        }

        version.is_latest = version.version_number == self.max_version_number(report_id)?;
        Ok(version)
    }

    /// All versions of a report as summary-only listings, newest first
    ///
    /// Deserializes straight into `VersionListing` so history stays cheap
    /// regardless of snapshot size; full snapshot reads and checksum
    /// verification happen in `load_version`.
    pub fn list_versions(&self, report_id: &str) -> AcrResult<Vec<VersionListing>> {
        if !self.exists(report_id) {
            return Err(AcrError::not_found(format!("report '{}'", report_id)));
        }

        let max = self.max_version_number(report_id)?;
        let mut listings = Vec::with_capacity(max as usize);
        for n in (1..=max).rev() {
            let content = std::fs::read_to_string(self.version_path(report_id, n))?;
            let mut listing: VersionListing = serde_json::from_str(&content)?;
            listing.is_latest = n == max;
            listings.push(listing);
        }
        Ok(listings)
    }
}

fn parse_version_filename(name: &str) -> Option<u32> {
    name.strip_prefix('v')?
        .strip_suffix(".json")?
        .parse::<u32>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConformanceLevel, CriterionRecord, Report, ReportVersion, Summary, VersionStatus,
        WcagLevel,
    };
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn sample_report(id: &str) -> Report {
        let mut report = Report::new(id, "Test Report", "WCAG 2.1", "tester");
        let record = CriterionRecord::new("1.1.1", WcagLevel::A, ConformanceLevel::Supports);
        report.criteria.insert("1.1.1".to_string(), record);
        report
    }

    fn sample_version(report: &Report, number: u32) -> ReportVersion {
        let snapshot: BTreeMap<_, _> = report.criteria.clone();
        ReportVersion {
            report_id: report.id.clone(),
            version_number: number,
            status: VersionStatus::InProgress,
            reason: None,
            restored_from: None,
            created_at: chrono::Utc::now(),
            created_by: "tester".to_string(),
            is_latest: true,
            summary: Summary::default(),
            snapshot_checksum: ReportVersion::checksum_of(&snapshot),
            criteria_snapshot: snapshot,
        }
    }

    #[test]
    fn test_report_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");

        store.create_report(&report).unwrap();
        let loaded = store.load_report("demo").unwrap();

        assert_eq!(loaded.id, "demo");
        assert_eq!(loaded.criteria.len(), 1);
    }

    #[test]
    fn test_create_duplicate_rejected() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");

        store.create_report(&report).unwrap();
        assert!(matches!(
            store.create_report(&report),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_report() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        assert!(matches!(
            store.load_report("ghost"),
            Err(AcrError::NotFound(_))
        ));
    }

    #[test]
    fn test_version_write_and_load() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();

        store.write_version(&sample_version(&report, 1)).unwrap();
        assert_eq!(store.max_version_number("demo").unwrap(), 1);

        let loaded = store.load_version("demo", 1).unwrap();
        assert_eq!(loaded.version_number, 1);
        assert!(loaded.is_latest);
    }

    #[test]
    fn test_duplicate_version_number_is_concurrency_error() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();

        store.write_version(&sample_version(&report, 1)).unwrap();
        assert!(matches!(
            store.write_version(&sample_version(&report, 1)),
            Err(AcrError::Concurrency(_))
        ));
    }

    #[test]
    fn test_interrupted_write_never_claims_a_version_number() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();
        store.write_version(&sample_version(&report, 1)).unwrap();

        // A writer that died mid-write leaves only its unpublished staging
        // file behind, never a partial vNNNN.json
        let dir = temp.path().join("acrd/reports/demo/versions");
        std::fs::write(dir.join(".tmpQx3b1z"), "{\"report_id\":\"demo\",\"ver").unwrap();

        // The leftover claims no version number and poisons no reads
        assert_eq!(store.max_version_number("demo").unwrap(), 1);
        store.write_version(&sample_version(&report, 2)).unwrap();

        let numbers: Vec<u32> = store
            .list_versions("demo")
            .unwrap()
            .iter()
            .map(|l| l.version_number)
            .collect();
        assert_eq!(numbers, vec![2, 1]);
        assert!(store.load_version("demo", 2).unwrap().is_latest);
    }

    #[test]
    fn test_is_latest_derived_not_trusted() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();

        store.write_version(&sample_version(&report, 1)).unwrap();
        store.write_version(&sample_version(&report, 2)).unwrap();

        // v1 was written with is_latest=true but reads recompute it
        assert!(!store.load_version("demo", 1).unwrap().is_latest);
        assert!(store.load_version("demo", 2).unwrap().is_latest);
    }

    #[test]
    fn test_tampered_snapshot_rejected() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();
        store.write_version(&sample_version(&report, 1)).unwrap();

        // Hand-edit the stored snapshot
        let path = temp.path().join("acrd/reports/demo/versions/v0001.json");
        let content = std::fs::read_to_string(&path).unwrap();
        let tampered = content.replace("\"supports\"", "\"does_not_support\"");
        assert_ne!(content, tampered);
        std::fs::write(&path, tampered).unwrap();

        assert!(matches!(
            store.load_version("demo", 1),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_list_versions_descending() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();

        for n in 1..=3 {
            store.write_version(&sample_version(&report, n)).unwrap();
        }

        let listings = store.list_versions("demo").unwrap();
        let numbers: Vec<u32> = listings.iter().map(|l| l.version_number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
        assert!(listings[0].is_latest);
        assert!(!listings[1].is_latest);
    }

    #[test]
    fn test_listings_skip_snapshot_verification() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        let report = sample_report("demo");
        store.create_report(&report).unwrap();
        store.write_version(&sample_version(&report, 1)).unwrap();

        let path = temp.path().join("acrd/reports/demo/versions/v0001.json");
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, content.replace("\"supports\"", "\"does_not_support\"")).unwrap();

        // History rows never read the snapshot, so a tamper only surfaces
        // on the full version load
        assert_eq!(store.list_versions("demo").unwrap().len(), 1);
        assert!(matches!(
            store.load_version("demo", 1),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_list_reports() {
        let temp = TempDir::new().unwrap();
        let store = ReportStore::new(temp.path());
        store.create_report(&sample_report("beta")).unwrap();
        store.create_report(&sample_report("alpha")).unwrap();

        assert_eq!(store.list_reports().unwrap(), vec!["alpha", "beta"]);
    }
}
