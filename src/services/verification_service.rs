//! Verification service - per-criterion manual verification workflow
//!
//! Every status may transition to every other status; re-verification is
//! always allowed and nothing is terminal. Recording a verification appends
//! to history and flips attribution to HUMAN-VERIFIED, but never changes the
//! conformance level: verification records an assessment, the conformance
//! level records the authoritative published state. Callers that want one to
//! drive the other issue both calls.

use crate::errors::{AcrError, AcrResult};
use crate::models::{Attribution, Report, VerificationEntry, VerificationStatus};

/// Input structure for recording a verification
#[derive(Debug, Clone)]
pub struct SubmitVerificationInput {
    pub criterion_id: String,
    pub status: VerificationStatus,
    pub method: String,
    pub notes: String,
    pub verified_by: String,
}

/// Record one verification round against a criterion
///
/// Preconditions are checked before any mutation, so a rejected submission
/// leaves the report untouched.
pub fn submit_verification(
    report: &mut Report,
    input: SubmitVerificationInput,
) -> AcrResult<VerificationEntry> {
    if input.status.requires_notes() && input.notes.trim().is_empty() {
        return Err(AcrError::validation(
            "notes required for fail/partial status",
        ));
    }
    if input.method.trim().is_empty() {
        return Err(AcrError::validation("verification method is required"));
    }

    let record = report
        .criteria
        .get_mut(&input.criterion_id)
        .ok_or_else(|| AcrError::not_found(format!("criterion '{}'", input.criterion_id)))?;

    let entry = VerificationEntry::new(
        input.status,
        input.method,
        input.notes,
        input.verified_by,
    );
    record.verification.push(entry.clone());
    record.attribution = Attribution::HumanVerified;
    report.touch();

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConformanceLevel, CriterionRecord, WcagLevel};

    fn report_with_criterion(id: &str) -> Report {
        let mut report = Report::new("demo", "Demo", "WCAG 2.1", "tester");
        report.criteria.insert(
            id.to_string(),
            CriterionRecord::new(id, WcagLevel::A, ConformanceLevel::DoesNotSupport),
        );
        report
    }

    fn input(status: VerificationStatus, notes: &str) -> SubmitVerificationInput {
        SubmitVerificationInput {
            criterion_id: "1.1.1".to_string(),
            status,
            method: "Manual Review".to_string(),
            notes: notes.to_string(),
            verified_by: "reviewer".to_string(),
        }
    }

    #[test]
    fn test_submit_appends_and_flips_attribution() {
        let mut report = report_with_criterion("1.1.1");

        let entry =
            submit_verification(&mut report, input(VerificationStatus::VerifiedPass, "")).unwrap();
        assert_eq!(entry.status, VerificationStatus::VerifiedPass);

        let record = report.criterion("1.1.1").unwrap();
        assert_eq!(record.verification.len(), 1);
        assert_eq!(record.attribution, Attribution::HumanVerified);
        // Verification never edits the conformance level
        assert_eq!(record.conformance_level, ConformanceLevel::DoesNotSupport);
    }

    #[test]
    fn test_empty_notes_on_fail_rejected_before_mutation() {
        let mut report = report_with_criterion("1.1.1");

        let result = submit_verification(&mut report, input(VerificationStatus::VerifiedFail, ""));
        assert!(matches!(result, Err(AcrError::Validation(_))));

        // No partial writes
        let record = report.criterion("1.1.1").unwrap();
        assert!(record.verification.is_empty());
        assert_eq!(record.attribution, Attribution::Automated);
    }

    #[test]
    fn test_whitespace_notes_on_partial_rejected() {
        let mut report = report_with_criterion("1.1.1");
        let result = submit_verification(
            &mut report,
            input(VerificationStatus::VerifiedPartial, "   "),
        );
        assert!(matches!(result, Err(AcrError::Validation(_))));
    }

    #[test]
    fn test_unknown_criterion() {
        let mut report = report_with_criterion("1.1.1");
        let mut bad = input(VerificationStatus::VerifiedPass, "");
        bad.criterion_id = "9.9.9".to_string();
        assert!(matches!(
            submit_verification(&mut report, bad),
            Err(AcrError::NotFound(_))
        ));
    }

    #[test]
    fn test_reverification_always_allowed() {
        let mut report = report_with_criterion("1.1.1");

        // pass -> fail -> deferred -> pass: no transition is refused
        submit_verification(&mut report, input(VerificationStatus::VerifiedPass, "")).unwrap();
        submit_verification(
            &mut report,
            input(VerificationStatus::VerifiedFail, "focus trap in dialog"),
        )
        .unwrap();
        submit_verification(&mut report, input(VerificationStatus::Deferred, "")).unwrap();
        submit_verification(&mut report, input(VerificationStatus::VerifiedPass, "")).unwrap();

        let record = report.criterion("1.1.1").unwrap();
        assert_eq!(record.verification.len(), 4);
        // Latest entry is the current status
        assert_eq!(record.verification_status(), VerificationStatus::VerifiedPass);
        // History keeps every prior entry in order
        assert_eq!(
            record.verification[1].status,
            VerificationStatus::VerifiedFail
        );
    }
}
