//! Intake service - builds a report from an audit payload
//!
//! The external audit/AI service supplies per-criterion conformance levels,
//! confidence scores, and NA suggestions at report creation/regeneration
//! time. Intake is the one place malformed confidence values are rejected;
//! nothing downstream clamps or repairs them. The criterion id set fixed
//! here never changes for the life of the report.

use crate::catalog;
use crate::errors::{AcrError, AcrResult};
use crate::models::{
    Attribution, ConformanceLevel, CriterionRecord, NaSuggestion, Report, WcagLevel,
};
use crate::resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn criterion_id_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| regex::Regex::new(r"^\d+\.\d+\.\d+$").expect("valid pattern"))
}

/// One criterion as delivered by the audit service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionIntake {
    pub criterion_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub wcag_level: WcagLevel,
    pub conformance_level: ConformanceLevel,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub na_suggestion: Option<NaSuggestion>,
}

/// Input structure for creating a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportInput {
    /// Report id (lowercase alphanumeric with hyphens)
    pub report_id: String,
    pub title: String,
    #[serde(default)]
    pub product: Option<String>,
    /// Guideline edition; defaults to "WCAG 2.1"
    #[serde(default)]
    pub wcag_edition: Option<String>,
    pub criteria: Vec<CriterionIntake>,
    /// When true (the default), NA suggestions at or above the auto-apply
    /// threshold are accepted without human review
    #[serde(default = "default_auto_apply")]
    pub auto_apply_na: bool,
}

fn default_auto_apply() -> bool {
    true
}

/// Build a report from an audit payload, with validation
pub fn build_report(
    input: CreateReportInput,
    created_by: &str,
    resolver: &ResolverConfig,
) -> AcrResult<Report> {
    if !input
        .report_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        || input.report_id.is_empty()
    {
        return Err(AcrError::validation(
            "report_id must be lowercase alphanumeric with hyphens only",
        ));
    }

    if input.criteria.is_empty() {
        return Err(AcrError::validation("at least one criterion is required"));
    }

    let edition = input.wcag_edition.unwrap_or_else(|| "WCAG 2.1".to_string());
    let mut report = Report::new(&input.report_id, input.title, edition, created_by);
    report.product = input.product;

    for intake in input.criteria {
        let record = build_record(intake, input.auto_apply_na, resolver)?;
        if report
            .criteria
            .insert(record.criterion_id.clone(), record)
            .is_some()
        {
            return Err(AcrError::validation("duplicate criterion id in payload"));
        }
    }

    Ok(report)
}

fn build_record(
    intake: CriterionIntake,
    auto_apply_na: bool,
    resolver: &ResolverConfig,
) -> AcrResult<CriterionRecord> {
    if !criterion_id_pattern().is_match(&intake.criterion_id) {
        return Err(AcrError::validation(format!(
            "invalid criterion id '{}' (expected e.g. \"1.4.3\")",
            intake.criterion_id
        )));
    }

    if let Some(score) = intake.confidence_score {
        validate_confidence(&intake.criterion_id, "confidence_score", score)?;
    }
    if let Some(suggestion) = &intake.na_suggestion {
        validate_confidence(&intake.criterion_id, "na_suggestion.confidence", suggestion.confidence)?;
    }

    let mut record = CriterionRecord::new(
        intake.criterion_id.clone(),
        intake.wcag_level,
        intake.conformance_level,
    );
    record.name = intake
        .name
        .or_else(|| catalog::lookup(&intake.criterion_id).map(|e| e.name.to_string()));
    record.remarks = intake.remarks.unwrap_or_default();
    record.confidence_score = intake.confidence_score;

    if let Some(suggestion) = intake.na_suggestion {
        let accept = auto_apply_na
            && suggestion.suggested_status == ConformanceLevel::NotApplicable
            && resolver.may_auto_apply(&suggestion);
        record.attribution = Attribution::AiSuggested;
        if accept {
            record.conformance_level = ConformanceLevel::NotApplicable;
        }
        record.na_suggestion = Some(suggestion);
    }

    Ok(record)
}

fn validate_confidence(criterion_id: &str, field: &str, value: f64) -> AcrResult<()> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(AcrError::validation(format!(
            "criterion '{}': {} must be within [0,1], got {}",
            criterion_id, field, value
        )));
    }
    Ok(())
}

/// Seed a report from the built-in WCAG 2.1 catalog
///
/// Every criterion starts at `does_not_support` with AUTOMATED attribution,
/// ready for audit results or manual assessment.
pub fn seed_from_catalog(
    report_id: &str,
    title: &str,
    created_by: &str,
) -> AcrResult<Report> {
    let criteria = catalog::WCAG_21
        .iter()
        .map(|entry| CriterionIntake {
            criterion_id: entry.id.to_string(),
            name: Some(entry.name.to_string()),
            wcag_level: entry.level,
            conformance_level: ConformanceLevel::DoesNotSupport,
            remarks: None,
            confidence_score: None,
            na_suggestion: None,
        })
        .collect();

    build_report(
        CreateReportInput {
            report_id: report_id.to_string(),
            title: title.to_string(),
            product: None,
            wcag_edition: None,
            criteria,
            auto_apply_na: true,
        },
        created_by,
        &ResolverConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake(id: &str) -> CriterionIntake {
        CriterionIntake {
            criterion_id: id.to_string(),
            name: None,
            wcag_level: WcagLevel::A,
            conformance_level: ConformanceLevel::Supports,
            remarks: None,
            confidence_score: Some(0.85),
            na_suggestion: None,
        }
    }

    fn input(criteria: Vec<CriterionIntake>) -> CreateReportInput {
        CreateReportInput {
            report_id: "demo-report".to_string(),
            title: "Demo".to_string(),
            product: None,
            wcag_edition: None,
            criteria,
            auto_apply_na: true,
        }
    }

    #[test]
    fn test_build_report_basic() {
        let report = build_report(input(vec![intake("1.1.1")]), "auditor", &ResolverConfig::default())
            .unwrap();
        assert_eq!(report.id, "demo-report");
        assert_eq!(report.wcag_edition, "WCAG 2.1");

        let record = report.criterion("1.1.1").unwrap();
        assert_eq!(record.attribution, Attribution::Automated);
        // Name filled from the catalog
        assert_eq!(record.name.as_deref(), Some("Non-text Content"));
    }

    #[test]
    fn test_invalid_report_id() {
        let mut bad = input(vec![intake("1.1.1")]);
        bad.report_id = "Demo Report!".to_string();
        assert!(matches!(
            build_report(bad, "auditor", &ResolverConfig::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_criteria_rejected() {
        assert!(matches!(
            build_report(input(vec![]), "auditor", &ResolverConfig::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_criterion_id() {
        assert!(matches!(
            build_report(input(vec![intake("1.4")]), "auditor", &ResolverConfig::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_criterion_id() {
        assert!(matches!(
            build_report(
                input(vec![intake("1.1.1"), intake("1.1.1")]),
                "auditor",
                &ResolverConfig::default()
            ),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_confidence_rejected_not_clamped() {
        let mut bad = intake("1.1.1");
        bad.confidence_score = Some(1.2);
        assert!(matches!(
            build_report(input(vec![bad]), "auditor", &ResolverConfig::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_suggestion_confidence_rejected() {
        let mut bad = intake("1.1.1");
        bad.na_suggestion = Some(NaSuggestion {
            suggested_status: ConformanceLevel::NotApplicable,
            confidence: -0.1,
            rationale: None,
        });
        assert!(matches!(
            build_report(input(vec![bad]), "auditor", &ResolverConfig::default()),
            Err(AcrError::Validation(_))
        ));
    }

    #[test]
    fn test_auto_apply_high_confidence_na() {
        let mut criterion = intake("1.2.1");
        criterion.na_suggestion = Some(NaSuggestion {
            suggested_status: ConformanceLevel::NotApplicable,
            confidence: 0.92,
            rationale: Some("no prerecorded media".to_string()),
        });

        let report = build_report(input(vec![criterion]), "auditor", &ResolverConfig::default())
            .unwrap();
        let record = report.criterion("1.2.1").unwrap();

        assert_eq!(record.conformance_level, ConformanceLevel::NotApplicable);
        assert_eq!(record.attribution, Attribution::AiSuggested);
    }

    #[test]
    fn test_low_confidence_na_surfaced_not_applied() {
        let mut criterion = intake("1.2.1");
        criterion.na_suggestion = Some(NaSuggestion {
            suggested_status: ConformanceLevel::NotApplicable,
            confidence: 0.6,
            rationale: None,
        });

        let report = build_report(input(vec![criterion]), "auditor", &ResolverConfig::default())
            .unwrap();
        let record = report.criterion("1.2.1").unwrap();

        // Suggestion kept for manual confirmation, conformance untouched
        assert_eq!(record.conformance_level, ConformanceLevel::Supports);
        assert!(record.na_suggestion.is_some());
    }

    #[test]
    fn test_seed_from_catalog() {
        let report = seed_from_catalog("seeded", "Seeded", "tester").unwrap();
        assert_eq!(report.criteria.len(), catalog::WCAG_21.len());
        assert!(report
            .records()
            .all(|r| r.conformance_level == ConformanceLevel::DoesNotSupport));
    }
}
