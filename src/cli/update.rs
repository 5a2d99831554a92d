use crate::cli::open_workspace;
use crate::models::{ConformanceLevel, CriterionPatch};
use crate::Result;
use colored::Colorize;

/// Apply a human edit to a criterion
pub async fn run(
    report_id: &str,
    criterion_id: &str,
    level: Option<&str>,
    remarks: Option<&str>,
    json: bool,
) -> Result<()> {
    let (_config, service) = open_workspace()?;

    let conformance_level = match level {
        Some(s) => Some(ConformanceLevel::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown conformance level '{}' (expected supports, partially_supports, does_not_support, or not_applicable)",
                s
            )
        })?),
        None => None,
    };

    let patch = CriterionPatch {
        conformance_level,
        remarks: remarks.map(|r| r.to_string()),
    };

    let record = service.update_criterion(report_id, criterion_id, patch)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("✅ Updated {} ({})", record.criterion_id, report_id).green()
    );
    println!("   Conformance: {}", record.conformance_level);
    println!("   Attribution: {}", record.attribution);
    if !record.remarks.is_empty() {
        println!("   Remarks:     {}", record.remarks);
    }
    println!();
    println!(
        "   Changes are unversioned until you run: acrd save {}",
        report_id
    );

    Ok(())
}
