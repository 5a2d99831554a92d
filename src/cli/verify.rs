use crate::cli::{identity, open_workspace};
use crate::models::VerificationStatus;
use crate::services::SubmitVerificationInput;
use crate::Result;
use colored::Colorize;

/// Record a manual verification round against a criterion
pub async fn run(
    report_id: &str,
    criterion_id: &str,
    status: &str,
    method: &str,
    notes: Option<&str>,
    by: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, service) = open_workspace()?;

    let status = VerificationStatus::parse(status).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown verification status '{}' (expected pending, verified_pass, verified_fail, verified_partial, or deferred)",
            status
        )
    })?;

    let entry = service.submit_verification(
        report_id,
        SubmitVerificationInput {
            criterion_id: criterion_id.to_string(),
            status,
            method: method.to_string(),
            notes: notes.unwrap_or_default().to_string(),
            verified_by: identity(by, &config),
        },
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    let status_display = match entry.status {
        VerificationStatus::VerifiedPass => entry.status.name().green(),
        VerificationStatus::VerifiedFail => entry.status.name().red(),
        VerificationStatus::VerifiedPartial => entry.status.name().yellow(),
        VerificationStatus::Pending | VerificationStatus::Deferred => {
            entry.status.name().bright_black()
        }
    };

    println!(
        "{}",
        format!("✅ Verification recorded for {}", criterion_id).green()
    );
    println!("   Status:   {}", status_display);
    println!("   Method:   {}", entry.method);
    println!("   Reviewer: {}", entry.verified_by);
    if !entry.notes.is_empty() {
        println!("   Notes:    {}", entry.notes);
    }
    println!();
    println!("   Verification does not change the conformance level.");
    println!(
        "   To publish an assessment change, run: acrd update {} {} --level <level>",
        report_id, criterion_id
    );

    Ok(())
}
