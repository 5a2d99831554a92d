use crate::cli::{identity, open_workspace};
use crate::models::VersionStatus;
use crate::Result;
use colored::Colorize;

/// Snapshot the current live state as the next version
pub async fn run(
    report_id: &str,
    status: Option<&str>,
    reason: Option<&str>,
    by: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, service) = open_workspace()?;

    let status = match status {
        Some(s) => VersionStatus::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown version status '{}' (expected in_progress, ready_for_review, reviewed, or approved)",
                s
            )
        })?,
        None => VersionStatus::InProgress,
    };

    let version = service.save_version(
        report_id,
        status,
        reason.map(|r| r.to_string()),
        &identity(by, &config),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&version.to_listing())?);
        return Ok(());
    }

    println!(
        "{}",
        format!("✅ Saved version v{} of '{}'", version.version_number, report_id)
            .green()
            .bold()
    );
    println!("   Status:      {}", version.status);
    println!(
        "   Conformance: {}%",
        version.summary.conformance_percentage()
    );
    if let Some(reason) = &version.reason {
        println!("   Reason:      {}", reason);
    }

    Ok(())
}
