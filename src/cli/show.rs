use crate::cli::open_workspace;
use crate::models::ConformanceLevel;
use crate::Result;
use colored::Colorize;

/// Show one version's full frozen snapshot
pub async fn run(report_id: &str, version: u32, json: bool) -> Result<()> {
    let (_config, service) = open_workspace()?;
    let detail = service.get_version_detail(report_id, version)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("Version v{} of '{}'", detail.version_number, report_id)
            .cyan()
            .bold()
    );
    println!();
    println!("   Status:      {}", detail.status);
    println!(
        "   Created:     {} by {}",
        detail.created_at.format("%Y-%m-%d %H:%M:%S"),
        detail.created_by
    );
    if let Some(from) = detail.restored_from {
        println!("   Restored from: v{}", from);
    }
    println!(
        "   Conformance: {}%",
        detail.summary.conformance_percentage()
    );
    println!();

    for record in detail.criteria_snapshot.values() {
        let level_display = match record.conformance_level {
            ConformanceLevel::Supports => record.conformance_level.name().green(),
            ConformanceLevel::PartiallySupports => record.conformance_level.name().yellow(),
            ConformanceLevel::DoesNotSupport => record.conformance_level.name().red(),
            ConformanceLevel::NotApplicable => record.conformance_level.name().bright_black(),
        };
        let name = record.name.as_deref().unwrap_or("");
        println!(
            "   {:<8} {:<20} {} [{}]",
            record.criterion_id,
            level_display,
            name,
            record.attribution
        );
    }

    Ok(())
}
