use crate::cli::open_workspace;
use crate::Result;
use colored::Colorize;

/// List all versions of a report, newest first
pub async fn run(report_id: &str, json: bool) -> Result<()> {
    let (_config, service) = open_workspace()?;
    let history = service.get_version_history(report_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No versions yet. Run: acrd save {}", report_id);
        return Ok(());
    }

    println!("{}", format!("Version history: {}", report_id).cyan().bold());
    println!();
    for listing in history {
        let marker = if listing.is_latest { "●" } else { "○" };
        let mut line = format!(
            "   {} v{:<3} {:<17} {}%  {}",
            marker,
            listing.version_number,
            listing.status.name(),
            listing.summary.conformance_percentage(),
            listing.created_at.format("%Y-%m-%d %H:%M"),
        );
        if let Some(from) = listing.restored_from {
            line.push_str(&format!("  (restored from v{})", from));
        }
        if listing.is_latest {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
        if let Some(reason) = &listing.reason {
            println!("         {}", reason.bright_black());
        }
    }

    Ok(())
}
