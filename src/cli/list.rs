use crate::cli::open_workspace;
use crate::Result;
use colored::Colorize;

/// List all reports in the workspace
pub fn run(json: bool) -> Result<()> {
    let (_config, service) = open_workspace()?;
    let ids = service.list_reports()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ids)?);
        return Ok(());
    }

    if ids.is_empty() {
        println!("No reports found. Create one with: acrd init <report-id>");
        return Ok(());
    }

    println!("{}", "Reports:".cyan().bold());
    for id in ids {
        let state = service.get_current_state(&id)?;
        let versions = service.store().max_version_number(&id)?;
        println!(
            "   {}  {}% conformant, {} criteria, {} version(s)",
            id.bold(),
            state.summary.conformance_percentage(),
            state.summary.total,
            versions
        );
    }

    Ok(())
}
