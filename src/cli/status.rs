use crate::cli::open_workspace;
use crate::models::{ConformanceLevel, WcagLevel};
use crate::Result;
use colored::Colorize;

/// Show the live state and derived summary of a report
pub async fn run(report_id: &str, json: bool) -> Result<()> {
    let (_config, service) = open_workspace()?;
    let state = service.get_current_state(report_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let summary = &state.summary;
    println!(
        "{}",
        format!("Status for: {} ({})", state.report.title, report_id)
            .cyan()
            .bold()
    );
    println!();
    println!("   Edition:     {}", state.report.wcag_edition);
    println!(
        "   Updated:     {}",
        state.report.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    println!(
        "   Conformance: {}",
        format!("{}%", summary.conformance_percentage()).bold()
    );
    println!("   Total:       {}", summary.total);
    println!("   Applicable:  {}", summary.applicable);
    println!("   {}      {}", "Passed:".green(), summary.passed);
    println!("   {}      {}", "Failed:".red(), summary.failed);
    println!("   {}     {}", "Partial:".yellow(), summary.partially_passed);
    println!("   N/A:         {}", summary.na);

    // Per-WCAG-level breakdown of passing criteria
    println!();
    for level in [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA] {
        let records: Vec<_> = state
            .report
            .records()
            .filter(|r| r.wcag_level == level)
            .collect();
        if records.is_empty() {
            continue;
        }
        let passing = records
            .iter()
            .filter(|r| r.conformance_level == ConformanceLevel::Supports)
            .count();
        println!(
            "   Level {:<4} {}/{} supporting",
            level.name(),
            passing,
            records.len()
        );
    }

    if !state.inconsistent_na.is_empty() {
        println!();
        println!(
            "   {} {} criteria marked N/A without a supporting suggestion (counted as failed):",
            "⚠️".yellow(),
            state.inconsistent_na.len()
        );
        for id in &state.inconsistent_na {
            println!("      {}", id);
        }
    }

    let latest = service.store().max_version_number(report_id)?;
    println!();
    if latest == 0 {
        println!("   No versions saved yet. Run: acrd save {}", report_id);
    } else {
        println!("   Latest version: v{}", latest);
    }

    Ok(())
}
