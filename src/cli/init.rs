use crate::cli::{identity, open_workspace};
use crate::services::{build_report, seed_from_catalog, CreateReportInput};
use crate::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Create a new report, either from an audit intake payload or seeded from
/// the built-in WCAG 2.1 catalog
pub async fn run(
    report_id: Option<&str>,
    title: Option<&str>,
    from: Option<&Path>,
    by: Option<&str>,
) -> Result<()> {
    let (config, service) = open_workspace()?;
    let created_by = identity(by, &config);

    let report = match from {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut input: CreateReportInput = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;

            // CLI arguments override the payload's metadata
            if let Some(id) = report_id {
                input.report_id = id.to_string();
            }
            if let Some(title) = title {
                input.title = title.to_string();
            }

            build_report(input, &created_by, service.resolver())?
        }
        None => {
            let id = report_id
                .ok_or_else(|| anyhow::anyhow!("report id is required without --from"))?;
            let title = title.unwrap_or(id);
            seed_from_catalog(id, title, &created_by)?
        }
    };

    service.store().create_report(&report)?;

    println!(
        "{}",
        format!("✅ Created report '{}'", report.id).green().bold()
    );
    println!("   Criteria:  {}", report.criteria.len());
    println!("   Edition:   {}", report.wcag_edition);
    println!("   Created by: {}", report.created_by);
    println!();
    println!("{}", "⏭️  Next steps:".yellow());
    println!("   acrd status {}", report.id);
    println!("   acrd save {} --reason \"initial assessment\"", report.id);

    Ok(())
}
