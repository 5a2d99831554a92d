use crate::cli::{identity, open_workspace};
use crate::Result;
use colored::Colorize;

/// Restore a prior version's content as a brand-new version
pub async fn run(
    report_id: &str,
    target_version: u32,
    yes: bool,
    by: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, service) = open_workspace()?;

    if !yes {
        use dialoguer::Confirm;
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Overwrite the live state of '{}' with the content of v{}? (history is kept; this creates a new version)",
                report_id, target_version
            ))
            .default(false)
            .interact()?;

        if !proceed {
            println!("   Restore cancelled");
            return Ok(());
        }
    }

    let version = service.restore_version(report_id, target_version, &identity(by, &config))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&version.to_listing())?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "✅ Restored v{} as new version v{}",
            target_version, version.version_number
        )
        .green()
        .bold()
    );
    println!(
        "   Conformance: {}%",
        version.summary.conformance_percentage()
    );
    println!("   v{} itself is unchanged", target_version);

    Ok(())
}
