use crate::cli::open_workspace;
use crate::Result;
use colored::Colorize;

/// Compare two versions field by field
pub async fn run(report_id: &str, version_a: u32, version_b: u32, json: bool) -> Result<()> {
    let (_config, service) = open_workspace()?;
    let diffs = service.compare_versions(report_id, version_a, version_b)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&diffs)?);
        return Ok(());
    }

    if diffs.is_empty() {
        println!(
            "No differences between v{} and v{} of '{}'",
            version_a, version_b, report_id
        );
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Differences: {} v{} → v{} ({} change(s))",
            report_id,
            version_a,
            version_b,
            diffs.len()
        )
        .cyan()
        .bold()
    );
    println!();

    let mut current_criterion = String::new();
    for diff in diffs {
        if diff.criterion_id != current_criterion {
            println!("   {}", diff.criterion_id.bold());
            current_criterion = diff.criterion_id.clone();
        }
        let render = |v: &Option<String>| match v {
            Some(v) if v.is_empty() => "(empty)".to_string(),
            Some(v) => v.clone(),
            None => "(missing)".to_string(),
        };
        println!(
            "      {:<18} {} → {}",
            diff.field.name(),
            render(&diff.value_a).red(),
            render(&diff.value_b).green()
        );
    }

    Ok(())
}
