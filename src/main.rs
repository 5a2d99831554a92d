use acrd::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acrd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Versioned Conformance Report Engine", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new report from an audit payload or the WCAG 2.1 catalog
    Init {
        /// Report ID (lowercase alphanumeric with hyphens)
        report_id: Option<String>,

        /// Report title
        #[arg(short, long)]
        title: Option<String>,

        /// Audit intake payload (JSON) from the audit/AI service
        #[arg(long)]
        from: Option<PathBuf>,

        /// Identity recorded as the creator
        #[arg(long)]
        by: Option<String>,
    },

    /// List reports in this workspace
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show live state and conformance summary of a report
    Status {
        /// Report ID
        report_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a criterion's conformance level and/or remarks
    Update {
        /// Report ID
        report_id: String,

        /// Criterion ID (e.g., "1.4.3")
        criterion_id: String,

        /// New conformance level (supports, partially_supports, does_not_support, not_applicable)
        #[arg(short, long)]
        level: Option<String>,

        /// New remarks text
        #[arg(short, long)]
        remarks: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a manual verification round against a criterion
    Verify {
        /// Report ID
        report_id: String,

        /// Criterion ID (e.g., "1.1.1")
        criterion_id: String,

        /// Verification outcome (pending, verified_pass, verified_fail, verified_partial, deferred)
        #[arg(short, long)]
        status: String,

        /// How the criterion was checked (e.g., "Manual Review")
        #[arg(short, long, default_value = "Manual Review")]
        method: String,

        /// Reviewer notes (required for verified_fail / verified_partial)
        #[arg(short, long)]
        notes: Option<String>,

        /// Identity recorded as the reviewer
        #[arg(long)]
        by: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save the current live state as a new immutable version
    Save {
        /// Report ID
        report_id: String,

        /// Version status (in_progress, ready_for_review, reviewed, approved)
        #[arg(short, long)]
        status: Option<String>,

        /// Save message recorded on the version
        #[arg(long)]
        reason: Option<String>,

        /// Identity recorded as the creator
        #[arg(long)]
        by: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a report's version history, newest first
    History {
        /// Report ID
        report_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one version's full frozen snapshot
    Show {
        /// Report ID
        report_id: String,

        /// Version number
        version: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two versions field by field
    Diff {
        /// Report ID
        report_id: String,

        /// First version number (the "from" side)
        version_a: u32,

        /// Second version number (the "to" side)
        version_b: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore a prior version's content as a brand-new version
    Restore {
        /// Report ID
        report_id: String,

        /// Version number to restore
        version: u32,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Identity recorded as the creator
        #[arg(long)]
        by: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 7171)]
        port: u16,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init {
            report_id,
            title,
            from,
            by,
        } => {
            acrd::cli::init::run(
                report_id.as_deref(),
                title.as_deref(),
                from.as_deref(),
                by.as_deref(),
            )
            .await?;
        }

        Commands::List { json } => {
            acrd::cli::list::run(json)?;
        }

        Commands::Status { report_id, json } => {
            acrd::cli::status::run(&report_id, json).await?;
        }

        Commands::Update {
            report_id,
            criterion_id,
            level,
            remarks,
            json,
        } => {
            acrd::cli::update::run(
                &report_id,
                &criterion_id,
                level.as_deref(),
                remarks.as_deref(),
                json,
            )
            .await?;
        }

        Commands::Verify {
            report_id,
            criterion_id,
            status,
            method,
            notes,
            by,
            json,
        } => {
            acrd::cli::verify::run(
                &report_id,
                &criterion_id,
                &status,
                &method,
                notes.as_deref(),
                by.as_deref(),
                json,
            )
            .await?;
        }

        Commands::Save {
            report_id,
            status,
            reason,
            by,
            json,
        } => {
            acrd::cli::save::run(
                &report_id,
                status.as_deref(),
                reason.as_deref(),
                by.as_deref(),
                json,
            )
            .await?;
        }

        Commands::History { report_id, json } => {
            acrd::cli::history::run(&report_id, json).await?;
        }

        Commands::Show {
            report_id,
            version,
            json,
        } => {
            acrd::cli::show::run(&report_id, version, json).await?;
        }

        Commands::Diff {
            report_id,
            version_a,
            version_b,
            json,
        } => {
            acrd::cli::diff::run(&report_id, version_a, version_b, json).await?;
        }

        Commands::Restore {
            report_id,
            version,
            yes,
            by,
            json,
        } => {
            acrd::cli::restore::run(&report_id, version, yes, by.as_deref(), json).await?;
        }

        Commands::Serve { port } => {
            acrd::cli::serve::run(port).await?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "acrd", &mut io::stdout());
        }
    }

    Ok(())
}
