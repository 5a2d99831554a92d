use crate::api::{start_server, AppState};
use crate::cli::open_workspace;
use crate::Result;
use colored::Colorize;

/// Start the HTTP API server for this workspace
pub async fn run(port: u16) -> Result<()> {
    let (config, service) = open_workspace()?;

    println!("{}", "🚀 Starting acrd API server...".cyan());
    start_server(port, AppState::new(service, config.reviewer())).await
}
