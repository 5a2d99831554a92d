//! CLI command implementations
//!
//! One module per subcommand. Commands are thin wrappers over the report
//! service; they resolve the workspace, load config, call the facade, and
//! render. Every command that prints state offers `--json` for scripting.

pub mod diff;
pub mod history;
pub mod init;
pub mod list;
pub mod restore;
pub mod save;
pub mod serve;
pub mod show;
pub mod status;
pub mod update;
pub mod verify;

use crate::config::AcrConfig;
use crate::services::ReportService;
use crate::store::ReportStore;
use crate::Result;
use std::path::PathBuf;

/// Resolve the workspace root, load its config, and open the facade
pub fn open_workspace() -> Result<(AcrConfig, ReportService)> {
    let root = workspace_root()?;
    let config = AcrConfig::load(&root)?;
    let service = ReportService::new(ReportStore::new(&root), config.resolver);
    Ok((config, service))
}

/// Workspace root is the current directory
pub fn workspace_root() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Identity for a write: `--by` flag, then config, then OS user
pub fn identity(by: Option<&str>, config: &AcrConfig) -> String {
    match by {
        Some(by) => by.to_string(),
        None => config.reviewer(),
    }
}
