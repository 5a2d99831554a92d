//! Workspace configuration
//!
//! Loaded from `acrd/config.yaml` under the workspace root. Missing file
//! means defaults; a present file overrides only the keys it sets.

use crate::resolver::ResolverConfig;
use crate::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Workspace-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcrConfig {
    /// Resolver thresholds (band cut points, auto-apply cutoff)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Default reviewer identity when the CLI is run without `--by`
    #[serde(default)]
    pub default_reviewer: Option<String>,
}

impl Default for AcrConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            default_reviewer: None,
        }
    }
}

impl AcrConfig {
    /// Config file path for a workspace
    pub fn path(workspace_root: &Path) -> PathBuf {
        workspace_root.join("acrd/config.yaml")
    }

    /// Load the workspace config, falling back to defaults when absent
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let path = Self::path(workspace_root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Write the config, creating `acrd/` if needed
    pub fn save(&self, workspace_root: &Path) -> Result<()> {
        let path = Self::path(workspace_root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Reviewer identity: config default, then OS user, then "unknown"
    pub fn reviewer(&self) -> String {
        if let Some(reviewer) = &self.default_reviewer {
            return reviewer.clone();
        }
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}
