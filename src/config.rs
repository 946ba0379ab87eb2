use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A project tracked for new releases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Display name used in notifications and the summary file
    pub name: String,
    /// GitHub repository in "owner/name" form
    pub repo: String,
}

/// The tracked-projects configuration loaded from config.yaml.
/// The order of `projects` determines the order of the summary file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub projects: Vec<Project>,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// A missing or malformed file is a startup failure, not a recoverable
    /// condition; nothing else runs without a valid project list.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

/// Starter config written by `relwatch init`
pub const CONFIG_TEMPLATE: &str = "\
# Projects tracked by relwatch.
# `name` is the display name used in notifications and the summary,
# `repo` is the GitHub repository in owner/name form.
projects:
  - name: Ripgrep
    repo: BurntSushi/ripgrep
  - name: Tokio
    repo: tokio-rs/tokio
";
