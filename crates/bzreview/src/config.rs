//! Project configuration file support for bzreview.
//!
//! Loads configuration from `bzreview.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Project-level configuration loaded from `bzreview.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Path or name of the bzr executable
    pub bzr: Option<String>,
    /// Branch to diff against instead of the submit branch
    pub parent_branch: Option<String>,
    /// Guess the review summary from the latest commit message
    pub guess_summary: Option<bool>,
    /// Guess the review description from the changelog
    pub guess_description: Option<bool>,
    /// Review server used when the branch does not set `reviewboard_url`
    pub reviewboard_url: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "bzreview.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}
