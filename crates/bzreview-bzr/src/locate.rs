use bzreview_process::ProcessRunner;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Bzr, BzrError, ConfigReader};

/// Options naming the branch this one merges into, highest priority first
const BRANCH_OPTIONS: [&str; 2] = ["submit_branch", "parent_location"];

/// Diffs are always relative to the branch root
const BASE_PATH: &str = "/";

/// Identity of the repository a review is posted against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Branch location or remote URL
    pub path: String,
    /// Root that diff paths are relative to
    pub base_path: String,
    pub supports_parent_diffs: bool,
}

impl RepositoryInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base_path: BASE_PATH.to_string(),
            supports_parent_diffs: true,
        }
    }
}

/// Finds the repository the current branch belongs to
pub struct RepositoryLocator<'a, R> {
    bzr: &'a Bzr<R>,
}

impl<'a, R: ProcessRunner> RepositoryLocator<'a, R> {
    pub fn new(bzr: &'a Bzr<R>) -> Self {
        Self { bzr }
    }

    /// Repository info for the working tree, or `None` if Bazaar is not
    /// installed or the branch has no submit branch or parent location.
    ///
    /// An `explicit_url` is used as-is without reading any configuration.
    pub fn locate(&self, explicit_url: Option<&str>) -> Result<Option<RepositoryInfo>, BzrError> {
        if !self.bzr.is_installed() {
            debug!(binary = self.bzr.binary(), "Bazaar is not installed");
            return Ok(None);
        }

        if let Some(url) = explicit_url {
            debug!(url, "Using explicit repository URL");
            return Ok(Some(RepositoryInfo::new(url)));
        }

        let config = ConfigReader::new(self.bzr);
        for option in BRANCH_OPTIONS {
            if let Some(branch) = config.get(option)? {
                debug!(option, branch = %branch, "Found branch location");
                return Ok(Some(RepositoryInfo::new(branch)));
            }
        }

        debug!("No submit branch or parent location configured");
        Ok(None)
    }
}
