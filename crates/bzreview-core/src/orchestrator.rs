use bzreview_bzr::{
    Bzr, ConfigReader, LogExtractor, RangeDiffer, RepositoryInfo, RepositoryLocator, RevisionRange,
};
use bzreview_process::ProcessRunner;
use tracing::{debug, info};

use crate::{OrchestratorError, ReviewRequestOptions};

/// Bazaar option holding the review server URL
pub const SERVER_URL_OPTION: &str = "reviewboard_url";

/// Diffs ready to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// `None` when there is nothing to review
    pub unified_diff: Option<Vec<u8>>,
    /// Bazaar has no parent diff, so this is always `None`
    pub parent_diff: Option<Vec<u8>>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.unified_diff.is_none()
    }
}

/// Drives repository discovery, diffing and summary guessing for one run
pub struct DiffOrchestrator<R> {
    bzr: Bzr<R>,
}

impl<R: ProcessRunner> DiffOrchestrator<R> {
    pub fn new(bzr: Bzr<R>) -> Self {
        Self { bzr }
    }

    pub fn bzr(&self) -> &Bzr<R> {
        &self.bzr
    }

    /// Repository the review belongs to, or `None` if this is not a usable
    /// Bazaar branch
    pub fn repository_info(
        &self,
        options: &ReviewRequestOptions,
    ) -> Result<Option<RepositoryInfo>, OrchestratorError> {
        let info = RepositoryLocator::new(&self.bzr).locate(options.repository_url.as_deref())?;
        Ok(info)
    }

    /// Review server URL from the `reviewboard_url` option, else whatever
    /// `fallback` finds
    pub fn scan_for_server<F>(
        &self,
        info: &RepositoryInfo,
        fallback: F,
    ) -> Result<Option<String>, OrchestratorError>
    where
        F: FnOnce(&RepositoryInfo) -> Option<String>,
    {
        if let Some(url) = ConfigReader::new(&self.bzr).get(SERVER_URL_OPTION)? {
            debug!(url = %url, "Server URL from bzr config");
            return Ok(Some(url));
        }
        Ok(fallback(info))
    }

    /// Diff of the branch against its parent or submit branch, filling the
    /// summary from the latest revision and the description from the range
    pub fn diff(
        &self,
        files: &[String],
        options: &mut ReviewRequestOptions,
    ) -> Result<DiffResult, OrchestratorError> {
        let range = match options.parent_branch.as_deref() {
            Some(branch) => RevisionRange::since_ancestor_of(branch),
            None => RevisionRange::since_submit(),
        };
        info!(range = %range, files = files.len(), "Diffing pending changes");

        let unified_diff = RangeDiffer::new(&self.bzr).diff_range(&range, files)?;
        self.fill_summary("-1", options)?;
        self.fill_description(&range, options)?;

        Ok(DiffResult {
            unified_diff,
            parent_diff: None,
        })
    }

    /// Diff of an explicit `from..to` range. The summary comes from the
    /// `to` revision and the description from the whole range.
    pub fn diff_between_revisions(
        &self,
        revision_range: &str,
        files: &[String],
        info: &RepositoryInfo,
        options: &mut ReviewRequestOptions,
    ) -> Result<Option<Vec<u8>>, OrchestratorError> {
        let range: RevisionRange = revision_range.parse()?;
        info!(range = %range, repository = %info.path, "Diffing revision range");

        let diff = RangeDiffer::new(&self.bzr).diff_range(&range, files)?;
        self.fill_summary(range.to_revision(), options)?;
        self.fill_description(&range, options)?;

        Ok(diff)
    }

    /// Changelog of this user's revisions not yet in the parent or submit
    /// branch
    pub fn outgoing_changelog(
        &self,
        options: &ReviewRequestOptions,
    ) -> Result<String, OrchestratorError> {
        let changelog = LogExtractor::new(&self.bzr)
            .with_parent_branch(options.parent_branch.clone())
            .extract_description(None)?;
        Ok(changelog)
    }

    fn fill_summary(
        &self,
        revision: &str,
        options: &mut ReviewRequestOptions,
    ) -> Result<(), OrchestratorError> {
        if options.needs_summary() {
            options.summary = Some(LogExtractor::new(&self.bzr).extract_summary(revision)?);
        }
        Ok(())
    }

    fn fill_description(
        &self,
        range: &RevisionRange,
        options: &mut ReviewRequestOptions,
    ) -> Result<(), OrchestratorError> {
        if options.needs_description() {
            let description = LogExtractor::new(&self.bzr).extract_description(Some(range))?;
            options.description = Some(description);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bzreview_process::{CommandOutput, ScriptedRunner};

    #[test]
    fn test_server_url_from_config() {
        let bzr = Bzr::new(
            ScriptedRunner::new()
                .on_stdout(&["bzr", "config", "reviewboard_url"], "https://reviews.example.com\n"),
        );
        let orchestrator = DiffOrchestrator::new(bzr);
        let url = orchestrator
            .scan_for_server(&RepositoryInfo::new("lp:x"), |_| {
                panic!("fallback should not run")
            })
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://reviews.example.com"));
    }

    #[test]
    fn test_server_url_fallback() {
        let missing = CommandOutput::new(
            "",
            "ERROR: The \"reviewboard_url\" configuration option does not exist.\n",
            3,
        );
        let bzr = Bzr::new(ScriptedRunner::new().on(&["bzr", "config", "reviewboard_url"], missing));
        let orchestrator = DiffOrchestrator::new(bzr);
        let url = orchestrator
            .scan_for_server(&RepositoryInfo::new("lp:x"), |info| {
                Some(format!("https://rb/{}", info.path))
            })
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://rb/lp:x"));
    }

    #[test]
    fn test_diff_without_guessing_only_diffs() {
        let bzr = Bzr::new(
            ScriptedRunner::new().on(&["bzr", "diff", "-q", "-r", "submit:.."], CommandOutput::new("+x\n", "", 1)),
        );
        let orchestrator = DiffOrchestrator::new(bzr);
        let mut options = ReviewRequestOptions::new();

        let result = orchestrator.diff(&[], &mut options).unwrap();

        assert_eq!(result.unified_diff.as_deref(), Some(b"+x\n".as_slice()));
        assert_eq!(result.parent_diff, None);
        assert_eq!(options, ReviewRequestOptions::new());
        assert_eq!(orchestrator.bzr().runner().calls().len(), 1);
    }

    #[test]
    fn test_invalid_range_is_an_error() {
        let orchestrator = DiffOrchestrator::new(Bzr::new(ScriptedRunner::new()));
        let mut options = ReviewRequestOptions::new();
        let result = orchestrator.diff_between_revisions(
            "42",
            &[],
            &RepositoryInfo::new("lp:x"),
            &mut options,
        );
        assert!(result.is_err());
        assert!(orchestrator.bzr().runner().calls().is_empty());
    }
}
