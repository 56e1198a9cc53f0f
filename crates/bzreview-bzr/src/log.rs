use bzreview_process::{ExitPolicy, ProcessRunner};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{Bzr, BzrError, RevisionRange};

lazy_static! {
    /// First `YYYY-MM-DD` token in a `bzr log --line` entry
    static ref ISO_DATE_RE: Regex =
        Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("iso date regex");
}

/// Branch compared against when no parent branch is given
const SUBMIT_BRANCH: &str = ":submit";

/// Extract the commit message from a `bzr log --line` entry.
///
/// Lines look like `{revno}: {committer} {YYYY-MM-DD} {message}`. The message
/// is everything after the first date token plus one separator character, so
/// a committer name containing a date-shaped token would be cut too early.
pub fn summary_from_line(line: &str) -> Option<&str> {
    let date = ISO_DATE_RE.find(line)?;
    let rest = &line[date.end()..];
    let mut chars = rest.chars();
    chars.next();
    Some(chars.as_str())
}

/// Builds review summaries and descriptions from the branch log
pub struct LogExtractor<'a, R> {
    bzr: &'a Bzr<R>,
    parent_branch: Option<String>,
}

impl<'a, R: ProcessRunner> LogExtractor<'a, R> {
    pub fn new(bzr: &'a Bzr<R>) -> Self {
        Self {
            bzr,
            parent_branch: None,
        }
    }

    /// Compare outgoing changes against `branch` instead of the submit branch
    pub fn with_parent_branch(mut self, branch: Option<String>) -> Self {
        self.parent_branch = branch;
        self
    }

    /// The commit message of `revision`, taken from its one-line log entry
    pub fn extract_summary(&self, revision: &str) -> Result<String, BzrError> {
        let output = self
            .bzr
            .execute(&["log", "-r", revision, "--line"], ExitPolicy::Strict)?;
        let line = output.stdout_text();
        let line = line.trim_end();

        let summary = summary_from_line(line)
            .ok_or_else(|| BzrError::MalformedLogLine(line.to_string()))?
            .to_string();

        debug!(summary = %summary, "Summary");
        Ok(summary)
    }

    /// A short GNU changelog for `range`, or for all of this user's outgoing
    /// revisions when no range is given.
    pub fn extract_description(&self, range: Option<&RevisionRange>) -> Result<String, BzrError> {
        let range = range.map(RevisionRange::to_string);
        let mut args = match range {
            Some(ref range) => vec![
                "log",
                "-n1",
                "--gnu-changelog",
                "--exclude-common-ancestry",
                "-r",
                range.as_str(),
            ],
            None => {
                let branch = self.parent_branch.as_deref().unwrap_or(SUBMIT_BRANCH);
                vec!["missing", "-q", "--mine-only", "--gnu-changelog", branch]
            }
        };
        // Short format separates entries with a hyphen rule
        args.push("--short");

        // `bzr missing` exits 1 when there are outgoing revisions
        let output = self.bzr.execute(&args, ExitPolicy::IgnoreAll)?;
        let changelog = output.stdout_text().trim_end().to_string();

        debug!(changelog = %changelog, "Changelog");
        Ok(changelog)
    }
}
