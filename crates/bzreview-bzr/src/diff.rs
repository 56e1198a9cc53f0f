use bzreview_process::{ExitPolicy, ProcessRunner};
use tracing::debug;

use crate::{Bzr, BzrError, RevisionRange};

/// Produces unified diffs for revision ranges
pub struct RangeDiffer<'a, R> {
    bzr: &'a Bzr<R>,
}

impl<'a, R: ProcessRunner> RangeDiffer<'a, R> {
    pub fn new(bzr: &'a Bzr<R>) -> Self {
        Self { bzr }
    }

    /// Diff for `range`, limited to `files` when non-empty.
    ///
    /// Returns `None` when there are no differences. `bzr diff` exits 1
    /// whenever it finds changes, so its exit status is ignored.
    pub fn diff_range(
        &self,
        range: &RevisionRange,
        files: &[String],
    ) -> Result<Option<Vec<u8>>, BzrError> {
        let range = range.to_string();
        let mut args = vec!["diff", "-q", "-r", range.as_str()];
        args.extend(files.iter().map(String::as_str));

        debug!(args = ?args, "Computing diff");

        let output = self.bzr.execute(&args, ExitPolicy::IgnoreAll)?;
        if output.stdout.is_empty() {
            debug!(range = %range, "No differences");
            return Ok(None);
        }

        debug!(diff_len = output.stdout.len(), "Captured diff");
        Ok(Some(output.stdout))
    }
}
