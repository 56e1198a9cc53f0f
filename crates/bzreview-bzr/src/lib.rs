//! # bzreview-bzr
//!
//! Bazaar operations for the review adapter.
//!
//! Everything here shells out to the `bzr` command line and turns its text
//! into values a review client can use:
//! - configuration lookups, with missing options reported as `None`
//! - repository discovery from the submit branch or parent location
//! - unified diffs for a revision range
//! - one-line summaries and changelog descriptions from `bzr log`
//!
//! ## Key Types
//!
//! - [`Bzr`] - Handle on the `bzr` binary and the process runner
//! - [`ConfigReader`] - Reads single configuration options
//! - [`RepositoryLocator`] / [`RepositoryInfo`] - Repository discovery
//! - [`RangeDiffer`] - Diffs for a [`RevisionRange`]
//! - [`LogExtractor`] - Summaries and descriptions from the log
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bzreview_bzr::{Bzr, RangeDiffer, RevisionRange};
//! use bzreview_process::SystemRunner;
//!
//! let bzr = Bzr::new(SystemRunner::new());
//! let range: RevisionRange = "submit:..".parse()?;
//! if let Some(diff) = RangeDiffer::new(&bzr).diff_range(&range, &[])? {
//!     println!("{}", String::from_utf8_lossy(&diff));
//! }
//! ```

mod config;
mod diff;
mod error;
mod locate;
mod log;
mod range;

pub use config::ConfigReader;
pub use diff::RangeDiffer;
pub use error::BzrError;
pub use locate::{RepositoryInfo, RepositoryLocator};
pub use log::{summary_from_line, LogExtractor};
pub use range::{RevisionRange, RANGE_DELIMITER};

use bzreview_process::{CommandOutput, ExitPolicy, ProcessError, ProcessRunner};

/// Default name of the Bazaar executable
pub const DEFAULT_BINARY: &str = "bzr";

/// Handle on the Bazaar command line
#[derive(Debug)]
pub struct Bzr<R> {
    runner: R,
    binary: String,
}

impl<R: ProcessRunner> Bzr<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            binary: DEFAULT_BINARY.to_string(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Check that `bzr help` runs
    pub fn is_installed(&self) -> bool {
        self.runner.check_install(&[&self.binary, "help"])
    }

    /// Run a bzr subcommand under the given exit policy
    pub(crate) fn execute(
        &self,
        args: &[&str],
        policy: ExitPolicy,
    ) -> Result<CommandOutput, ProcessError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(self.binary.as_str());
        argv.extend_from_slice(args);
        self.runner.execute(&argv, policy)
    }
}
