//! # bzreview-process
//!
//! Subprocess execution for the Bazaar review adapter.
//!
//! Every command runs to completion on the calling thread. The captured
//! [`CommandOutput`] is handed back untouched; each caller decides with an
//! [`ExitPolicy`] whether a non-zero exit status is fatal.
//!
//! ## Key Types
//!
//! - [`ProcessRunner`] - Trait for anything that can run a command
//! - [`SystemRunner`] - Runs real processes via `std::process`
//! - [`CommandOutput`] - Captured stdout, stderr and exit code
//! - [`ExitPolicy`] - Per-call rule for tolerated exit codes
//! - `ScriptedRunner` - Replays canned output (`testing` feature)

mod output;
mod runner;
#[cfg(any(test, feature = "testing"))]
mod scripted;

pub use output::{CommandOutput, ExitPolicy};
pub use runner::{ProcessError, ProcessRunner, SystemRunner};
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedRunner;
