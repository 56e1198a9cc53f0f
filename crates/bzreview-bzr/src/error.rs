use bzreview_process::ProcessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BzrError {
    #[error("bzr invocation failed: {0}")]
    Process(#[from] ProcessError),

    #[error("Invalid revision range '{0}': expected two revisions separated by '..'")]
    InvalidRevisionRange(String),

    #[error("Could not find a date in log line: {0}")]
    MalformedLogLine(String),
}
