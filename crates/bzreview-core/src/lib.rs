mod error;
mod options;
mod orchestrator;

pub use error::OrchestratorError;
pub use options::ReviewRequestOptions;
pub use orchestrator::{DiffOrchestrator, DiffResult, SERVER_URL_OPTION};

pub use bzreview_bzr::{RepositoryInfo, RevisionRange};
