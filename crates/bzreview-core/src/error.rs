use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Bazaar error: {0}")]
    Bzr(#[from] bzreview_bzr::BzrError),
}
