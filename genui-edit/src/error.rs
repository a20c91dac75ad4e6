use thiserror::Error;

use crate::invoker::CandidateFailure;

pub type EditResult<T> = Result<T, EditError>;

/// Error a [`crate::ModelBackend`] reports for a single completion call
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("All AI models failed: {last}")]
    AllCandidatesFailed {
        attempts: Vec<CandidateFailure>,
        last: String,
    },

    #[error("No model candidates configured")]
    NoCandidates,

    #[error("Edit cancelled")]
    Cancelled,

    #[error("Missing html or instruction")]
    MissingInput,

    #[error("Prompt carries no UI tree context")]
    MissingContext,

    #[error("Tree error: {0}")]
    Tree(#[from] genui_tree::TreeError),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for EditError {
    fn from(err: serde_yaml::Error) -> Self {
        EditError::Config(err.to_string())
    }
}
