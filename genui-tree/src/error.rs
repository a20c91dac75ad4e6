use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("JSON error: {0}")]
    Json(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt has no {start}...{end} section")]
    MissingContext {
        start: &'static str,
        end: &'static str,
    },

    #[error("Tree has no root element")]
    MissingRoot,

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Json(err.to_string())
    }
}
