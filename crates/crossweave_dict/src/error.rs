use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictError {
    #[error("The dictionary has no answer matching the request")]
    DataUnavailable,

    #[error("Invalid candidate pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dictionary file: {0}")]
    Format(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, DictError>;
