//! Error handling for the job tracker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobTrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, JobTrackError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for JobTrackError {
    fn from(err: anyhow::Error) -> Self {
        JobTrackError::Internal(err.to_string())
    }
}
