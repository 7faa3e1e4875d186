use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeakerError {
    #[error("No such source: {}", .0.join(", "))]
    UnknownSources(Vec<String>),

    #[error("Source registered twice: {0}")]
    DuplicateSource(String),

    #[error("Failed to read targets: {0}")]
    Input(#[source] io::Error),

    #[error("Failed to write results: {0}")]
    Output(#[source] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {path:?} - {message}")]
    FileError {
        path: PathBuf,
        message: String,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Scan cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for LeakerError {
    fn from(error: serde_json::Error) -> Self {
        LeakerError::SerializationError(error.to_string())
    }
}

pub type LeakerResult<T> = std::result::Result<T, LeakerError>;

/// Failure of a single (target, source) query. Never aborts a run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no match")]
    NotFound,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not parse response: {0}")]
    Parse(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("cancelled")]
    Cancelled,

    #[error("source panicked")]
    Panicked,
}

impl From<serde_json::Error> for SourceError {
    fn from(error: serde_json::Error) -> Self {
        SourceError::Parse(error.to_string())
    }
}
