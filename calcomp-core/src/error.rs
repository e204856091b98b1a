//! Error types for calcomp.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a holiday dataset.
///
/// Gaps the pipeline can absorb (a missing optional layer, an impossible
/// leap date, an unknown rule id) never surface here.
#[derive(Error, Debug)]
pub enum CalCompError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file '{}' not found", .0.display())]
    SettingsNotFound(PathBuf),

    #[error("API key '{0}' not found in settings, .env file, or environment variables")]
    MissingApiKey(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<serde_json::Error> for CalCompError {
    fn from(e: serde_json::Error) -> Self {
        CalCompError::Serialization(e.to_string())
    }
}

/// Result type alias for calcomp operations.
pub type CalCompResult<T> = Result<T, CalCompError>;
