//! Error types for the ac-app service layer.

use ac_sizing::SizingError;
use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Boundary-layer sizing failed: {0}")]
    Sizing(#[from] SizingError),

    #[error("Failed to write {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to stage species file {path}")]
    Species {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Results error: {0}")]
    Results(String),

    #[error("Preparation not found: {0}")]
    PrepNotFound(String),

    #[error("Solver launch failed: {message}")]
    SolverLaunch { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ac-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ac_case::CaseError> for AppError {
    fn from(err: ac_case::CaseError) -> Self {
        AppError::Case(err.to_string())
    }
}

impl From<ac_results::ResultsError> for AppError {
    fn from(err: ac_results::ResultsError) -> Self {
        match err {
            ac_results::ResultsError::PrepNotFound { prep_id } => AppError::PrepNotFound(prep_id),
            other => AppError::Results(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
