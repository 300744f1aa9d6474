//! ac-results: records of case preparations.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_prep_id;
pub use store::PrepStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preparation not found: {prep_id}")]
    PrepNotFound { prep_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
