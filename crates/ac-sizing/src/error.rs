//! Error types for boundary-layer sizing.

use ac_core::error::AcError;
use thiserror::Error;

/// Conditions that abort sizing. None of these are recoverable: the caller
/// must stop before any mesh generation is attempted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("Invalid freestream input: {what} must be finite and > 0 (got {value})")]
    InvalidFreestreamInput { what: &'static str, value: f64 },

    #[error("Invalid growth ratio: {ratio} (must be > 1.0)")]
    InvalidGrowthRatio { ratio: f64 },

    #[error("Invalid layer count: {layers} (must be >= 1)")]
    InvalidLayerCount { layers: i64 },

    #[error("Non-positive sizing result: {what} = {value}")]
    NonPositiveSizingResult { what: &'static str, value: f64 },

    #[error("Unknown boundary-layer mode '{mode}' (expected 'lowRe' or 'wallFunction')")]
    UnknownBlMode { mode: String },

    #[error("Invalid length scale: {value} (must be finite and > 0)")]
    InvalidScaleLength { value: f64 },

    #[error("Invalid y+ target: {value} (must be finite and > 0)")]
    InvalidYPlus { value: f64 },
}

pub type SizingResult<T> = Result<T, SizingError>;

impl From<SizingError> for AcError {
    fn from(e: SizingError) -> Self {
        match e {
            SizingError::NonPositiveSizingResult { what, value } => AcError::Invariant {
                what: format!("{what} is non-positive ({value})"),
            },
            other => AcError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
