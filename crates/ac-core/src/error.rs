use thiserror::Error;

pub type AcResult<T> = Result<T, AcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
