//! ac-case: case configuration file format, validation, migration and batch edits.

pub mod migrate;
pub mod overrides;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use overrides::{Override, apply_overrides, find_case_file, update_cases};
pub use schema::*;
pub use validate::{ValidationError, validate_case};

use std::path::Path;

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Override error: {what}")]
    Override { what: String },

    #[error("Unknown case file format: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a case file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    Yaml,
    Json,
}

impl CaseFormat {
    pub fn from_path(path: &Path) -> CaseResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(CaseFormat::Yaml),
            Some("json") => Ok(CaseFormat::Json),
            _ => Err(CaseError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Options that relax how a case file is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Treat any unrecognized `boundary_layer.mode` as wall-function mode
    /// instead of failing.
    pub legacy_mode_fallback: bool,
}

/// Parse case text, migrating older layouts before deserializing.
pub fn parse_case(content: &str, format: CaseFormat) -> CaseResult<CaseConfig> {
    parse_case_with(content, format, LoadOptions::default())
}

pub fn parse_case_with(
    content: &str,
    format: CaseFormat,
    options: LoadOptions,
) -> CaseResult<CaseConfig> {
    let doc: serde_json::Value = match format {
        CaseFormat::Yaml => serde_yaml::from_str(content)?,
        CaseFormat::Json => serde_json::from_str(content)?,
    };
    let mut doc = migrate_to_latest(doc)?;
    if options.legacy_mode_fallback {
        migrate::apply_legacy_mode_fallback(&mut doc);
    }
    let case: CaseConfig = serde_json::from_value(doc)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn load_yaml(path: &Path) -> CaseResult<CaseConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_case(&content, CaseFormat::Yaml)
}

pub fn save_yaml(path: &Path, case: &CaseConfig) -> CaseResult<()> {
    validate_case(case)?;
    let content = serde_yaml::to_string(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> CaseResult<CaseConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_case(&content, CaseFormat::Json)
}

pub fn save_json(path: &Path, case: &CaseConfig) -> CaseResult<()> {
    validate_case(case)?;
    let content = serde_json::to_string_pretty(case)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a case file, choosing the format from its extension.
pub fn load_case(path: &Path) -> CaseResult<CaseConfig> {
    load_case_with(path, LoadOptions::default())
}

pub fn load_case_with(path: &Path, options: LoadOptions) -> CaseResult<CaseConfig> {
    let format = CaseFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_case_with(&content, format, options)
}

pub fn save_case(path: &Path, case: &CaseConfig, format: CaseFormat) -> CaseResult<()> {
    match format {
        CaseFormat::Yaml => save_yaml(path, case),
        CaseFormat::Json => save_json(path, case),
    }
}
