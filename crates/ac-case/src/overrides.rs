//! Batch editing of stored case files.
//!
//! An override is a `section.key=value` assignment. The value is parsed as
//! JSON when possible (`2.0`, `true`, `[1, 500]`) and kept as a string
//! otherwise, so `governing.eqn_type=generic` needs no quoting.

use crate::schema::CaseConfig;
use crate::{CaseError, CaseFormat, CaseResult, load_case, save_case};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File names searched, in order, inside each case directory.
pub const CASE_FILE_NAMES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];

#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    pub path: Vec<String>,
    pub value: Value,
}

impl FromStr for Override {
    type Err = CaseError;

    fn from_str(s: &str) -> CaseResult<Self> {
        let (key, raw) = s.split_once('=').ok_or_else(|| CaseError::Override {
            what: format!("expected key=value, got '{s}'"),
        })?;

        let path: Vec<String> = key.trim().split('.').map(str::to_string).collect();
        if path.iter().any(|p| p.is_empty()) || path == ["version"] {
            return Err(CaseError::Override {
                what: format!("invalid key '{}'", key.trim()),
            });
        }

        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Self { path, value })
    }
}

impl std::fmt::Display for Override {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.path.join("."), self.value)
    }
}

/// Set one value in an untyped document, creating intermediate tables.
pub fn apply_override(doc: &mut Value, ov: &Override) -> CaseResult<()> {
    let Some((last, parents)) = ov.path.split_last() else {
        return Err(CaseError::Override {
            what: "empty key".to_string(),
        });
    };

    let mut cursor = doc;
    for key in parents {
        let table = cursor.as_object_mut().ok_or_else(|| CaseError::Override {
            what: format!("'{}' is not a table", ov.path.join(".")),
        })?;
        cursor = table
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if cursor.is_null() {
            *cursor = Value::Object(Map::new());
        }
    }

    let table = cursor.as_object_mut().ok_or_else(|| CaseError::Override {
        what: format!("'{}' is not a table", ov.path.join(".")),
    })?;
    table.insert(last.clone(), ov.value.clone());
    Ok(())
}

/// Apply overrides to a typed case and re-validate the result.
pub fn apply_overrides(case: &CaseConfig, overrides: &[Override]) -> CaseResult<CaseConfig> {
    let mut doc = serde_json::to_value(case)?;
    for ov in overrides {
        apply_override(&mut doc, ov)?;
    }
    let updated: CaseConfig = serde_json::from_value(doc)?;
    crate::validate_case(&updated)?;
    Ok(updated)
}

/// Locate the case file inside a case directory.
pub fn find_case_file(dir: &Path) -> Option<PathBuf> {
    CASE_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

/// Apply overrides to every `<root>/<case>/config.*` and rewrite each file in
/// its original format. Returns the updated files in directory order.
///
/// Every case is loaded, edited and validated before any file is written, so
/// one invalid result leaves all files untouched.
pub fn update_cases(root: &Path, overrides: &[Override]) -> CaseResult<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    let mut pending = Vec::new();
    for dir in dirs {
        let Some(path) = find_case_file(&dir) else {
            tracing::debug!(dir = %dir.display(), "no case file; skipping");
            continue;
        };
        let format = CaseFormat::from_path(&path)?;
        let case = load_case(&path)?;
        let case = apply_overrides(&case, overrides).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "override rejected; no case written");
        })?;
        pending.push((path, case, format));
    }

    let mut updated = Vec::with_capacity(pending.len());
    for (path, case, format) in pending {
        save_case(&path, &case, format)?;
        tracing::info!(path = %path.display(), "updated case");
        updated.push(path);
    }
    Ok(updated)
}
