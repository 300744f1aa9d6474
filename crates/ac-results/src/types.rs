//! Preparation record types.

use ac_sizing::SizingOutcome;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type PrepId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrepManifest {
    pub prep_id: PrepId,
    pub case_name: String,
    pub timestamp: String,
    pub tool_version: String,
    /// Absent when the case has no viscous layers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingOutcome>,
    pub outputs: PrepOutputs,
    /// Solver launch command, program first.
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PrepOutputs {
    pub analysis_dir: PathBuf,
    pub mesh_inputs: PathBuf,
    pub solver_inputs: PathBuf,
    pub namelist: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_copied: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_missing: Vec<String>,
}

impl PrepOutputs {
    /// Whether the analysis directory and every written input file still exist.
    pub fn all_present(&self) -> bool {
        self.analysis_dir.is_dir()
            && [&self.mesh_inputs, &self.solver_inputs, &self.namelist]
                .iter()
                .all(|p| p.is_file())
    }
}

/// Current time in the manifest timestamp format.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
