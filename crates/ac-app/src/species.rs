//! Species data staging for generic-gas runs.

use ac_case::CaseConfig;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Thermodynamic, transport and kinetics files the solver reads for a generic gas.
pub const SPECIES_FILES: [&str; 4] = [
    "tdata",
    "species_thermo_data",
    "species_transp_data_0",
    "kinetic_data",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesStaging {
    pub copied: Vec<String>,
    /// Source paths that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Copy species files into `analysis_dir` when the case asks for a generic gas.
///
/// Missing files are reported, not fatal. A failed copy of a file that does
/// exist is an error.
pub fn stage_species(case: &CaseConfig, analysis_dir: &Path) -> AppResult<SpeciesStaging> {
    let mut staging = SpeciesStaging::default();

    if !case.governing.is_generic_gas() {
        return Ok(staging);
    }
    let Some(species_dir) = case.species_dir.as_deref().filter(|d| d.is_dir()) else {
        tracing::info!("species_dir not set or not found; skipping species copy");
        return Ok(staging);
    };

    for name in SPECIES_FILES {
        let src = species_dir.join(name);
        if !src.is_file() {
            tracing::warn!(path = %src.display(), "missing species file");
            staging.missing.push(src);
            continue;
        }
        let dst = analysis_dir.join(name);
        std::fs::copy(&src, &dst).map_err(|source| AppError::Species {
            path: src.clone(),
            source,
        })?;
        staging.copied.push(name.to_string());
    }

    tracing::debug!(
        copied = staging.copied.len(),
        missing = staging.missing.len(),
        "staged species files"
    );
    Ok(staging)
}
