//! Case loading, saving, summaries and batch edits.

use ac_case::{CaseConfig, CaseFormat, LoadOptions, Override};
use ac_sizing::BlMode;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Summary of a case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub name: String,
    pub boundary_layer: Option<BlMode>,
    pub max_layers: Option<i64>,
    pub generic_gas: bool,
    pub has_flux_section: bool,
    pub mpi_procs: u32,
}

/// Load, migrate and validate a case file (YAML or JSON by extension).
pub fn load_case(path: &Path, options: LoadOptions) -> AppResult<CaseConfig> {
    let case = ac_case::load_case_with(path, options)?;
    tracing::debug!(path = %path.display(), name = %case.name, "loaded case");
    Ok(case)
}

/// Save a case in the format implied by `path`.
pub fn save_case(path: &Path, case: &CaseConfig) -> AppResult<()> {
    let format = CaseFormat::from_path(path)?;
    ac_case::save_case(path, case, format)?;
    Ok(())
}

pub fn summarize(case: &CaseConfig) -> CaseSummary {
    let bl = &case.boundary_layer;
    CaseSummary {
        name: case.name.clone(),
        boundary_layer: bl.enabled.then_some(bl.mode),
        max_layers: bl.enabled.then_some(bl.max_layers),
        generic_gas: case.governing.is_generic_gas(),
        has_flux_section: case.inviscid_flux.is_some(),
        mpi_procs: case.solver.mpi_procs,
    }
}

/// Parse `section.key=value` assignments.
pub fn parse_overrides(assignments: &[String]) -> AppResult<Vec<Override>> {
    assignments
        .iter()
        .map(|a| a.parse::<Override>().map_err(AppError::from))
        .collect()
}

/// Apply assignments to every case directory under `root`.
pub fn update_cases(root: &Path, assignments: &[String]) -> AppResult<Vec<PathBuf>> {
    if assignments.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one key=value assignment is required".to_string(),
        ));
    }
    let overrides = parse_overrides(assignments)?;
    let updated = ac_case::update_cases(root, &overrides)?;
    tracing::info!(count = updated.len(), root = %root.display(), "updated cases");
    Ok(updated)
}

/// Rewrite a case file in the current schema, in place or to `output`.
pub fn migrate_case_file(path: &Path, output: Option<&Path>) -> AppResult<PathBuf> {
    let case = load_case(path, LoadOptions::default())?;
    let target = output.unwrap_or(path).to_path_buf();
    save_case(&target, &case)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_disabled_boundary_layer() {
        let mut case = CaseConfig::new("cone");
        let summary = summarize(&case);
        assert_eq!(summary.boundary_layer, Some(BlMode::LowRe));
        assert_eq!(summary.max_layers, Some(40));

        case.boundary_layer.enabled = false;
        let summary = summarize(&case);
        assert_eq!(summary.boundary_layer, None);
        assert_eq!(summary.max_layers, None);
    }

    #[test]
    fn summary_reports_flux_section_and_gas_model() {
        let mut case = CaseConfig::new("entry");
        let summary = summarize(&case);
        assert!(!summary.has_flux_section);
        assert!(!summary.generic_gas);

        case.governing.eqn_type = Some("generic".to_string());
        case.inviscid_flux = Some(ac_case::InviscidFluxDef {
            flux_construction: "ldfss".to_string(),
            flux_construction_lhs: "vanleer".to_string(),
            flux_limiter: "hvanalbada".to_string(),
            re_min_vswch: 1.0e-3,
            re_max_vswch: 1.0,
            adaptive_shock_sensor: false,
            first_order_iterations: 100,
        });
        let summary = summarize(&case);
        assert!(summary.has_flux_section);
        assert!(summary.generic_gas);
    }

    #[test]
    fn update_requires_assignments() {
        let err = update_cases(Path::new("."), &[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn bad_assignment_is_reported() {
        let err = parse_overrides(&["no_equals_sign".to_string()]).unwrap_err();
        assert!(err.to_string().contains("key=value"));
    }
}
