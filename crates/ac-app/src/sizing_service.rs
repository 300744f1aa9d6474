//! Case configuration -> boundary-layer sizing.

use ac_case::CaseConfig;
use ac_sizing::{SizingOutcome, size_boundary_layer};

use crate::error::AppResult;

/// Size the prism stack for a case. `None` when viscous layers are disabled.
///
/// Fails before anything is written if any sizing precondition is violated.
pub fn size_case(case: &CaseConfig) -> AppResult<Option<SizingOutcome>> {
    let bl = &case.boundary_layer;
    if !bl.enabled {
        tracing::info!(case = %case.name, "boundary layer disabled; skipping sizing");
        return Ok(None);
    }

    let request = bl.sizing_request()?;
    let outcome = size_boundary_layer(&request)?;

    tracing::info!(
        case = %case.name,
        mode = %outcome.mode,
        re_x = outcome.reynolds_number,
        dy1_m = outcome.first_cell_height_m,
        thickness_m = outcome.total_thickness_m,
        "sized boundary layer"
    );
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use ac_sizing::SizingError;

    #[test]
    fn default_case_sizes() {
        let case = CaseConfig::new("cone");
        let outcome = size_case(&case).unwrap().expect("enabled by default");
        assert_eq!(outcome.y_plus, 1.0);
        assert_eq!(outcome.max_layers, 40);
    }

    #[test]
    fn disabled_case_has_no_sizing() {
        let mut case = CaseConfig::new("cone");
        case.boundary_layer.enabled = false;
        assert!(size_case(&case).unwrap().is_none());
    }

    #[test]
    fn invalid_growth_ratio_surfaces_as_sizing_error() {
        let mut case = CaseConfig::new("cone");
        case.boundary_layer.growth_ratio = 0.9;
        assert!(matches!(
            size_case(&case),
            Err(AppError::Sizing(SizingError::InvalidGrowthRatio { .. }))
        ));
    }
}
