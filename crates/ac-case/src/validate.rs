//! Case validation logic.

use crate::schema::{
    BoundaryLayerDef, CaseConfig, InviscidFluxDef, ReferenceConditionsDef, SolverControlDef,
    SurfaceMeshDef,
};
use ac_sizing::SizingError;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &CaseConfig) -> Result<(), ValidationError> {
    if case.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.name.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "name".to_string(),
        });
    }

    validate_surface_mesh(&case.surface_mesh)?;
    if case.boundary_layer.enabled {
        validate_boundary_layer(&case.boundary_layer)?;
    }
    validate_reference(&case.reference)?;
    if let Some(flux) = &case.inviscid_flux {
        validate_inviscid_flux(flux)?;
    }
    validate_solver(&case.solver)?;

    Ok(())
}

fn validate_surface_mesh(mesh: &SurfaceMeshDef) -> Result<(), ValidationError> {
    let optional_positive = [
        ("surface_mesh.mesh_length_factor", mesh.mesh_length_factor),
        ("surface_mesh.max_scale", mesh.max_scale),
        ("surface_mesh.min_scale", mesh.min_scale),
        ("surface_mesh.ff_cdfr", mesh.ff_cdfr),
        ("surface_mesh.edge_weight", mesh.edge_weight),
        ("surface_mesh.wall_scale_factor", mesh.wall_scale_factor),
        ("surface_mesh.farfield_scale_factor", mesh.farfield_scale_factor),
    ];
    for (field, value) in optional_positive {
        if let Some(v) = value
            && !(v.is_finite() && v > 0.0)
        {
            return Err(invalid(field, v, "must be finite and > 0"));
        }
    }

    if let (Some(min), Some(max)) = (mesh.min_scale, mesh.max_scale)
        && min > max
    {
        return Err(invalid(
            "surface_mesh.min_scale",
            min,
            "must not exceed surface_mesh.max_scale",
        ));
    }

    if mesh.wall_group.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "surface_mesh.wall_group".to_string(),
        });
    }
    if mesh.farfield_group.trim().is_empty() {
        return Err(ValidationError::MissingField {
            field: "surface_mesh.farfield_group".to_string(),
        });
    }
    if mesh.wall_group == mesh.farfield_group {
        return Err(invalid(
            "surface_mesh.farfield_group",
            &mesh.farfield_group,
            "must differ from surface_mesh.wall_group",
        ));
    }

    Ok(())
}

/// Freestream and schedule checks come from the sizing constructors.
fn validate_boundary_layer(bl: &BoundaryLayerDef) -> Result<(), ValidationError> {
    bl.sizing_request().map_err(|e| sizing_to_validation(&e))?;

    if let Some(y_plus) = bl.y_plus
        && !(y_plus.is_finite() && y_plus > 0.0)
    {
        return Err(invalid("boundary_layer.y_plus", y_plus, "must be finite and > 0"));
    }
    if !(bl.scale_length.is_finite() && bl.scale_length > 0.0) {
        return Err(invalid(
            "boundary_layer.scale_length",
            bl.scale_length,
            "must be finite and > 0",
        ));
    }
    Ok(())
}

fn sizing_to_validation(err: &SizingError) -> ValidationError {
    let reason = err.to_string();
    match err {
        SizingError::InvalidFreestreamInput { what, value } => {
            let field = match *what {
                "freestream velocity" => "boundary_layer.freestream.u_inf_mps",
                "kinematic viscosity" => "boundary_layer.freestream.nu_m2ps",
                _ => "boundary_layer.freestream.x_ref_m",
            };
            invalid(field, value, &reason)
        }
        SizingError::InvalidGrowthRatio { ratio } => {
            invalid("boundary_layer.growth_ratio", ratio, &reason)
        }
        SizingError::InvalidLayerCount { layers } => {
            invalid("boundary_layer.max_layers", layers, &reason)
        }
        SizingError::InvalidYPlus { value } => invalid("boundary_layer.y_plus", value, &reason),
        SizingError::InvalidScaleLength { value } => {
            invalid("boundary_layer.scale_length", value, &reason)
        }
        SizingError::UnknownBlMode { mode } => invalid("boundary_layer.mode", mode, &reason),
        SizingError::NonPositiveSizingResult { what, value } => {
            invalid("boundary_layer", format!("{what} = {value}"), &reason)
        }
    }
}

fn validate_reference(reference: &ReferenceConditionsDef) -> Result<(), ValidationError> {
    if let Some(mach) = reference.mach
        && !(mach.is_finite() && mach >= 0.0)
    {
        return Err(invalid("reference.mach", mach, "must be finite and >= 0"));
    }

    let optional_positive = [
        ("reference.reynolds_number", reference.reynolds_number),
        ("reference.density", reference.density),
        ("reference.temperature", reference.temperature),
        ("reference.gridlength_conversion", reference.gridlength_conversion),
    ];
    for (field, value) in optional_positive {
        if let Some(v) = value
            && !(v.is_finite() && v > 0.0)
        {
            return Err(invalid(field, v, "must be finite and > 0"));
        }
    }
    Ok(())
}

fn validate_inviscid_flux(flux: &InviscidFluxDef) -> Result<(), ValidationError> {
    if flux.re_min_vswch > flux.re_max_vswch {
        return Err(invalid(
            "inviscid_flux.re_min_vswch",
            flux.re_min_vswch,
            "must not exceed inviscid_flux.re_max_vswch",
        ));
    }
    for (field, value) in [
        ("inviscid_flux.flux_construction", &flux.flux_construction),
        ("inviscid_flux.flux_construction_lhs", &flux.flux_construction_lhs),
        ("inviscid_flux.flux_limiter", &flux.flux_limiter),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_solver(solver: &SolverControlDef) -> Result<(), ValidationError> {
    if solver.mpi_procs == 0 {
        return Err(invalid("solver.mpi_procs", solver.mpi_procs, "must be >= 1"));
    }

    if let Some(schedule) = &solver.cfl_schedule {
        if schedule.len() != 2 {
            return Err(invalid(
                "solver.cfl_schedule",
                format!("{schedule:?}"),
                "expected [initial, final]",
            ));
        }
        if schedule.iter().any(|c| !(c.is_finite() && *c > 0.0)) {
            return Err(invalid(
                "solver.cfl_schedule",
                format!("{schedule:?}"),
                "CFL values must be finite and > 0",
            ));
        }
    }

    if let Some(iters) = &solver.cfl_schedule_iter
        && (iters.len() != 2 || iters[0] > iters[1])
    {
        return Err(invalid(
            "solver.cfl_schedule_iter",
            format!("{iters:?}"),
            "expected [start, end] with start <= end",
        ));
    }

    if solver.nodet_path.as_os_str().is_empty() {
        return Err(ValidationError::MissingField {
            field: "solver.nodet_path".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_case_is_valid() {
        validate_case(&CaseConfig::new("cone")).unwrap();
    }

    #[test]
    fn empty_name_rejected() {
        let case = CaseConfig::new("  ");
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut case = CaseConfig::new("cone");
        case.version = 99;
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn growth_ratio_of_one_is_named() {
        let mut case = CaseConfig::new("cone");
        case.boundary_layer.growth_ratio = 1.0;
        match validate_case(&case) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "boundary_layer.growth_ratio")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn negative_viscosity_is_named() {
        let mut case = CaseConfig::new("cone");
        case.boundary_layer.freestream.nu_m2ps = -1.0;
        match validate_case(&case) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "boundary_layer.freestream.nu_m2ps")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn disabled_boundary_layer_skips_sizing_checks() {
        let mut case = CaseConfig::new("cone");
        case.boundary_layer.enabled = false;
        case.boundary_layer.max_layers = 0;
        validate_case(&case).unwrap();
    }

    #[test]
    fn min_scale_above_max_scale_rejected() {
        let mut case = CaseConfig::new("cone");
        case.surface_mesh.min_scale = Some(2.0);
        case.surface_mesh.max_scale = Some(1.0);
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn cfl_schedule_shape_checked() {
        let mut case = CaseConfig::new("cone");
        case.solver.cfl_schedule = Some(vec![1.0]);
        assert!(validate_case(&case).is_err());

        case.solver.cfl_schedule = Some(vec![0.5, 20.0]);
        case.solver.cfl_schedule_iter = Some(vec![500, 1]);
        assert!(validate_case(&case).is_err());

        case.solver.cfl_schedule_iter = Some(vec![1, 500]);
        validate_case(&case).unwrap();
    }

    #[test]
    fn zero_mpi_procs_rejected() {
        let mut case = CaseConfig::new("cone");
        case.solver.mpi_procs = 0;
        assert!(validate_case(&case).is_err());
    }
}
