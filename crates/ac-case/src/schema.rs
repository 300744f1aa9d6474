//! Case configuration schema definitions.

use ac_sizing::{
    BlMode, FlowRegime, FreestreamState, LayerSchedule, SizingError, SizingRequest,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseConfig {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub geometry: GeometryDef,
    #[serde(default)]
    pub surface_mesh: SurfaceMeshDef,
    #[serde(default)]
    pub boundary_layer: BoundaryLayerDef,
    #[serde(default)]
    pub reference: ReferenceConditionsDef,
    #[serde(default)]
    pub governing: GoverningEquationsDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inviscid_flux: Option<InviscidFluxDef>,
    #[serde(default)]
    pub solver: SolverControlDef,
    /// Directory holding species thermo/transport/kinetics files for generic gas runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_dir: Option<PathBuf>,
}

impl CaseConfig {
    /// Minimal case with every section at its defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            geometry: GeometryDef::default(),
            surface_mesh: SurfaceMeshDef::default(),
            boundary_layer: BoundaryLayerDef::default(),
            reference: ReferenceConditionsDef::default(),
            governing: GoverningEquationsDef::default(),
            inviscid_flux: None,
            solver: SolverControlDef::default(),
            species_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeometryDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csm_file: Option<PathBuf>,
}

/// Surface mesher controls. Unset values are left to the mesher's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceMeshDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_length_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    /// Farfield distance factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ff_cdfr: Option<f64>,
    #[serde(default = "default_wall_group")]
    pub wall_group: String,
    #[serde(default = "default_farfield_group")]
    pub farfield_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_scale_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farfield_scale_factor: Option<f64>,
}

fn default_wall_group() -> String {
    "blunt".to_string()
}

fn default_farfield_group() -> String {
    "Farfield".to_string()
}

impl Default for SurfaceMeshDef {
    fn default() -> Self {
        Self {
            mesh_length_factor: None,
            max_scale: None,
            min_scale: None,
            ff_cdfr: None,
            wall_group: default_wall_group(),
            farfield_group: default_farfield_group(),
            edge_weight: None,
            wall_scale_factor: None,
            farfield_scale_factor: None,
        }
    }
}

/// Viscous prism-layer settings.
///
/// ```yaml
/// boundary_layer:
///   enabled: true
///   freestream: { u_inf_mps: 200.0, nu_m2ps: 1.5e-5, x_ref_m: 2.0 }
///   mode: lowRe          # or wallFunction
///   growth_ratio: 1.2
///   max_layers: 40
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryLayerDef {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub freestream: FreestreamDef,
    #[serde(default)]
    pub mode: BlMode,
    #[serde(default)]
    pub regime: FlowRegime,
    /// Overrides the y+ implied by `mode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_plus: Option<f64>,
    #[serde(default = "default_growth_ratio")]
    pub growth_ratio: f64,
    #[serde(default = "default_max_layers")]
    pub max_layers: i64,
    #[serde(default = "default_scale_length")]
    pub scale_length: f64,
}

fn default_true() -> bool {
    true
}

fn default_growth_ratio() -> f64 {
    LayerSchedule::DEFAULT_GROWTH_RATIO
}

fn default_max_layers() -> i64 {
    i64::from(LayerSchedule::DEFAULT_MAX_LAYERS)
}

fn default_scale_length() -> f64 {
    1.0
}

impl Default for BoundaryLayerDef {
    fn default() -> Self {
        Self {
            enabled: true,
            freestream: FreestreamDef::default(),
            mode: BlMode::default(),
            regime: FlowRegime::default(),
            y_plus: None,
            growth_ratio: default_growth_ratio(),
            max_layers: default_max_layers(),
            scale_length: default_scale_length(),
        }
    }
}

impl BoundaryLayerDef {
    /// Build the sizing request this section describes.
    pub fn sizing_request(&self) -> Result<SizingRequest, SizingError> {
        let freestream = FreestreamState::from_si(
            self.freestream.u_inf_mps,
            self.freestream.nu_m2ps,
            self.freestream.x_ref_m,
        )?;
        let schedule = LayerSchedule::new(self.growth_ratio, self.max_layers)?;
        let mut request = SizingRequest::new(freestream, self.mode, schedule)
            .with_regime(self.regime)
            .with_scale_length(self.scale_length);
        if let Some(y_plus) = self.y_plus {
            request = request.with_y_plus(y_plus);
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreestreamDef {
    pub u_inf_mps: f64,
    pub nu_m2ps: f64,
    pub x_ref_m: f64,
}

impl Default for FreestreamDef {
    fn default() -> Self {
        Self {
            u_inf_mps: 200.0,
            nu_m2ps: 1.5e-5,
            x_ref_m: 2.0,
        }
    }
}

/// `&reference_physical_properties` inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReferenceConditionsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mach: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reynolds_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim_input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gridlength_conversion: Option<f64>,
}

/// `&governing_equations` inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GoverningEquationsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eqn_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viscous_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_kinetics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thermal_energy_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prandtl_number_molecular: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_radiation: Option<String>,
    #[serde(default)]
    pub rad_use_impl_lines: bool,
    #[serde(default)]
    pub multi_component_diff: bool,
}

impl GoverningEquationsDef {
    /// Generic-gas runs need species data files next to the namelist.
    pub fn is_generic_gas(&self) -> bool {
        self.eqn_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("generic"))
    }
}

/// `&inviscid_flux_method` inputs. All fields are required when the section is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InviscidFluxDef {
    pub flux_construction: String,
    pub flux_construction_lhs: String,
    pub flux_limiter: String,
    pub re_min_vswch: f64,
    pub re_max_vswch: f64,
    #[serde(default)]
    pub adaptive_shock_sensor: bool,
    pub first_order_iterations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverControlDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_iter: Option<u32>,
    /// Initial and final CFL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfl_schedule: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfl_schedule_iter: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_read: Option<String>,
    #[serde(default = "default_mpi_procs")]
    pub mpi_procs: u32,
    #[serde(default = "default_nodet_path")]
    pub nodet_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze_limiter: Option<u32>,
    #[serde(default = "default_true")]
    pub use_python_nml: bool,
    #[serde(default = "default_true")]
    pub overwrite_nml: bool,
}

fn default_mpi_procs() -> u32 {
    4
}

fn default_nodet_path() -> PathBuf {
    PathBuf::from("nodet_mpi")
}

impl Default for SolverControlDef {
    fn default() -> Self {
        Self {
            num_iter: None,
            cfl_schedule: None,
            cfl_schedule_iter: None,
            restart_read: None,
            mpi_procs: default_mpi_procs(),
            nodet_path: default_nodet_path(),
            freeze_limiter: None,
            use_python_nml: true,
            overwrite_nml: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "version: 1\nname: cone\n";
        let case: CaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case, CaseConfig::new("cone"));
        assert_eq!(case.surface_mesh.wall_group, "blunt");
        assert_eq!(case.boundary_layer.max_layers, 40);
        assert_eq!(case.solver.mpi_procs, 4);
    }

    #[test]
    fn mode_is_case_insensitive_in_files() {
        let yaml = "version: 1\nname: c\nboundary_layer:\n  mode: WALLFUNCTION\n";
        let case: CaseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case.boundary_layer.mode, BlMode::WallFunction);
    }

    #[test]
    fn unknown_mode_fails_to_parse() {
        let yaml = "version: 1\nname: c\nboundary_layer:\n  mode: hybrid\n";
        let err = serde_yaml::from_str::<CaseConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("hybrid"));
    }

    #[test]
    fn sizing_request_uses_section_values() {
        let bl = BoundaryLayerDef {
            y_plus: Some(2.0),
            scale_length: 0.5,
            ..Default::default()
        };
        let req = bl.sizing_request().unwrap();
        assert_eq!(req.y_plus_target(), 2.0);
        assert_eq!(req.scale_length, 0.5);
        assert_eq!(req.schedule.max_layers(), 40);
    }

    #[test]
    fn generic_gas_detection() {
        let mut gov = GoverningEquationsDef::default();
        assert!(!gov.is_generic_gas());
        gov.eqn_type = Some("Generic".to_string());
        assert!(gov.is_generic_gas());
    }
}
