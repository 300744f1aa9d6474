//! Flow-solver interface inputs (project name, iteration control, boundary conditions).

use ac_case::CaseConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, AppResult};

pub const SOLVER_INPUTS_FILE: &str = "solver_inputs.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConditionDef {
    #[serde(rename = "bcType")]
    pub bc_type: String,
    /// `-1` marks an adiabatic wall.
    #[serde(rename = "wallTemperature", default, skip_serializing_if = "Option::is_none")]
    pub wall_temperature: Option<f64>,
    #[serde(rename = "machNumber", default, skip_serializing_if = "Option::is_none")]
    pub mach_number: Option<f64>,
    #[serde(rename = "totalTemperature", default, skip_serializing_if = "Option::is_none")]
    pub total_temperature: Option<f64>,
    #[serde(rename = "staticPressure", default, skip_serializing_if = "Option::is_none")]
    pub static_pressure: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverInputs {
    #[serde(rename = "Proj_Name")]
    pub proj_name: String,
    #[serde(rename = "Use_Python_NML")]
    pub use_python_nml: bool,
    #[serde(rename = "Overwrite_NML")]
    pub overwrite_nml: bool,
    #[serde(rename = "Num_Iter", default, skip_serializing_if = "Option::is_none")]
    pub num_iter: Option<u32>,
    #[serde(rename = "CFL_Schedule", default, skip_serializing_if = "Option::is_none")]
    pub cfl_schedule: Option<Vec<f64>>,
    #[serde(rename = "CFL_Schedule_Iter", default, skip_serializing_if = "Option::is_none")]
    pub cfl_schedule_iter: Option<Vec<u32>>,
    #[serde(rename = "Restart_Read", default, skip_serializing_if = "Option::is_none")]
    pub restart_read: Option<String>,
    #[serde(rename = "Boundary_Condition")]
    pub boundary_condition: BTreeMap<String, BoundaryConditionDef>,
}

pub fn solver_inputs(case: &CaseConfig) -> SolverInputs {
    let wall_bc = if case.boundary_layer.enabled {
        "Viscous"
    } else {
        "Inviscid"
    };

    let mut bcs = BTreeMap::new();
    bcs.insert(
        case.surface_mesh.wall_group.clone(),
        BoundaryConditionDef {
            bc_type: wall_bc.to_string(),
            wall_temperature: Some(-1.0),
            mach_number: None,
            total_temperature: None,
            static_pressure: None,
        },
    );
    bcs.insert(
        case.surface_mesh.farfield_group.clone(),
        BoundaryConditionDef {
            bc_type: "Freestream".to_string(),
            wall_temperature: None,
            mach_number: case.reference.mach,
            total_temperature: Some(1.0),
            static_pressure: Some(1.0),
        },
    );

    let solver = &case.solver;
    SolverInputs {
        proj_name: case.name.clone(),
        use_python_nml: solver.use_python_nml,
        overwrite_nml: solver.overwrite_nml,
        num_iter: solver.num_iter,
        cfl_schedule: solver.cfl_schedule.clone(),
        cfl_schedule_iter: solver.cfl_schedule_iter.clone(),
        restart_read: solver.restart_read.clone(),
        boundary_condition: bcs,
    }
}

pub fn write_solver_inputs(path: &Path, inputs: &SolverInputs) -> AppResult<()> {
    let json = serde_json::to_string_pretty(inputs)?;
    std::fs::write(path, json).map_err(|source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_condition_tracks_viscous_layers() {
        let mut case = CaseConfig::new("cone");
        case.reference.mach = Some(6.0);

        let inputs = solver_inputs(&case);
        assert_eq!(inputs.proj_name, "cone");
        assert_eq!(inputs.boundary_condition["blunt"].bc_type, "Viscous");
        assert_eq!(inputs.boundary_condition["blunt"].wall_temperature, Some(-1.0));
        let ff = &inputs.boundary_condition["Farfield"];
        assert_eq!(ff.bc_type, "Freestream");
        assert_eq!(ff.mach_number, Some(6.0));

        case.boundary_layer.enabled = false;
        let inputs = solver_inputs(&case);
        assert_eq!(inputs.boundary_condition["blunt"].bc_type, "Inviscid");
    }

    #[test]
    fn serialized_names_match_solver_interface() {
        let mut case = CaseConfig::new("cone");
        case.solver.num_iter = Some(2000);
        case.solver.cfl_schedule = Some(vec![0.1, 10.0]);

        let value = serde_json::to_value(solver_inputs(&case)).unwrap();
        assert_eq!(value["Proj_Name"], "cone");
        assert_eq!(value["Num_Iter"], 2000);
        assert_eq!(value["CFL_Schedule"][1], 10.0);
        assert_eq!(value["Use_Python_NML"], true);
        assert!(value.get("Restart_Read").is_none());
    }
}
