//! Mesh-generator input adapter.
//!
//! This is the only place that knows the surface/volume mesher input names;
//! sizing itself stays in `ac-sizing`.

use ac_case::CaseConfig;
use ac_sizing::{BlControls, SizingOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, AppResult};

pub const MESH_INPUTS_FILE: &str = "mesh_inputs.json";

/// Per-group mesher controls. Unset entries are left out of the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSizing {
    #[serde(rename = "edgeWeight", default, skip_serializing_if = "Option::is_none")]
    pub edge_weight: Option<f64>,
    #[serde(rename = "scaleFactor", default, skip_serializing_if = "Option::is_none")]
    pub scale_factor: Option<f64>,
    #[serde(rename = "bcType", default, skip_serializing_if = "Option::is_none")]
    pub bc_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMeshInputs {
    #[serde(rename = "Mesh_Length_Factor", default, skip_serializing_if = "Option::is_none")]
    pub mesh_length_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ff_cdfr: Option<f64>,
    #[serde(rename = "Mesh_Sizing")]
    pub mesh_sizing: BTreeMap<String, GroupSizing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMeshInputs {
    #[serde(rename = "Mesh_Format")]
    pub mesh_format: String,
    #[serde(rename = "Mesh_Quiet_Flag")]
    pub mesh_quiet_flag: bool,
    #[serde(flatten)]
    pub boundary_layer: Option<BlControls>,
    #[serde(rename = "Mesh_Gen_Input_String", default, skip_serializing_if = "Option::is_none")]
    pub mesh_gen_input_string: Option<String>,
    #[serde(rename = "Mesh_Sizing")]
    pub mesh_sizing: BTreeMap<String, GroupSizing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshGeneratorInputs {
    pub surface: SurfaceMeshInputs,
    pub volume: VolumeMeshInputs,
}

/// Map a case and its sizing onto mesher inputs.
///
/// Boundary-layer controls and the `-blc` switch appear only when `sizing` is
/// present.
pub fn mesh_generator_inputs(case: &CaseConfig, sizing: Option<&SizingOutcome>) -> MeshGeneratorInputs {
    let sm = &case.surface_mesh;

    let mut surface_groups = BTreeMap::new();
    surface_groups.insert(
        sm.wall_group.clone(),
        GroupSizing {
            edge_weight: sm.edge_weight,
            scale_factor: sm.wall_scale_factor,
            bc_type: None,
        },
    );
    surface_groups.insert(
        sm.farfield_group.clone(),
        GroupSizing {
            edge_weight: None,
            scale_factor: sm.farfield_scale_factor,
            bc_type: Some("Farfield".to_string()),
        },
    );

    let mut volume_groups = BTreeMap::new();
    if sizing.is_some() {
        volume_groups.insert(
            sm.wall_group.clone(),
            GroupSizing {
                bc_type: Some("Viscous".to_string()),
                ..Default::default()
            },
        );
    }
    volume_groups.insert(
        sm.farfield_group.clone(),
        GroupSizing {
            bc_type: Some("Farfield".to_string()),
            ..Default::default()
        },
    );

    MeshGeneratorInputs {
        surface: SurfaceMeshInputs {
            mesh_length_factor: sm.mesh_length_factor,
            max_scale: sm.max_scale,
            min_scale: sm.min_scale,
            ff_cdfr: sm.ff_cdfr,
            mesh_sizing: surface_groups,
        },
        volume: VolumeMeshInputs {
            mesh_format: "VTK".to_string(),
            mesh_quiet_flag: false,
            boundary_layer: sizing.map(SizingOutcome::bl_controls),
            mesh_gen_input_string: sizing.map(|_| "-blc".to_string()),
            mesh_sizing: volume_groups,
        },
    }
}

pub fn write_mesh_inputs(path: &Path, inputs: &MeshGeneratorInputs) -> AppResult<()> {
    let json = serde_json::to_string_pretty(inputs)?;
    std::fs::write(path, json).map_err(|source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}
