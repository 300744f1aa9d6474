//! Schema migration framework.
//!
//! Migration runs on the untyped document before deserialization, so files
//! from older layouts never have to parse as the current schema.
//!
//! Version 0 is the legacy flat layout: a single object of keys such as
//! `U_inf`, `BL_Mode`, `Mach` and `Flux_Construction`, with no `version` key.

use crate::CaseError;
use ac_sizing::BlMode;
use serde_json::{Map, Value, json};

pub const LATEST_VERSION: u32 = 1;

/// Version of an untyped case document. A missing `version` key means legacy (0).
pub fn document_version(doc: &Value) -> Result<u32, CaseError> {
    match doc.get("version") {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| CaseError::Migration {
                what: format!("version must be a non-negative integer, got {v}"),
            }),
    }
}

pub fn migrate_to_latest(mut doc: Value) -> Result<Value, CaseError> {
    let mut version = document_version(&doc)?;
    while version < LATEST_VERSION {
        doc = migrate_one_version(doc, version)?;
        version = document_version(&doc)?;
    }
    Ok(doc)
}

fn migrate_one_version(doc: Value, version: u32) -> Result<Value, CaseError> {
    match version {
        0 => migrate_v0_to_v1(doc),
        v => Err(CaseError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(doc: Value) -> Result<Value, CaseError> {
    let Value::Object(flat) = doc else {
        return Err(CaseError::Migration {
            what: "legacy case file must be a JSON/YAML object".to_string(),
        });
    };

    let mut case = Map::new();
    case.insert("version".to_string(), json!(1));
    case.insert(
        "name".to_string(),
        flat.get("Proj_Name")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| json!("case")),
    );

    let surface_mesh = section(
        &flat,
        &[
            ("Mesh_Length_Factor", "mesh_length_factor"),
            ("max_scale", "max_scale"),
            ("min_scale", "min_scale"),
            ("ff_cdfr", "ff_cdfr"),
            ("edgeWeight", "edge_weight"),
            ("blunt_scaleFactor", "wall_scale_factor"),
            ("farfield_scaleFactor", "farfield_scale_factor"),
        ],
    );
    case.insert("surface_mesh".to_string(), Value::Object(surface_mesh));

    case.insert(
        "boundary_layer".to_string(),
        Value::Object(legacy_boundary_layer(&flat)?),
    );

    let reference = section(
        &flat,
        &[
            ("Mach", "mach"),
            ("Re", "reynolds_number"),
            ("velocity", "velocity"),
            ("density", "density"),
            ("temperature", "temperature"),
            ("Alpha", "alpha_deg"),
            ("Beta", "beta_deg"),
            ("dim_input_type", "dim_input_type"),
            ("gridlength_conversion", "gridlength_conversion"),
        ],
    );
    case.insert("reference".to_string(), Value::Object(reference));

    let governing = section(
        &flat,
        &[
            ("Equation_Type", "eqn_type"),
            ("Viscous", "viscous_terms"),
            ("chemical_kinetics", "chemical_kinetics"),
            ("thermal_energy_model", "thermal_energy_model"),
            ("prandtlnumber_molecular", "prandtl_number_molecular"),
            ("gas_radiation", "gas_radiation"),
            ("rad_use_impl_lines", "rad_use_impl_lines"),
            ("multi_component_diff", "multi_component_diff"),
        ],
    );
    case.insert("governing".to_string(), Value::Object(governing));

    if present(&flat, "Flux_Construction") {
        let flux = section(
            &flat,
            &[
                ("Flux_Construction", "flux_construction"),
                ("Flux_Construction_LHS", "flux_construction_lhs"),
                ("Flux_Limiter", "flux_limiter"),
                ("Re_min_vswch", "re_min_vswch"),
                ("Re_max_vswch", "re_max_vswch"),
                ("Adaptive_Shock_Sensor", "adaptive_shock_sensor"),
                ("First_Order_Iterations", "first_order_iterations"),
            ],
        );
        case.insert("inviscid_flux".to_string(), Value::Object(flux));
    }

    let solver = section(
        &flat,
        &[
            ("Num_Iter", "num_iter"),
            ("CFL_Schedule", "cfl_schedule"),
            ("CFL_Schedule_Iter", "cfl_schedule_iter"),
            ("Restart_Read", "restart_read"),
            ("np", "mpi_procs"),
            ("Freeze_Limiter", "freeze_limiter"),
            ("Use_Python_NML", "use_python_nml"),
            ("Overwrite_NML", "overwrite_nml"),
        ],
    );
    case.insert("solver".to_string(), Value::Object(solver));

    if present(&flat, "Species_Dir") {
        case.insert("species_dir".to_string(), flat["Species_Dir"].clone());
    }

    Ok(Value::Object(case))
}

/// Rewrite an unrecognized `boundary_layer.mode` to wall-function mode.
///
/// Returns the original string when a rewrite happened.
pub fn apply_legacy_mode_fallback(doc: &mut Value) -> Option<String> {
    let mode = doc.get_mut("boundary_layer")?.get_mut("mode")?;
    let raw = mode.as_str()?.to_string();
    let (parsed, fell_back) = BlMode::from_legacy_str(&raw);
    if !fell_back {
        return None;
    }
    tracing::warn!(mode = %raw, "unrecognized boundary_layer.mode; using wall-function mode");
    *mode = json!(parsed.as_str());
    Some(raw)
}

fn legacy_boundary_layer(flat: &Map<String, Value>) -> Result<Map<String, Value>, CaseError> {
    let freestream_keys = [("U_inf", "u_inf_mps"), ("nu", "nu_m2ps"), ("x_ref", "x_ref_m")];
    let layer_keys = [
        ("BL_Growth_Ratio", "growth_ratio"),
        ("BL_Max_Layers", "max_layers"),
        ("BL_Scale_Length", "scale_length"),
    ];

    let enabled = freestream_keys
        .iter()
        .chain(layer_keys.iter())
        .any(|(key, _)| present(flat, key))
        || present(flat, "BL_Mode");

    let mut bl = Map::new();
    bl.insert("enabled".to_string(), json!(enabled));

    // Historical defaults applied field by field
    let defaults = [200.0, 1.5e-5, 2.0];
    let mut freestream = Map::new();
    for ((legacy, field), default) in freestream_keys.iter().zip(defaults) {
        let value = match flat.get(*legacy) {
            Some(v) if !v.is_null() => legacy_number(v, legacy)?,
            _ => default,
        };
        freestream.insert(field.to_string(), json!(value));
    }
    bl.insert("freestream".to_string(), Value::Object(freestream));

    if let Some(mode) = flat.get("BL_Mode").and_then(Value::as_str) {
        let (parsed, fell_back) = BlMode::from_legacy_str(mode);
        if fell_back {
            tracing::warn!(mode, "legacy BL_Mode not recognized; using wall-function mode");
        }
        bl.insert("mode".to_string(), json!(parsed.as_str()));
    }

    for (legacy, field) in layer_keys {
        if let Some(v) = flat.get(legacy).filter(|v| !v.is_null()) {
            let n = legacy_number(v, legacy)?;
            let value = if field == "max_layers" {
                json!(n as i64)
            } else {
                json!(n)
            };
            bl.insert(field.to_string(), value);
        }
    }

    Ok(bl)
}

/// Legacy files sometimes carry numbers as strings.
fn legacy_number(v: &Value, key: &str) -> Result<f64, CaseError> {
    let parsed = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CaseError::Migration {
        what: format!("legacy key {key} is not a number: {v}"),
    })
}

fn present(flat: &Map<String, Value>, key: &str) -> bool {
    flat.get(key).is_some_and(|v| !v.is_null())
}

fn section(flat: &Map<String, Value>, keys: &[(&str, &str)]) -> Map<String, Value> {
    keys.iter()
        .filter(|(legacy, _)| present(flat, legacy))
        .map(|(legacy, field)| (field.to_string(), flat[*legacy].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_latest_is_noop() {
        let doc = json!({"version": 1, "name": "cone"});
        let migrated = migrate_to_latest(doc.clone()).unwrap();
        assert_eq!(migrated, doc);
    }

    #[test]
    fn legacy_flat_layout_is_nested() {
        let doc = json!({
            "Proj_Name": "075_70deg",
            "Mesh_Length_Factor": 1.0,
            "edgeWeight": 0.5,
            "blunt_scaleFactor": 0.2,
            "U_inf": "150",
            "BL_Mode": "WallFunction",
            "BL_Max_Layers": 30,
            "Mach": 2.0,
            "Alpha": 0.0,
            "Equation_Type": "generic",
            "np": 8,
            "Freeze_Limiter": null
        });

        let migrated = migrate_to_latest(doc).unwrap();
        assert_eq!(migrated["version"], json!(1));
        assert_eq!(migrated["name"], json!("075_70deg"));
        assert_eq!(migrated["surface_mesh"]["edge_weight"], json!(0.5));
        assert_eq!(migrated["surface_mesh"]["wall_scale_factor"], json!(0.2));
        assert_eq!(migrated["boundary_layer"]["enabled"], json!(true));
        assert_eq!(
            migrated["boundary_layer"]["freestream"]["u_inf_mps"],
            json!(150.0)
        );
        assert_eq!(
            migrated["boundary_layer"]["freestream"]["nu_m2ps"],
            json!(1.5e-5)
        );
        assert_eq!(migrated["boundary_layer"]["mode"], json!("wallFunction"));
        assert_eq!(migrated["boundary_layer"]["max_layers"], json!(30));
        assert_eq!(migrated["reference"]["mach"], json!(2.0));
        assert_eq!(migrated["governing"]["eqn_type"], json!("generic"));
        assert_eq!(migrated["solver"]["mpi_procs"], json!(8));
        assert!(migrated["solver"].get("freeze_limiter").is_none());
        assert!(migrated.get("inviscid_flux").is_none());
    }

    #[test]
    fn legacy_unknown_mode_keeps_wall_function_meaning() {
        let migrated = migrate_to_latest(json!({"BL_Mode": "coarse"})).unwrap();
        assert_eq!(migrated["boundary_layer"]["mode"], json!("wallFunction"));
    }

    #[test]
    fn legacy_without_boundary_layer_keys_is_inviscid() {
        let migrated = migrate_to_latest(json!({"Mach": 6.0})).unwrap();
        assert_eq!(migrated["boundary_layer"]["enabled"], json!(false));
    }

    #[test]
    fn legacy_bad_number_is_reported() {
        let err = migrate_to_latest(json!({"U_inf": "fast"})).unwrap_err();
        assert!(err.to_string().contains("U_inf"));
    }

    #[test]
    fn fallback_rewrites_only_unknown_modes() {
        let mut doc = json!({"boundary_layer": {"mode": "hybrid"}});
        assert_eq!(apply_legacy_mode_fallback(&mut doc), Some("hybrid".to_string()));
        assert_eq!(doc["boundary_layer"]["mode"], json!("wallFunction"));

        let mut doc = json!({"boundary_layer": {"mode": "LOWRE"}});
        assert_eq!(apply_legacy_mode_fallback(&mut doc), None);
        assert_eq!(doc["boundary_layer"]["mode"], json!("LOWRE"));

        let mut doc = json!({"name": "no bl section"});
        assert_eq!(apply_legacy_mode_fallback(&mut doc), None);
    }

    #[test]
    fn non_integer_version_rejected() {
        assert!(migrate_to_latest(json!({"version": "one"})).is_err());
    }

    #[test]
    fn future_version_passes_through_for_validation() {
        let doc = json!({"version": 7, "name": "x"});
        assert_eq!(migrate_to_latest(doc.clone()).unwrap(), doc);
    }
}
