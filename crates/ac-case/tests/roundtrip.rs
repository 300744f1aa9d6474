use ac_case::*;
use ac_sizing::{BlMode, FlowRegime};
use std::path::PathBuf;

fn full_case() -> CaseConfig {
    let mut case = CaseConfig::new("075_70deg");
    case.geometry.csm_file = Some(PathBuf::from("075_70deg.csm"));
    case.surface_mesh.mesh_length_factor = Some(1.0);
    case.surface_mesh.max_scale = Some(0.2);
    case.surface_mesh.min_scale = Some(0.01);
    case.surface_mesh.ff_cdfr = Some(1.4);
    case.surface_mesh.edge_weight = Some(0.5);
    case.boundary_layer.mode = BlMode::WallFunction;
    case.boundary_layer.regime = FlowRegime::Laminar;
    case.boundary_layer.growth_ratio = 1.15;
    case.boundary_layer.max_layers = 30;
    case.reference.mach = Some(6.0);
    case.reference.alpha_deg = Some(0.0);
    case.reference.dim_input_type = Some("dimensional-SI".to_string());
    case.governing.eqn_type = Some("generic".to_string());
    case.governing.rad_use_impl_lines = true;
    case.inviscid_flux = Some(InviscidFluxDef {
        flux_construction: "ldfss".to_string(),
        flux_construction_lhs: "consistent".to_string(),
        flux_limiter: "hvanleer".to_string(),
        re_min_vswch: 1.0e-3,
        re_max_vswch: 1.0,
        adaptive_shock_sensor: true,
        first_order_iterations: 500,
    });
    case.solver.num_iter = Some(5000);
    case.solver.cfl_schedule = Some(vec![0.5, 20.0]);
    case.solver.cfl_schedule_iter = Some(vec![1, 500]);
    case.solver.freeze_limiter = Some(2000);
    case.species_dir = Some(PathBuf::from("species/air5"));
    case
}

#[test]
fn roundtrip_yaml_minimal_case() {
    let case = CaseConfig::new("Minimal");
    validate_case(&case).unwrap();

    let path = std::env::temp_dir().join("ac_case_roundtrip_minimal.yaml");
    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(case, loaded);
}

#[test]
fn roundtrip_yaml_full_case() {
    let case = full_case();
    let path = std::env::temp_dir().join("ac_case_roundtrip_full.yaml");
    save_yaml(&path, &case).unwrap();
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn roundtrip_json_full_case() {
    let case = full_case();
    let path = std::env::temp_dir().join("ac_case_roundtrip_full.json");
    save_json(&path, &case).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"wallFunction\""));
    assert!(text.contains("\"laminar\""));

    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn save_refuses_invalid_case() {
    let mut case = CaseConfig::new("bad");
    case.boundary_layer.max_layers = 0;
    let path = std::env::temp_dir().join("ac_case_invalid.yaml");
    let _ = std::fs::remove_file(&path);

    assert!(matches!(
        save_yaml(&path, &case),
        Err(CaseError::Validation(_))
    ));
    assert!(!path.exists());
}

#[test]
fn unknown_extension_rejected() {
    let path = std::env::temp_dir().join("ac_case.toml");
    assert!(matches!(
        load_case(&path),
        Err(CaseError::UnknownFormat { .. })
    ));
}
