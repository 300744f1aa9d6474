//! Fortran namelist blocks for the flow solver.

use ac_case::CaseConfig;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{AppError, AppResult};

pub const NAMELIST_FILE: &str = "fun3d.nml";

#[derive(Debug, Clone, PartialEq)]
pub enum NamelistValue {
    Str(String),
    Real(f64),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for NamelistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamelistValue::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
            // Debug keeps the decimal point on whole numbers.
            NamelistValue::Real(x) => write!(f, "{x:?}"),
            NamelistValue::Int(i) => write!(f, "{i}"),
            NamelistValue::Bool(true) => f.write_str(".true."),
            NamelistValue::Bool(false) => f.write_str(".false."),
        }
    }
}

impl From<f64> for NamelistValue {
    fn from(x: f64) -> Self {
        NamelistValue::Real(x)
    }
}

impl From<bool> for NamelistValue {
    fn from(b: bool) -> Self {
        NamelistValue::Bool(b)
    }
}

impl From<u32> for NamelistValue {
    fn from(i: u32) -> Self {
        NamelistValue::Int(i64::from(i))
    }
}

impl From<&str> for NamelistValue {
    fn from(s: &str) -> Self {
        NamelistValue::Str(s.to_string())
    }
}

impl From<String> for NamelistValue {
    fn from(s: String) -> Self {
        NamelistValue::Str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamelistBlock {
    pub name: String,
    pub entries: Vec<(String, NamelistValue)>,
}

impl NamelistBlock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<NamelistValue>) -> &mut Self {
        self.entries.push((key.to_string(), value.into()));
        self
    }

    /// Skip unset optionals.
    pub fn set_opt<V: Into<NamelistValue>>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for NamelistBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "&{}", self.name)?;
        for (key, value) in &self.entries {
            writeln!(f, "  {key} = {value}")?;
        }
        writeln!(f, "/")?;
        writeln!(f)
    }
}

pub fn namelist_blocks(case: &CaseConfig) -> Vec<NamelistBlock> {
    let mut blocks = Vec::with_capacity(4);

    let r = &case.reference;
    let mut reference = NamelistBlock::new("reference_physical_properties");
    reference
        .set_opt("dim_input_type", r.dim_input_type.clone())
        .set_opt("gridlength_conversion", r.gridlength_conversion)
        .set_opt("mach_number", r.mach)
        .set_opt("reynolds_number", r.reynolds_number)
        .set_opt("velocity", r.velocity)
        .set_opt("density", r.density)
        .set_opt("temperature", r.temperature)
        .set_opt("angle_of_attack", r.alpha_deg)
        .set_opt("angle_of_yaw", r.beta_deg);
    blocks.push(reference);

    let g = &case.governing;
    let mut governing = NamelistBlock::new("governing_equations");
    governing
        .set_opt("eqn_type", g.eqn_type.clone())
        .set_opt("viscous_terms", g.viscous_terms.clone())
        .set_opt("chemical_kinetics", g.chemical_kinetics.clone())
        .set_opt("thermal_energy_model", g.thermal_energy_model.clone())
        .set_opt("prandtlnumber_molecular", g.prandtl_number_molecular)
        .set_opt("gas_radiation", g.gas_radiation.clone())
        .set("rad_use_impl_lines", g.rad_use_impl_lines)
        .set("multi_component_diff", g.multi_component_diff);
    blocks.push(governing);

    if let Some(flux) = &case.inviscid_flux {
        let mut block = NamelistBlock::new("inviscid_flux_method");
        block
            .set("flux_construction", flux.flux_construction.as_str())
            .set("flux_construction_lhs", flux.flux_construction_lhs.as_str())
            .set("flux_limiter", flux.flux_limiter.as_str())
            .set("re_min_vswch", flux.re_min_vswch)
            .set("re_max_vswch", flux.re_max_vswch)
            .set("adaptive_shock_sensor", flux.adaptive_shock_sensor)
            .set("first_order_iterations", flux.first_order_iterations);
        blocks.push(block);
    }

    let mut linear = NamelistBlock::new("linear_solver_control");
    linear.set("linear_projection", true);
    blocks.push(linear);

    blocks
}

pub fn render_namelist(case: &CaseConfig) -> String {
    namelist_blocks(case)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Write the rendered blocks to `path`, truncating first when `overwrite` is set.
pub fn write_namelist(path: &Path, text: &str, overwrite: bool) -> AppResult<()> {
    let to_err = |source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(!overwrite)
        .truncate(overwrite)
        .open(path)
        .map_err(to_err)?;
    file.write_all(text.as_bytes()).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ac_case::InviscidFluxDef;

    #[test]
    fn values_render_in_fortran_syntax() {
        assert_eq!(NamelistValue::from("ldfss").to_string(), "'ldfss'");
        assert_eq!(NamelistValue::from("it's").to_string(), "'it''s'");
        assert_eq!(NamelistValue::from(6.0).to_string(), "6.0");
        assert_eq!(NamelistValue::from(0.72).to_string(), "0.72");
        assert_eq!(NamelistValue::from(true).to_string(), ".true.");
        assert_eq!(NamelistValue::from(false).to_string(), ".false.");
        assert_eq!(NamelistValue::from(500u32).to_string(), "500");
    }

    #[test]
    fn minimal_case_renders_three_blocks() {
        let case = CaseConfig::new("cone");
        let text = render_namelist(&case);
        let expected = "\
&reference_physical_properties
/

&governing_equations
  rad_use_impl_lines = .false.
  multi_component_diff = .false.
/

&linear_solver_control
  linear_projection = .true.
/

";
        assert_eq!(text, expected);
    }

    #[test]
    fn full_case_renders_all_blocks_in_order() {
        let mut case = CaseConfig::new("cone");
        case.reference.mach = Some(6.0);
        case.reference.alpha_deg = Some(0.0);
        case.governing.eqn_type = Some("generic".to_string());
        case.inviscid_flux = Some(InviscidFluxDef {
            flux_construction: "ldfss".to_string(),
            flux_construction_lhs: "vanleer".to_string(),
            flux_limiter: "hvanalbada".to_string(),
            re_min_vswch: 1.0e-3,
            re_max_vswch: 1.0,
            adaptive_shock_sensor: true,
            first_order_iterations: 500,
        });

        let text = render_namelist(&case);
        assert!(text.contains("  mach_number = 6.0\n"));
        assert!(text.contains("  angle_of_attack = 0.0\n"));
        assert!(text.contains("  eqn_type = 'generic'\n"));
        assert!(text.contains("  flux_limiter = 'hvanalbada'\n"));
        assert!(text.contains("  first_order_iterations = 500\n"));

        let order: Vec<usize> = [
            "&reference_physical_properties",
            "&governing_equations",
            "&inviscid_flux_method",
            "&linear_solver_control",
        ]
        .iter()
        .map(|name| text.find(name).unwrap())
        .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn append_keeps_existing_text() {
        let path = std::env::temp_dir().join("ac_app_namelist_append.nml");
        let _ = std::fs::remove_file(&path);

        write_namelist(&path, "&project\n/\n\n", true).unwrap();
        write_namelist(&path, "&extra\n/\n\n", false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "&project\n/\n\n&extra\n/\n\n");

        write_namelist(&path, "&fresh\n/\n\n", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "&fresh\n/\n\n");

        let _ = std::fs::remove_file(&path);
    }
}
