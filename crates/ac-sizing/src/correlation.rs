//! Flat-plate skin-friction correlations.

use serde::{Deserialize, Serialize};

/// Blasius laminar coefficient: `Cf = 1.328 / sqrt(Re_x)`.
pub const LAMINAR_CF_COEFF: f64 = 1.328;

/// Prandtl-Schlichting turbulent coefficient: `Cf = 0.0592 * Re_x^-0.2`.
pub const TURBULENT_CF_COEFF: f64 = 0.0592;

/// Reynolds-number exponent of the turbulent correlation. Negative: Cf decays with Re.
pub const TURBULENT_RE_EXPONENT: f64 = -0.2;

/// Selects which skin-friction correlation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowRegime {
    Laminar,
    #[default]
    Turbulent,
}

impl FlowRegime {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowRegime::Laminar => "laminar",
            FlowRegime::Turbulent => "turbulent",
        }
    }
}

impl std::fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reynolds number based on distance from the leading edge.
///
/// Inputs are expected to be validated by the caller
/// (see [`crate::FreestreamState::new`]).
#[inline]
pub fn reynolds_number(u_inf: f64, x_ref: f64, nu: f64) -> f64 {
    u_inf * x_ref / nu
}

/// Flat-plate skin-friction coefficient for `re_x > 0`.
#[inline]
pub fn skin_friction_coefficient(re_x: f64, regime: FlowRegime) -> f64 {
    match regime {
        FlowRegime::Laminar => LAMINAR_CF_COEFF / re_x.sqrt(),
        FlowRegime::Turbulent => TURBULENT_CF_COEFF * re_x.powf(TURBULENT_RE_EXPONENT),
    }
}

/// Friction velocity from the wall shear relation `u_tau = U_inf * sqrt(Cf / 2)`.
#[inline]
pub fn friction_velocity(u_inf: f64, cf: f64) -> f64 {
    u_inf * (cf / 2.0).sqrt()
}
