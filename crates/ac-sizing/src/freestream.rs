//! Validated freestream reference conditions.

use crate::correlation::reynolds_number;
use crate::error::{SizingError, SizingResult};
use ac_core::numeric::ensure_positive;
use ac_core::units::{KinVisc, Length, Velocity, m, m2ps, mps};

/// Undisturbed far-field conditions used to size the near-wall mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreestreamState {
    velocity: Velocity,
    kinematic_viscosity: KinVisc,
    reference_length: Length,
}

impl FreestreamState {
    /// Build a freestream state, rejecting non-positive or non-finite values.
    pub fn new(
        velocity: Velocity,
        kinematic_viscosity: KinVisc,
        reference_length: Length,
    ) -> SizingResult<Self> {
        check_input(velocity.value, "freestream velocity")?;
        check_input(kinematic_viscosity.value, "kinematic viscosity")?;
        check_input(reference_length.value, "reference length")?;
        Ok(Self {
            velocity,
            kinematic_viscosity,
            reference_length,
        })
    }

    /// Convenience constructor from SI values (m/s, m^2/s, m).
    pub fn from_si(u_inf_mps: f64, nu_m2ps: f64, x_ref_m: f64) -> SizingResult<Self> {
        Self::new(mps(u_inf_mps), m2ps(nu_m2ps), m(x_ref_m))
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn kinematic_viscosity(&self) -> KinVisc {
        self.kinematic_viscosity
    }

    pub fn reference_length(&self) -> Length {
        self.reference_length
    }

    /// `Re_x = U_inf * x_ref / nu`
    pub fn reynolds_number(&self) -> f64 {
        reynolds_number(
            self.velocity.value,
            self.reference_length.value,
            self.kinematic_viscosity.value,
        )
    }
}

fn check_input(value: f64, what: &'static str) -> SizingResult<()> {
    ensure_positive(value, what)
        .map(|_| ())
        .map_err(|_| SizingError::InvalidFreestreamInput { what, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_state_reports_reynolds_number() {
        let fs = FreestreamState::from_si(200.0, 1.5e-5, 2.0).unwrap();
        let re = fs.reynolds_number();
        assert!(re > 2.66e7 && re < 2.67e7);
        assert_eq!(fs.velocity().value, 200.0);
    }

    #[test]
    fn rejects_each_non_positive_input() {
        let cases = [
            ((0.0, 1.5e-5, 2.0), "freestream velocity"),
            ((200.0, -1.0, 2.0), "kinematic viscosity"),
            ((200.0, 1.5e-5, 0.0), "reference length"),
        ];
        for ((u, nu, x), expected) in cases {
            match FreestreamState::from_si(u, nu, x) {
                Err(SizingError::InvalidFreestreamInput { what, .. }) => assert_eq!(what, expected),
                other => panic!("expected InvalidFreestreamInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_nan() {
        assert!(FreestreamState::from_si(f64::NAN, 1.5e-5, 2.0).is_err());
    }
}
