//! First-cell height and the full sizing pass.

use crate::correlation::{FlowRegime, friction_velocity, skin_friction_coefficient};
use crate::error::{SizingError, SizingResult};
use crate::freestream::FreestreamState;
use crate::layers::LayerSchedule;
use crate::wall::BlMode;
use ac_core::numeric::ensure_positive;
use serde::{Deserialize, Serialize};

/// First-cell wall-normal height for a target y+.
///
/// `dy1 = y_plus * nu / u_tau` with `u_tau = U_inf * sqrt(Cf / 2)`.
pub fn first_cell_height(
    y_plus: f64,
    nu: f64,
    u_inf: f64,
    re_x: f64,
    regime: FlowRegime,
) -> SizingResult<f64> {
    let cf = skin_friction_coefficient(re_x, regime);
    let u_tau = friction_velocity(u_inf, cf);
    if !u_tau.is_finite() || u_tau <= 0.0 {
        return Err(SizingError::NonPositiveSizingResult {
            what: "friction velocity",
            value: u_tau,
        });
    }

    let dy1 = y_plus * nu / u_tau;
    if dy1.is_finite() && dy1 > 0.0 {
        Ok(dy1)
    } else {
        Err(SizingError::NonPositiveSizingResult {
            what: "first cell height",
            value: dy1,
        })
    }
}

/// Everything needed for one sizing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingRequest {
    pub freestream: FreestreamState,
    pub regime: FlowRegime,
    pub mode: BlMode,
    /// Replaces the mode's y+ target when set.
    pub y_plus: Option<f64>,
    pub schedule: LayerSchedule,
    /// Divisor applied to lengths handed to the mesh generator.
    pub scale_length: f64,
}

impl SizingRequest {
    pub fn new(freestream: FreestreamState, mode: BlMode, schedule: LayerSchedule) -> Self {
        Self {
            freestream,
            regime: FlowRegime::default(),
            mode,
            y_plus: None,
            schedule,
            scale_length: 1.0,
        }
    }

    pub fn with_regime(mut self, regime: FlowRegime) -> Self {
        self.regime = regime;
        self
    }

    pub fn with_y_plus(mut self, y_plus: f64) -> Self {
        self.y_plus = Some(y_plus);
        self
    }

    pub fn with_scale_length(mut self, scale_length: f64) -> Self {
        self.scale_length = scale_length;
        self
    }

    /// Effective y+ target.
    pub fn y_plus_target(&self) -> f64 {
        self.y_plus.unwrap_or_else(|| self.mode.y_plus_target())
    }
}

/// Output of [`size_boundary_layer`]. Lengths are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingOutcome {
    pub regime: FlowRegime,
    pub mode: BlMode,
    pub reynolds_number: f64,
    pub skin_friction: f64,
    pub friction_velocity_mps: f64,
    pub y_plus: f64,
    pub growth_ratio: f64,
    pub max_layers: u32,
    pub first_cell_height_m: f64,
    pub total_thickness_m: f64,
    pub outer_layer_height_m: f64,
    pub scale_length: f64,
}

/// Boundary-layer controls as the mesh generator consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlControls {
    #[serde(rename = "BL_Initial_Spacing")]
    pub bl_initial_spacing: f64,
    #[serde(rename = "BL_Thickness")]
    pub bl_thickness: f64,
    #[serde(rename = "BL_Max_Layers")]
    pub bl_max_layers: u32,
}

impl SizingOutcome {
    /// Spacing and thickness divided by the scale length.
    pub fn bl_controls(&self) -> BlControls {
        BlControls {
            bl_initial_spacing: self.first_cell_height_m / self.scale_length,
            bl_thickness: self.total_thickness_m / self.scale_length,
            bl_max_layers: self.max_layers,
        }
    }
}

/// Run the whole sizing pass: Re -> Cf -> u_tau -> dy1 -> stack thickness.
pub fn size_boundary_layer(request: &SizingRequest) -> SizingResult<SizingOutcome> {
    let y_plus = ensure_positive(request.y_plus_target(), "y+").map_err(|_| {
        SizingError::InvalidYPlus {
            value: request.y_plus_target(),
        }
    })?;
    let scale_length = ensure_positive(request.scale_length, "scale length").map_err(|_| {
        SizingError::InvalidScaleLength {
            value: request.scale_length,
        }
    })?;

    let fs = &request.freestream;
    let u_inf = fs.velocity().value;
    let nu = fs.kinematic_viscosity().value;
    let re_x = fs.reynolds_number();

    let cf = skin_friction_coefficient(re_x, request.regime);
    let dy1 = first_cell_height(y_plus, nu, u_inf, re_x, request.regime)?;
    let total = request.schedule.total_thickness(dy1)?;

    tracing::debug!(
        re_x,
        cf,
        dy1,
        total,
        regime = %request.regime,
        mode = %request.mode,
        "sized boundary layer"
    );

    Ok(SizingOutcome {
        regime: request.regime,
        mode: request.mode,
        reynolds_number: re_x,
        skin_friction: cf,
        friction_velocity_mps: friction_velocity(u_inf, cf),
        y_plus,
        growth_ratio: request.schedule.growth_ratio(),
        max_layers: request.schedule.max_layers(),
        first_cell_height_m: dy1,
        total_thickness_m: total,
        outer_layer_height_m: request.schedule.outer_layer_height(dy1),
        scale_length,
    })
}
