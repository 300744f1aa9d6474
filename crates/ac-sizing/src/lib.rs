//! ac-sizing: boundary-layer mesh sizing.
//!
//! Converts freestream conditions and a target y+ into the two numbers a
//! viscous mesh generator needs for a prism stack:
//! - first-cell wall-normal height
//! - total stack thickness for a geometric growth schedule
//!
//! Everything here is a pure function of its inputs; invalid inputs fail with
//! a [`SizingError`] naming the violated precondition.
//!
//! # Example
//!
//! ```
//! use ac_sizing::{BlMode, FreestreamState, LayerSchedule, SizingRequest, size_boundary_layer};
//!
//! let freestream = FreestreamState::from_si(200.0, 1.5e-5, 2.0).unwrap();
//! let schedule = LayerSchedule::new(1.2, 40).unwrap();
//! let request = SizingRequest::new(freestream, BlMode::LowRe, schedule);
//!
//! let outcome = size_boundary_layer(&request).unwrap();
//! assert!(outcome.first_cell_height_m > 0.0);
//! assert!(outcome.total_thickness_m > outcome.first_cell_height_m);
//! ```

pub mod correlation;
pub mod error;
pub mod freestream;
pub mod layers;
pub mod sizer;
pub mod wall;

// Re-exports
pub use correlation::{FlowRegime, friction_velocity, reynolds_number, skin_friction_coefficient};
pub use error::{SizingError, SizingResult};
pub use freestream::FreestreamState;
pub use layers::{LayerSchedule, total_boundary_layer_thickness};
pub use sizer::{BlControls, SizingOutcome, SizingRequest, first_cell_height, size_boundary_layer};
pub use wall::BlMode;
