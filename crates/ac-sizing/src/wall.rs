//! Near-wall strategy and the y+ target it implies.

use crate::error::{SizingError, SizingResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// y+ target for a viscous-sublayer resolving mesh.
pub const LOW_RE_Y_PLUS: f64 = 1.0;

/// y+ target for a wall-function mesh.
pub const WALL_FUNCTION_Y_PLUS: f64 = 50.0;

/// Boundary-layer meshing strategy.
///
/// Parsing via [`FromStr`] (and therefore serde) is case-insensitive and
/// rejects unknown strings. [`BlMode::from_legacy_str`] keeps the historical
/// behavior where anything other than `lowre` means wall functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlMode {
    #[default]
    LowRe,
    WallFunction,
}

impl BlMode {
    pub fn y_plus_target(self) -> f64 {
        match self {
            BlMode::LowRe => LOW_RE_Y_PLUS,
            BlMode::WallFunction => WALL_FUNCTION_Y_PLUS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlMode::LowRe => "lowRe",
            BlMode::WallFunction => "wallFunction",
        }
    }

    /// Historical two-way switch: `lowre` (any case) or wall functions.
    ///
    /// Returns the mode and whether the input was not one of the two
    /// recognized names.
    pub fn from_legacy_str(s: &str) -> (Self, bool) {
        match s.parse::<BlMode>() {
            Ok(mode) => (mode, false),
            Err(_) => (BlMode::WallFunction, true),
        }
    }
}

impl FromStr for BlMode {
    type Err = SizingError;

    fn from_str(s: &str) -> SizingResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowre" => Ok(BlMode::LowRe),
            "wallfunction" => Ok(BlMode::WallFunction),
            _ => Err(SizingError::UnknownBlMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for BlMode {
    type Error = SizingError;

    fn try_from(s: String) -> SizingResult<Self> {
        s.parse()
    }
}

impl From<BlMode> for String {
    fn from(mode: BlMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for BlMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("lowRe".parse::<BlMode>().unwrap(), BlMode::LowRe);
        assert_eq!("LOWRE".parse::<BlMode>().unwrap(), BlMode::LowRe);
        assert_eq!(
            "WallFunction".parse::<BlMode>().unwrap(),
            BlMode::WallFunction
        );
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        let err = "hybrid".parse::<BlMode>().unwrap_err();
        assert_eq!(
            err,
            SizingError::UnknownBlMode {
                mode: "hybrid".to_string()
            }
        );
    }

    #[test]
    fn legacy_parse_falls_back_to_wall_function() {
        assert_eq!(BlMode::from_legacy_str("lowre"), (BlMode::LowRe, false));
        assert_eq!(
            BlMode::from_legacy_str("wallFunction"),
            (BlMode::WallFunction, false)
        );
        assert_eq!(
            BlMode::from_legacy_str("hybrid"),
            (BlMode::WallFunction, true)
        );
        assert_eq!(BlMode::from_legacy_str(""), (BlMode::WallFunction, true));
    }

    #[test]
    fn y_plus_targets() {
        assert_eq!(BlMode::LowRe.y_plus_target(), 1.0);
        assert_eq!(BlMode::WallFunction.y_plus_target(), 50.0);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in [BlMode::LowRe, BlMode::WallFunction] {
            assert_eq!(mode.to_string().parse::<BlMode>().unwrap(), mode);
        }
    }
}
