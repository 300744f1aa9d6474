//! Geometric prism-layer stack.

use crate::error::{SizingError, SizingResult};

/// Total thickness of `n` layers whose heights grow by `r` from `dy1`.
///
/// `BL_total = dy1 * (r^n - 1) / (r - 1)`. The arithmetic case `r == 1` is
/// rejected along with every `r < 1`.
pub fn total_boundary_layer_thickness(dy1: f64, n: i64, r: f64) -> SizingResult<f64> {
    check_growth_ratio(r)?;
    check_layer_count(n)?;

    let total = dy1 * (r.powf(n as f64) - 1.0) / (r - 1.0);
    if total.is_finite() && total > 0.0 {
        Ok(total)
    } else {
        Err(SizingError::NonPositiveSizingResult {
            what: "total boundary-layer thickness",
            value: total,
        })
    }
}

fn check_growth_ratio(r: f64) -> SizingResult<()> {
    if r.is_nan() || r <= 1.0 {
        return Err(SizingError::InvalidGrowthRatio { ratio: r });
    }
    Ok(())
}

fn check_layer_count(n: i64) -> SizingResult<u32> {
    if n < 1 {
        return Err(SizingError::InvalidLayerCount { layers: n });
    }
    u32::try_from(n).map_err(|_| SizingError::InvalidLayerCount { layers: n })
}

/// Growth ratio and layer count of a prism stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSchedule {
    growth_ratio: f64,
    max_layers: u32,
}

impl LayerSchedule {
    /// Typical growth ratio for hypersonic blunt bodies.
    pub const DEFAULT_GROWTH_RATIO: f64 = 1.2;
    pub const DEFAULT_MAX_LAYERS: u32 = 40;

    pub fn new(growth_ratio: f64, max_layers: i64) -> SizingResult<Self> {
        check_growth_ratio(growth_ratio)?;
        let max_layers = check_layer_count(max_layers)?;
        Ok(Self {
            growth_ratio,
            max_layers,
        })
    }

    pub fn growth_ratio(&self) -> f64 {
        self.growth_ratio
    }

    pub fn max_layers(&self) -> u32 {
        self.max_layers
    }

    /// Stack thickness for a given first-cell height.
    pub fn total_thickness(&self, dy1: f64) -> SizingResult<f64> {
        total_boundary_layer_thickness(dy1, i64::from(self.max_layers), self.growth_ratio)
    }

    /// Height of each layer from the wall outward: `dy1 * r^k`.
    pub fn layer_heights(&self, dy1: f64) -> impl Iterator<Item = f64> + '_ {
        (0..self.max_layers).map(move |k| dy1 * self.growth_ratio.powf(f64::from(k)))
    }

    /// Height of the outermost layer.
    pub fn outer_layer_height(&self, dy1: f64) -> f64 {
        dy1 * self.growth_ratio.powf(f64::from(self.max_layers - 1))
    }
}

impl Default for LayerSchedule {
    fn default() -> Self {
        Self {
            growth_ratio: Self::DEFAULT_GROWTH_RATIO,
            max_layers: Self::DEFAULT_MAX_LAYERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_layer_is_first_cell() {
        for r in [1.01, 1.2, 2.0, 10.0] {
            let total = total_boundary_layer_thickness(1.0, 1, r).unwrap();
            assert!((total - 1.0).abs() < 1e-12, "r = {r}: {total}");
        }
    }

    #[test]
    fn forty_layers_at_one_point_two() {
        let total = total_boundary_layer_thickness(1.0, 40, 1.2).unwrap();
        let expected = (1.2_f64.powi(40) - 1.0) / 0.2;
        assert!((total - expected).abs() / expected < 1e-12);
        // (1.2^40 - 1) / 0.2 = 7343.86
        assert!(total > 1.0e3 && total < 1.0e4);
        assert!((total - 7343.8).abs() < 1.0);
    }

    #[test]
    fn rejects_unit_and_shrinking_ratio() {
        for r in [1.0, 0.9, f64::NAN] {
            assert!(matches!(
                total_boundary_layer_thickness(1.0, 10, r),
                Err(SizingError::InvalidGrowthRatio { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_positive_layer_count() {
        for n in [0, -1] {
            assert_eq!(
                total_boundary_layer_thickness(1.0, n, 1.2),
                Err(SizingError::InvalidLayerCount { layers: n })
            );
        }
    }

    #[test]
    fn growth_ratio_is_checked_before_layer_count() {
        assert!(matches!(
            total_boundary_layer_thickness(1.0, 0, 1.0),
            Err(SizingError::InvalidGrowthRatio { .. })
        ));
    }

    #[test]
    fn non_positive_first_cell_is_reported() {
        assert!(matches!(
            total_boundary_layer_thickness(0.0, 10, 1.2),
            Err(SizingError::NonPositiveSizingResult { .. })
        ));
    }

    #[test]
    fn schedule_rejects_huge_layer_count() {
        assert!(LayerSchedule::new(1.2, i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn layer_heights_sum_to_closed_form() {
        let schedule = LayerSchedule::new(1.15, 25).unwrap();
        let dy1 = 3.0e-6;
        let heights: Vec<f64> = schedule.layer_heights(dy1).collect();
        assert_eq!(heights.len(), 25);
        assert_eq!(heights[0], dy1);

        let sum: f64 = heights.iter().sum();
        let closed = schedule.total_thickness(dy1).unwrap();
        assert!((sum - closed).abs() / closed < 1e-10);
        assert!((schedule.outer_layer_height(dy1) - heights[24]).abs() < 1e-18);
    }
}
