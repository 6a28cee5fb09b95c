use super::config::{GridSpacing, GridSpec};
use crate::core::models::params::ParameterError;

/// Strictly increasing momentum samples spanning `[lower, upper]` inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumGrid {
    points: Vec<f64>,
}

impl MomentumGrid {
    pub fn new(spec: &GridSpec) -> Result<Self, ParameterError> {
        spec.validate()?;
        let n = spec.points;
        let last = (n - 1) as f64;

        let mut points: Vec<f64> = match spec.spacing {
            GridSpacing::Linear => {
                let step = (spec.upper - spec.lower) / last;
                (0..n).map(|i| spec.lower + i as f64 * step).collect()
            }
            GridSpacing::Geometric => {
                let log_ratio = (spec.upper / spec.lower).ln() / last;
                (0..n)
                    .map(|i| spec.lower * (i as f64 * log_ratio).exp())
                    .collect()
            }
        };
        // Pin the end points so the bounds are hit exactly despite rounding.
        points[0] = spec.lower;
        points[n - 1] = spec.upper;

        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn linear_grid_is_evenly_spaced_and_hits_bounds() {
        let grid = MomentumGrid::new(&GridSpec::linear(0.001, 5.0, 500)).unwrap();
        let pts = grid.points();
        assert_eq!(grid.len(), 500);
        assert_eq!(pts[0], 0.001);
        assert_eq!(pts[499], 5.0);
        let step = (5.0 - 0.001) / 499.0;
        for w in pts.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }

    #[test]
    fn geometric_grid_has_constant_ratio() {
        let grid = MomentumGrid::new(&GridSpec::geometric(0.01, 10.0, 4)).unwrap();
        let pts = grid.points();
        assert_eq!(pts[0], 0.01);
        assert_eq!(pts[3], 10.0);
        assert!((pts[1] - 0.1).abs() < TOLERANCE);
        assert!((pts[2] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn grids_are_strictly_increasing() {
        for spec in [
            GridSpec::linear(0.0, 1.0, 2),
            GridSpec::linear(0.5, 7.0, 1000),
            GridSpec::geometric(1e-4, 20.0, 300),
        ] {
            let grid = MomentumGrid::new(&spec).unwrap();
            assert!(grid.points().windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let result = MomentumGrid::new(&GridSpec::linear(2.0, 1.0, 10));
        assert!(matches!(result, Err(ParameterError::InvalidGrid(_))));
    }
}
