use crate::core::physics::quadrature::{trapezoid, trapezoid_weighted};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionPoint {
    /// Nucleon momentum in fm⁻¹.
    pub momentum: f64,
    /// Normalized probability density in fm.
    pub density: f64,
}

/// The momentum distribution of one model, ordered by increasing momentum.
///
/// Tables are immutable once built; they are produced by the distribution calculator
/// or read back from an exported text table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistributionTable {
    momenta: Vec<f64>,
    densities: Vec<f64>,
}

impl DistributionTable {
    pub(crate) fn from_columns(momenta: Vec<f64>, densities: Vec<f64>) -> Self {
        debug_assert_eq!(momenta.len(), densities.len());
        Self { momenta, densities }
    }

    pub fn len(&self) -> usize {
        self.momenta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.momenta.is_empty()
    }

    pub fn momenta(&self) -> &[f64] {
        &self.momenta
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn get(&self, index: usize) -> Option<DistributionPoint> {
        Some(DistributionPoint {
            momentum: *self.momenta.get(index)?,
            density: *self.densities.get(index)?,
        })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = DistributionPoint> + '_ {
        self.momenta
            .iter()
            .zip(&self.densities)
            .map(|(&momentum, &density)| DistributionPoint { momentum, density })
    }

    /// Trapezoidal integral of the density over the table's own grid.
    pub fn integral(&self) -> f64 {
        trapezoid(&self.momenta, &self.densities)
    }

    /// Mean momentum `⟨p⟩ = ∫ p ρ(p) dp`.
    pub fn mean_momentum(&self) -> f64 {
        trapezoid_weighted(&self.momenta, &self.densities, |p| p)
    }

    /// The grid point with the largest density; the first one wins on ties.
    pub fn peak(&self) -> Option<DistributionPoint> {
        self.iter()
            .reduce(|best, point| if point.density > best.density { point } else { best })
    }

    pub fn max_momentum(&self) -> Option<f64> {
        self.momenta.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DistributionTable {
        DistributionTable::from_columns(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0])
    }

    #[test]
    fn integral_uses_trapezoidal_rule() {
        assert!((triangle().integral() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mean_momentum_of_symmetric_triangle_is_its_center() {
        assert!((triangle().mean_momentum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn peak_returns_highest_density_point() {
        let peak = triangle().peak().unwrap();
        assert_eq!(peak.momentum, 1.0);
        assert_eq!(peak.density, 1.0);
    }

    #[test]
    fn iteration_preserves_grid_order() {
        let table = triangle();
        let momenta: Vec<f64> = table.iter().map(|pt| pt.momentum).collect();
        assert_eq!(momenta, vec![0.0, 1.0, 2.0]);
        assert_eq!(table.get(1).unwrap().density, 1.0);
        assert!(table.get(3).is_none());
        assert_eq!(table.max_momentum(), Some(2.0));
    }

    #[test]
    fn empty_table_has_no_peak() {
        let table = DistributionTable::default();
        assert!(table.is_empty());
        assert!(table.peak().is_none());
        assert_eq!(table.integral(), 0.0);
    }
}
