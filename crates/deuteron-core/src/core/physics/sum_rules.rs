use crate::core::models::params::ModelParameters;

/// Residuals of the asymptotic sum rules for one coefficient series.
///
/// A physical parameterization has `Σ a_j = 0` so the coordinate-space wave function
/// vanishes at the origin; the D state additionally needs the `m_j²` and `m_j⁻²`
/// moments to vanish for the correct small-`r` behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeriesResiduals {
    /// `Σ a_j`
    pub zeroth: f64,
    /// `Σ a_j m_j²`
    pub mass_squared: f64,
    /// `Σ a_j / m_j²`
    pub inverse_mass_squared: f64,
    /// `Σ |a_j|`, the natural scale for the residuals above.
    pub scale: f64,
}

impl SeriesResiduals {
    fn compute(coefficients: &[f64], params: &ModelParameters) -> Self {
        coefficients
            .iter()
            .enumerate()
            .fold(Self::default(), |acc, (j, &a)| {
                let m2 = params.pole_mass(j).powi(2);
                Self {
                    zeroth: acc.zeroth + a,
                    mass_squared: acc.mass_squared + a * m2,
                    inverse_mass_squared: acc.inverse_mass_squared + a / m2,
                    scale: acc.scale + a.abs(),
                }
            })
    }

    /// `|Σ a_j| / Σ |a_j|`, or zero for an all-zero series.
    pub fn relative_zeroth(&self) -> f64 {
        if self.scale > 0.0 {
            self.zeroth.abs() / self.scale
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumRules {
    pub s_state: SeriesResiduals,
    pub d_state: SeriesResiduals,
}

impl SumRules {
    pub fn compute(params: &ModelParameters) -> Self {
        Self {
            s_state: SeriesResiduals::compute(&params.c, params),
            d_state: SeriesResiduals::compute(&params.d, params),
        }
    }

    /// Whether the leading S-state rule `Σ c_j = 0` holds to `tolerance`, relative to
    /// `Σ |c_j|`.
    pub fn s_state_satisfied(&self, tolerance: f64) -> bool {
        self.s_state.relative_zeroth() <= tolerance
    }
}
