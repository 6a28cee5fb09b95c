use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParameterError {
    #[error("`{name}` must be strictly positive and finite, got {value}")]
    NotStrictlyPositive { name: &'static str, value: f64 },

    #[error("Momentum must be non-negative and finite, got {0}")]
    InvalidMomentum(f64),

    #[error("S-state coefficient list `c` must contain at least one value")]
    EmptySCoefficients,

    #[error("Coefficient {series}[{index}] is not finite ({value})")]
    NonFiniteCoefficient {
        series: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Invalid momentum grid: {0}")]
    InvalidGrid(String),

    #[error("Unknown grid spacing '{0}'. Expected 'linear' or 'geometric'.")]
    UnknownSpacing(String),
}

/// Analytic parameterization of one deuteron potential model.
///
/// The momentum-space S- and D-state amplitudes are superpositions of simple poles at
/// `p² = -m_j²`, with pole masses `m_j = alpha + (j - 1) * m0` shared by both series.
/// Momenta and masses are in fm⁻¹.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    /// Identifier used for output naming; never enters the computation.
    pub name: String,
    /// Base inverse-range scale, the first pole mass.
    pub alpha: f64,
    /// Spacing between successive pole masses.
    pub m0: f64,
    /// S-state coefficients, in term order.
    pub c: Vec<f64>,
    /// D-state coefficients, in term order. Empty for S-wave-only models.
    pub d: Vec<f64>,
}

impl ModelParameters {
    /// Creates a parameter set and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `alpha` or `m0` is not strictly positive, if `c` is
    /// empty, or if any coefficient is not finite.
    pub fn new(
        name: impl Into<String>,
        alpha: f64,
        m0: f64,
        c: Vec<f64>,
        d: Vec<f64>,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            name: name.into(),
            alpha,
            m0,
            c,
            d,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        check_mass_scales(self.alpha, self.m0)?;
        if self.c.is_empty() {
            return Err(ParameterError::EmptySCoefficients);
        }
        check_coefficients("c", &self.c)?;
        check_coefficients("d", &self.d)?;
        Ok(())
    }

    /// Number of pole terms, `max(N_c, N_d)`.
    pub fn term_count(&self) -> usize {
        self.c.len().max(self.d.len())
    }

    /// Pole mass for the zero-based term `index`.
    #[inline]
    pub fn pole_mass(&self, index: usize) -> f64 {
        pole_mass(self.alpha, self.m0, index)
    }

    pub fn pole_masses(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.term_count()).map(|j| self.pole_mass(j))
    }

    pub fn has_d_state(&self) -> bool {
        !self.d.is_empty()
    }
}

#[inline]
pub(crate) fn pole_mass(alpha: f64, m0: f64, index: usize) -> f64 {
    alpha + index as f64 * m0
}

pub(crate) fn check_mass_scales(alpha: f64, m0: f64) -> Result<(), ParameterError> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(ParameterError::NotStrictlyPositive {
            name: "alpha",
            value: alpha,
        });
    }
    if !(m0.is_finite() && m0 > 0.0) {
        return Err(ParameterError::NotStrictlyPositive {
            name: "m0",
            value: m0,
        });
    }
    Ok(())
}

fn check_coefficients(series: &'static str, values: &[f64]) -> Result<(), ParameterError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ParameterError::NonFiniteCoefficient {
            series,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
