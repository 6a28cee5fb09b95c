use crate::core::models::params::{ModelParameters, ParameterError, check_mass_scales, pole_mass};

/// S- and D-state radial amplitudes at one momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amplitudes {
    pub u: f64,
    pub w: f64,
}

impl Amplitudes {
    /// `p² (u² + w²)`, the unnormalized momentum density.
    #[inline]
    pub fn density(&self, p: f64) -> f64 {
        p * p * (self.u * self.u + self.w * self.w)
    }

    /// `p² w²`, the D-state share of [`Amplitudes::density`].
    #[inline]
    pub fn d_state_density(&self, p: f64) -> f64 {
        p * p * self.w * self.w
    }
}

/// Evaluates `u(p)` and `w(p)` directly from raw parameters.
///
/// Terms are summed in coefficient-index order. For the same inputs the result is
/// bit-identical to [`WaveFunction::amplitudes`].
///
/// # Errors
///
/// Returns [`ParameterError`] if `alpha` or `m0` is not strictly positive, or if `p` is
/// negative or not finite.
pub fn evaluate(
    p: f64,
    alpha: f64,
    m0: f64,
    c: &[f64],
    d: &[f64],
) -> Result<Amplitudes, ParameterError> {
    check_mass_scales(alpha, m0)?;
    check_momentum(p)?;

    let p2 = p * p;
    let pole_sum = |coefficients: &[f64]| {
        coefficients
            .iter()
            .enumerate()
            .fold(0.0, |acc, (j, coeff)| {
                let m = pole_mass(alpha, m0, j);
                acc + coeff / (p2 + m * m)
            })
    };

    Ok(Amplitudes {
        u: pole_sum(c),
        w: pole_sum(d),
    })
}

/// Wave function of one model with the squared pole masses precomputed.
#[derive(Debug, Clone)]
pub struct WaveFunction<'a> {
    c: &'a [f64],
    d: &'a [f64],
    masses_sq: Vec<f64>,
}

impl<'a> WaveFunction<'a> {
    pub fn new(params: &'a ModelParameters) -> Result<Self, ParameterError> {
        check_mass_scales(params.alpha, params.m0)?;
        let masses_sq = params.pole_masses().map(|m| m * m).collect();
        Ok(Self {
            c: &params.c,
            d: &params.d,
            masses_sq,
        })
    }

    pub fn amplitudes(&self, p: f64) -> Result<Amplitudes, ParameterError> {
        check_momentum(p)?;
        let p2 = p * p;
        Ok(Amplitudes {
            u: self.pole_sum(self.c, p2),
            w: self.pole_sum(self.d, p2),
        })
    }

    #[inline]
    fn pole_sum(&self, coefficients: &[f64], p2: f64) -> f64 {
        coefficients
            .iter()
            .zip(&self.masses_sq)
            .fold(0.0, |acc, (coeff, m2)| acc + coeff / (p2 + m2))
    }
}

fn check_momentum(p: f64) -> Result<(), ParameterError> {
    if p.is_finite() && p >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::InvalidMomentum(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn two_pole_model() -> ModelParameters {
        ModelParameters::new("test", 0.23, 0.8, vec![1.0, -1.0], vec![0.5, -0.5]).unwrap()
    }

    #[test]
    fn single_pole_matches_closed_form() {
        let amps = evaluate(0.5, 0.3, 1.0, &[2.0], &[]).unwrap();
        assert!(f64_approx_equal(amps.u, 2.0 / (0.25 + 0.09)));
        assert_eq!(amps.w, 0.0);
    }

    #[test]
    fn poles_use_shared_linear_mass_ladder() {
        let amps = evaluate(1.0, 0.5, 1.0, &[1.0, 1.0], &[0.0, 1.0]).unwrap();
        let expected_u = 1.0 / (1.0 + 0.25) + 1.0 / (1.0 + 2.25);
        let expected_w = 1.0 / (1.0 + 2.25);
        assert!(f64_approx_equal(amps.u, expected_u));
        assert!(f64_approx_equal(amps.w, expected_w));
    }

    #[test]
    fn empty_d_state_gives_zero_amplitude() {
        let params = ModelParameters::new("s-only", 0.23, 0.8, vec![1.0, -1.0], vec![]).unwrap();
        let wf = WaveFunction::new(&params).unwrap();
        for p in [0.0, 0.1, 1.0, 10.0] {
            assert_eq!(wf.amplitudes(p).unwrap().w, 0.0);
        }
    }

    #[test]
    fn evaluation_is_bit_identical_across_calls_and_entry_points() {
        let params = two_pole_model();
        let wf = WaveFunction::new(&params).unwrap();
        for p in [0.0, 0.001, 0.37, 2.5] {
            let a = wf.amplitudes(p).unwrap();
            let b = wf.amplitudes(p).unwrap();
            let c = evaluate(p, params.alpha, params.m0, &params.c, &params.d).unwrap();
            assert_eq!(a.u.to_bits(), b.u.to_bits());
            assert_eq!(a.w.to_bits(), b.w.to_bits());
            assert_eq!(a.u.to_bits(), c.u.to_bits());
            assert_eq!(a.w.to_bits(), c.w.to_bits());
        }
    }

    #[test]
    fn amplitude_at_zero_momentum_is_finite() {
        let amps = evaluate(0.0, 0.23, 0.8, &[1.0, -1.0], &[]).unwrap();
        assert!(amps.u.is_finite());
        assert!(amps.u > 0.0);
        assert_eq!(amps.density(0.0), 0.0);
    }

    #[test]
    fn density_is_non_negative() {
        let params = two_pole_model();
        let wf = WaveFunction::new(&params).unwrap();
        for i in 0..100 {
            let p = i as f64 * 0.05;
            let amps = wf.amplitudes(p).unwrap();
            assert!(amps.density(p) >= 0.0);
            assert!(amps.d_state_density(p) <= amps.density(p));
        }
    }

    #[test]
    fn negative_momentum_is_rejected() {
        let result = evaluate(-0.1, 0.23, 0.8, &[1.0], &[]);
        assert_eq!(result, Err(ParameterError::InvalidMomentum(-0.1)));
        let params = two_pole_model();
        let wf = WaveFunction::new(&params).unwrap();
        assert!(wf.amplitudes(-1.0).is_err());
    }

    #[test]
    fn non_positive_scales_are_rejected() {
        assert!(matches!(
            evaluate(0.1, 0.0, 0.8, &[1.0], &[]),
            Err(ParameterError::NotStrictlyPositive { name: "alpha", .. })
        ));
        assert!(matches!(
            evaluate(0.1, 0.23, -1.0, &[1.0], &[]),
            Err(ParameterError::NotStrictlyPositive { name: "m0", .. })
        ));
    }
}
