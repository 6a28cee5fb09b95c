use super::config::GridSpec;
use super::error::EngineError;
use super::grid::MomentumGrid;
use crate::core::models::params::ModelParameters;
use crate::core::models::table::DistributionTable;
use crate::core::physics::quadrature::trapezoid;
use crate::core::physics::wavefunction::WaveFunction;
use tracing::{debug, instrument, trace};

/// Largest accepted deviation of the normalized table's integral from one.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Scalar characteristics of a normalized distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    /// `∫ p² (u² + w²) dp` over the grid, before rescaling.
    pub raw_integral: f64,
    /// D-state probability `∫ p² w² dp / ∫ p² (u² + w²) dp`.
    pub d_state_probability: f64,
    pub peak_momentum: f64,
    pub peak_density: f64,
    pub mean_momentum: f64,
    /// Estimated probability beyond the upper bound.
    ///
    /// The density is extrapolated as `p^-k` with `k` taken from the last two grid
    /// points, giving a remainder of `ρ(p_max) · p_max / (k - 1)`. Pole sums decay at
    /// least as `p^-2`, so `k` is clamped to 2 when the local slope is shallower.
    pub tail_mass_estimate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub table: DistributionTable,
    pub summary: DistributionSummary,
}

/// Computes the normalized momentum distribution of one model.
///
/// Each grid point gets `ρ(p) = p² (u(p)² + w(p)²)`; the densities are then divided by
/// their trapezoidal integral so that the table integrates to one over the grid.
///
/// # Errors
///
/// - [`EngineError::InvalidParameter`] if the parameters or the grid specification are
///   invalid. No partial table is produced.
/// - [`EngineError::DegenerateNormalization`] if the integral is zero or non-finite, or
///   so small that the rescaled table no longer integrates to one within
///   [`NORMALIZATION_TOLERANCE`].
#[instrument(skip_all, fields(model = %params.name))]
pub fn calculate(params: &ModelParameters, spec: &GridSpec) -> Result<Distribution, EngineError> {
    params
        .validate()
        .map_err(|e| EngineError::invalid(&params.name, e))?;
    let grid = MomentumGrid::new(spec).map_err(|e| EngineError::invalid(&params.name, e))?;
    let wave_function =
        WaveFunction::new(params).map_err(|e| EngineError::invalid(&params.name, e))?;

    debug!(
        "Evaluating {} pole terms on {} grid points in [{}, {}] ({}).",
        params.term_count(),
        grid.len(),
        spec.lower,
        spec.upper,
        spec.spacing
    );

    let mut densities = Vec::with_capacity(grid.len());
    let mut d_state_densities = Vec::with_capacity(grid.len());
    for &p in grid.points() {
        let amplitudes = wave_function
            .amplitudes(p)
            .map_err(|e| EngineError::invalid(&params.name, e))?;
        trace!(p, u = amplitudes.u, w = amplitudes.w, "amplitudes");
        densities.push(amplitudes.density(p));
        d_state_densities.push(amplitudes.d_state_density(p));
    }

    let momenta = grid.into_points();
    let raw_integral = trapezoid(&momenta, &densities);
    if !(raw_integral.is_finite() && raw_integral > 0.0) {
        return Err(EngineError::DegenerateNormalization {
            model: params.name.clone(),
            integral: raw_integral,
        });
    }

    let d_state_probability = trapezoid(&momenta, &d_state_densities) / raw_integral;
    // Divide rather than multiply by the reciprocal: 1 / I overflows for subnormal I.
    densities.iter_mut().for_each(|rho| *rho /= raw_integral);

    let normalized = trapezoid(&momenta, &densities);
    if densities.iter().any(|rho| !rho.is_finite())
        || !normalized.is_finite()
        || (normalized - 1.0).abs() > NORMALIZATION_TOLERANCE
    {
        return Err(EngineError::DegenerateNormalization {
            model: params.name.clone(),
            integral: raw_integral,
        });
    }

    let table = DistributionTable::from_columns(momenta, densities);
    let summary = summarize(&table, raw_integral, d_state_probability);
    debug!(
        "Normalized with integral {:.6e}; peak at p = {:.4} fm^-1, P_D = {:.4}.",
        raw_integral, summary.peak_momentum, summary.d_state_probability
    );

    Ok(Distribution { table, summary })
}

fn summarize(
    table: &DistributionTable,
    raw_integral: f64,
    d_state_probability: f64,
) -> DistributionSummary {
    let (peak_momentum, peak_density) = table
        .peak()
        .map(|pt| (pt.momentum, pt.density))
        .unwrap_or((0.0, 0.0));
    let tail_mass_estimate = estimate_tail_mass(table.momenta(), table.densities());

    DistributionSummary {
        raw_integral,
        d_state_probability,
        peak_momentum,
        peak_density,
        mean_momentum: table.mean_momentum(),
        tail_mass_estimate,
    }
}

fn estimate_tail_mass(momenta: &[f64], densities: &[f64]) -> f64 {
    let [.., p_prev, p_last] = momenta else {
        return 0.0;
    };
    let [.., rho_prev, rho_last] = densities else {
        return 0.0;
    };
    if *rho_last <= 0.0 {
        return 0.0;
    }

    let mut exponent = 2.0;
    if *rho_prev > 0.0 && *p_prev > 0.0 {
        let local = -(rho_last / rho_prev).ln() / (p_last / p_prev).ln();
        if local.is_finite() && local > exponent {
            exponent = local;
        }
    }
    rho_last * p_last / (exponent - 1.0)
}
