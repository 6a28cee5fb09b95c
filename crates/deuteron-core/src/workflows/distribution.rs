use crate::core::io::traits::TableSink;
use crate::core::models::params::ModelParameters;
use crate::core::physics::sum_rules::SumRules;
use crate::engine::config::RunConfig;
use crate::engine::distribution::{self, Distribution};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use tracing::{debug, error, info, instrument, warn};

/// Relative residual of `Σc` above which a model is reported as violating the sum rule.
pub const SUM_RULE_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone)]
pub struct ModelReport {
    pub distribution: Distribution,
    pub sum_rules: SumRules,
    /// Whether the estimated tail mass beyond the grid exceeded the configured threshold.
    pub tail_exceeds_threshold: bool,
}

#[derive(Debug)]
pub struct ModelOutcome {
    pub name: String,
    pub result: Result<ModelReport, EngineError>,
}

/// Per-model outcomes, in the same order as the input models.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcomes: Vec<ModelOutcome>,
}

impl BatchResult {
    pub fn successes(&self) -> impl Iterator<Item = (&str, &ModelReport)> {
        self.outcomes.iter().filter_map(|outcome| match &outcome.result {
            Ok(report) => Some((outcome.name.as_str(), report)),
            Err(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &EngineError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Computes the distribution of every model.
///
/// Models are independent: an error in one is logged, recorded in its outcome and
/// does not affect the others. With `config.parallel` the models are fanned out over
/// the rayon pool; outcomes keep the input order either way.
#[instrument(skip_all, name = "distribution_workflow", fields(models = models.len()))]
pub fn run(
    models: &[ModelParameters],
    config: &RunConfig,
    reporter: &ProgressReporter,
) -> BatchResult {
    reporter.report(Progress::BatchStart {
        total_models: models.len() as u64,
    });
    info!(
        "Computing momentum distributions for {} model(s) ({}).",
        models.len(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let outcomes: Vec<ModelOutcome> = if config.parallel {
        models
            .par_iter()
            .map(|params| process_model(params, config, reporter))
            .collect()
    } else {
        models
            .iter()
            .map(|params| process_model(params, config, reporter))
            .collect()
    };

    reporter.report(Progress::BatchFinish);
    let batch = BatchResult { outcomes };
    info!(
        "Distribution workflow finished: {} succeeded, {} failed.",
        batch.success_count(),
        batch.failure_count()
    );
    batch
}

/// Runs the batch and writes every successful table to `sink`.
///
/// A model whose table cannot be written is turned into an
/// [`EngineError::Output`] failure; the remaining models are still exported.
pub fn run_and_export<S: TableSink>(
    models: &[ModelParameters],
    config: &RunConfig,
    sink: &mut S,
    reporter: &ProgressReporter,
) -> BatchResult {
    let mut batch = run(models, config, reporter);

    for outcome in &mut batch.outcomes {
        let written = match &outcome.result {
            Ok(report) => sink.write_table(&outcome.name, &report.distribution.table),
            Err(_) => continue,
        };
        if let Err(e) = written {
            error!("Skipping model '{}': {}", outcome.name, e);
            outcome.result = Err(EngineError::Output {
                model: outcome.name.clone(),
                source: Box::new(e),
            });
        }
    }

    batch
}

#[instrument(skip_all, fields(model = %params.name))]
fn process_model(
    params: &ModelParameters,
    config: &RunConfig,
    reporter: &ProgressReporter,
) -> ModelOutcome {
    reporter.report(Progress::ModelStart {
        name: params.name.clone(),
    });

    let result = distribution::calculate(params, &config.grid).map(|distribution| {
        let sum_rules = SumRules::compute(params);
        log_sum_rules(&params.name, &sum_rules);

        let summary = &distribution.summary;
        let tail_exceeds_threshold = summary.tail_mass_estimate > config.tail_threshold;
        if tail_exceeds_threshold {
            warn!(
                "Model '{}': estimated probability beyond p = {} fm^-1 is {:.2e}, above the threshold {:.1e}. Consider raising the upper grid bound.",
                params.name, config.grid.upper, summary.tail_mass_estimate, config.tail_threshold
            );
        }
        info!(
            "Model '{}': peak at p = {:.4} fm^-1, <p> = {:.4} fm^-1, P_D = {:.2}%.",
            params.name,
            summary.peak_momentum,
            summary.mean_momentum,
            100.0 * summary.d_state_probability
        );

        ModelReport {
            distribution,
            sum_rules,
            tail_exceeds_threshold,
        }
    });

    if let Err(e) = &result {
        error!("Skipping model '{}': {}", params.name, e);
    }

    reporter.report(Progress::ModelFinish {
        name: params.name.clone(),
        success: result.is_ok(),
    });

    ModelOutcome {
        name: params.name.clone(),
        result,
    }
}

fn log_sum_rules(name: &str, rules: &SumRules) {
    debug!(
        "Model '{}' S-state sums: Σc = {:.3e}, Σc·m² = {:.3e}, Σc/m² = {:.3e}; D-state sums: Σd = {:.3e}, Σd·m² = {:.3e}, Σd/m² = {:.3e}.",
        name,
        rules.s_state.zeroth,
        rules.s_state.mass_squared,
        rules.s_state.inverse_mass_squared,
        rules.d_state.zeroth,
        rules.d_state.mass_squared,
        rules.d_state.inverse_mass_squared
    );
    if !rules.s_state_satisfied(SUM_RULE_TOLERANCE) {
        warn!(
            "Model '{}': S-state coefficients violate Σc = 0 (relative residual {:.2e}); the wave function does not vanish at the origin.",
            name,
            rules.s_state.relative_zeroth()
        );
    }
}
