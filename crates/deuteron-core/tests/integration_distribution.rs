use deuteron::core::io::sinks::{DirectorySink, MemorySink};
use deuteron::core::io::text::TextTable;
use deuteron::core::io::traits::{TableFormat, TableSink};
use deuteron::core::models::table::DistributionTable;
use deuteron::core::models::params::ModelParameters;
use deuteron::core::physics::wavefunction::WaveFunction;
use deuteron::engine::config::{GridSpec, RunConfig};
use deuteron::engine::distribution::calculate;
use deuteron::engine::error::EngineError;
use deuteron::engine::progress::ProgressReporter;
use deuteron::workflows::distribution::{run, run_and_export};

const NORMALIZATION_TOLERANCE: f64 = 1e-6;

fn reference_grid() -> GridSpec {
    GridSpec::linear(0.001, 5.0, 500)
}

fn yukawa_pair(name: &str) -> ModelParameters {
    ModelParameters::new(name, 0.23, 0.8, vec![1.0, -1.0], vec![]).unwrap()
}

/// Paris potential parameterization; the last coefficients of each series follow from
/// the sum rules.
fn paris_like(name: &str) -> ModelParameters {
    ModelParameters::new(
        name,
        0.23162461,
        1.0,
        vec![
            0.88688076,
            -0.34717093,
            -3.050238,
            56.207766,
            -749.57334,
            5336.5279,
            -22706.863,
            60434.469,
            -102920.58,
            112233.57,
            -75925.226,
            29059.715,
            -4815.7368,
        ],
        vec![
            0.023135193,
            -0.85604572,
            5.6068193,
            -69.462922,
            416.31118,
            -1254.6621,
            1238.783,
            3373.9172,
            -13041.151,
            19512.524,
            -15634.324,
            6623.1089,
            -1169.8185,
        ],
    )
    .unwrap()
}

fn run_config() -> RunConfig {
    RunConfig {
        grid: reference_grid(),
        ..RunConfig::default()
    }
}

#[test]
fn yukawa_pair_rises_then_falls_and_is_normalized() {
    let params = yukawa_pair("yukawa");
    let dist = calculate(&params, &reference_grid()).unwrap();
    let densities = dist.table.densities();

    assert_eq!(densities.len(), 500);
    assert!((dist.table.integral() - 1.0).abs() < NORMALIZATION_TOLERANCE);

    let peak_index = densities
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert!(peak_index > 0 && peak_index < densities.len() - 1);
    assert!(densities[..=peak_index].windows(2).all(|w| w[1] >= w[0]));
    assert!(densities[peak_index..].windows(2).all(|w| w[1] <= w[0]));

    let wave_function = WaveFunction::new(&params).unwrap();
    for &p in dist.table.momenta() {
        assert_eq!(wave_function.amplitudes(p).unwrap().w, 0.0);
    }
}

#[test]
fn realistic_model_is_normalized_with_small_d_state() {
    let dist = calculate(&paris_like("paris"), &reference_grid()).unwrap();
    assert!((dist.table.integral() - 1.0).abs() < NORMALIZATION_TOLERANCE);
    assert!(dist.table.densities().iter().all(|&rho| rho >= 0.0));
    assert!((dist.summary.d_state_probability - 0.0577).abs() < 1e-3);
    assert!((dist.summary.raw_integral - std::f64::consts::FRAC_PI_2).abs() < 1e-2);
    assert!(dist.summary.tail_mass_estimate < RunConfig::DEFAULT_TAIL_THRESHOLD);
}

#[test]
fn model_name_does_not_affect_the_table() {
    let a = calculate(&yukawa_pair("first"), &reference_grid()).unwrap();
    let b = calculate(&yukawa_pair("second"), &reference_grid()).unwrap();
    let bits = |t: &[f64]| t.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(a.table.densities()), bits(b.table.densities()));
    assert_eq!(bits(a.table.momenta()), bits(b.table.momenta()));
}

#[test]
fn reordering_models_does_not_change_their_tables() {
    let models = vec![yukawa_pair("yukawa"), paris_like("paris")];
    let reversed: Vec<_> = models.iter().rev().cloned().collect();

    let forward = run(&models, &run_config(), &ProgressReporter::new());
    let backward = run(&reversed, &run_config(), &ProgressReporter::new());

    for (name, report) in forward.successes() {
        let (_, other) = backward.successes().find(|(n, _)| *n == name).unwrap();
        assert_eq!(report.distribution.table, other.distribution.table);
    }
}

#[test]
fn zero_coefficients_are_degenerate() {
    let params = ModelParameters::new("zero", 0.5, 1.0, vec![0.0, 0.0], vec![]).unwrap();
    let result = calculate(&params, &reference_grid());
    assert!(matches!(
        result,
        Err(EngineError::DegenerateNormalization { .. })
    ));
}

#[test]
fn non_positive_alpha_produces_no_table() {
    let mut params = yukawa_pair("broken");
    params.alpha = 0.0;
    let mut sink = MemorySink::new();
    let batch = run_and_export(&[params], &run_config(), &mut sink, &ProgressReporter::new());

    assert!(matches!(
        batch.outcomes[0].result,
        Err(EngineError::InvalidParameter { .. })
    ));
    assert!(sink.tables().is_empty());
}

#[test]
fn exported_tables_read_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let models = vec![yukawa_pair("yukawa"), paris_like("paris")];
    let batch = run_and_export(&models, &run_config(), &mut sink, &ProgressReporter::new());

    assert_eq!(batch.success_count(), 2);
    for (name, report) in batch.successes() {
        let table = TextTable::read_from_path(sink.path_for(name)).unwrap();
        assert_eq!(table, report.distribution.table);
        assert!((table.integral() - 1.0).abs() < NORMALIZATION_TOLERANCE);
    }
}

/// Stores tables in memory but refuses the model it was told to block.
struct BlockingSink {
    blocked: &'static str,
    inner: MemorySink,
}

impl TableSink for BlockingSink {
    type Error = std::io::Error;

    fn write_table(&mut self, model: &str, table: &DistributionTable) -> Result<(), Self::Error> {
        if model == self.blocked {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("destination for '{model}' is read-only"),
            ));
        }
        let Ok(()) = self.inner.write_table(model, table);
        Ok(())
    }
}

#[test]
fn unwritable_destination_skips_only_the_affected_models() {
    let mut sink = BlockingSink {
        blocked: "yukawa",
        inner: MemorySink::new(),
    };
    let models = vec![yukawa_pair("yukawa"), paris_like("paris")];
    let batch = run_and_export(&models, &run_config(), &mut sink, &ProgressReporter::new());

    let err = batch.outcomes[0].result.as_ref().unwrap_err();
    assert!(matches!(err, EngineError::Output { .. }));
    assert_eq!(err.model(), "yukawa");

    assert_eq!(batch.outcomes[1].name, "paris");
    let report = batch.outcomes[1].result.as_ref().unwrap();
    assert_eq!(sink.inner.tables().len(), 1);
    assert_eq!(sink.inner.get("paris"), Some(&report.distribution.table));
    assert!(sink.inner.get("yukawa").is_none());
}

#[test]
fn directory_that_cannot_be_created_fails_every_model() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();

    let mut sink = DirectorySink::new(&blocked);
    let batch = run_and_export(
        &[yukawa_pair("yukawa")],
        &run_config(),
        &mut sink,
        &ProgressReporter::new(),
    );

    let err = batch.outcomes[0].result.as_ref().unwrap_err();
    assert!(matches!(err, EngineError::Output { .. }));
    assert_eq!(err.model(), "yukawa");
}
