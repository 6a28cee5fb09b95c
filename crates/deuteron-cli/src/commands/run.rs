use crate::cli::RunArgs;
use crate::config::PartialRunConfig;
use crate::error::Result;
use crate::plot;
use crate::utils::progress::CliProgressHandler;
use deuteron::core::io::sinks::DirectorySink;
use deuteron::core::io::text::TextTable;
use deuteron::core::io::traits::TableFormat;
use deuteron::core::models::table::DistributionTable;
use deuteron::engine::error::EngineError;
use deuteron::engine::progress::ProgressReporter;
use deuteron::workflows::distribution::{self, BatchResult};
use std::path::Path;
use tracing::{error, info, warn};

pub const COMBINED_PLOT_NAME: &str = "combined_distribution.png";

pub fn run(args: RunArgs) -> Result<()> {
    let partial_config = PartialRunConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let grid = &config.run.grid;
    info!(
        "Grid: {} {} points on [{}, {}] fm^-1.",
        grid.points, grid.spacing, grid.lower, grid.upper
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let mut sink = DirectorySink::new(&config.data_dir);

    println!(
        "Computing momentum distributions for {} model(s)...",
        config.models.len()
    );
    let mut batch = distribution::run_and_export(&config.models, &config.run, &mut sink, &reporter);

    if config.plots {
        plot_models(&mut batch, &sink, &config.plot_dir);
    } else {
        info!("Plot generation disabled.");
    }

    print_summary(&batch, &sink);
    Ok(())
}

fn plot_models(batch: &mut BatchResult, sink: &DirectorySink, plot_dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(plot_dir) {
        error!("Failed to create plot directory {:?}: {}", plot_dir, e);
    }

    for outcome in &mut batch.outcomes {
        let Ok(report) = &outcome.result else {
            continue;
        };
        let output = plot_dir.join(format!("{}_distribution.png", outcome.name));
        match plot::single_plot(&outcome.name, &report.distribution.table, &output) {
            Ok(()) => info!("Wrote plot for '{}' to {:?}", outcome.name, output),
            Err(e) => {
                error!("Skipping model '{}': failed to plot {:?}: {}", outcome.name, output, e);
                outcome.result = Err(EngineError::Output {
                    model: outcome.name.clone(),
                    source: e.into(),
                });
            }
        }
    }

    let tables = exported_tables(batch, sink);
    if tables.is_empty() {
        warn!("No successful models; skipping the combined plot.");
        return;
    }

    let output = plot_dir.join(COMBINED_PLOT_NAME);
    match plot::combined_plot(&tables, &output) {
        Ok(()) => info!("Wrote combined plot of {} model(s) to {:?}", tables.len(), output),
        Err(e) => error!("Failed to write the combined plot {:?}: {}", output, e),
    }
}

/// Reads the exported tables of the successful models back from disk.
fn exported_tables(batch: &BatchResult, sink: &DirectorySink) -> Vec<(String, DistributionTable)> {
    batch
        .successes()
        .filter_map(|(name, _)| {
            let path = sink.path_for(name);
            match TextTable::read_from_path(&path) {
                Ok(table) => Some((name.to_string(), table)),
                Err(e) => {
                    warn!("Leaving '{}' out of the combined plot: cannot read {:?}: {}", name, path, e);
                    None
                }
            }
        })
        .collect()
}

fn print_summary(batch: &BatchResult, sink: &DirectorySink) {
    println!(
        "\nSummary: {} of {} model(s) succeeded.",
        batch.success_count(),
        batch.outcomes.len()
    );

    for outcome in &batch.outcomes {
        match &outcome.result {
            Ok(report) => {
                let summary = &report.distribution.summary;
                println!(
                    "  ✓ {}: peak p = {:.4} fm^-1, <p> = {:.4} fm^-1, P_D = {:.2}% -> {}",
                    outcome.name,
                    summary.peak_momentum,
                    summary.mean_momentum,
                    100.0 * summary.d_state_probability,
                    sink.path_for(&outcome.name).display()
                );
                if report.tail_exceeds_threshold {
                    println!(
                        "    ⚠ estimated probability beyond the grid: {:.2e}",
                        summary.tail_mass_estimate
                    );
                }
            }
            Err(e) => println!("  ✗ {} skipped ({}): {}", outcome.name, e.kind(), e),
        }
    }
}
