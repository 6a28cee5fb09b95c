use clap::{Args, Parser, Subcommand};
use deuteron::engine::config::GridSpacing;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "AK",
    version,
    about = "Deuteron CLI - Computes and plots the momentum distribution of the nucleon in the deuteron for analytic potential models.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used with --parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute, export and plot the momentum distribution of every configured model.
    Run(RunArgs),
    /// Validate a model configuration file without computing anything.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to the model configuration file (TOML or JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    // --- Output Overrides ---
    /// Directory for the per-model distribution tables.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for the generated plots.
    #[arg(short = 'p', long, value_name = "DIR")]
    pub plot_dir: Option<PathBuf>,

    /// Skip plot generation, writing only the tables.
    #[arg(long)]
    pub no_plots: bool,

    /// Warn when the estimated probability beyond the upper momentum bound exceeds this value.
    #[arg(long, value_name = "FLOAT")]
    pub tail_threshold: Option<f64>,

    // --- Grid Overrides ---
    /// Lower momentum bound in fm^-1.
    #[arg(long, value_name = "FLOAT")]
    pub lower: Option<f64>,

    /// Upper momentum bound in fm^-1; probability beyond it is truncated.
    #[arg(long, value_name = "FLOAT")]
    pub upper: Option<f64>,

    /// Number of grid points.
    #[arg(short = 'n', long, value_name = "INT")]
    pub points: Option<usize>,

    /// Grid spacing: 'linear' or 'geometric'.
    #[arg(long, value_name = "KIND")]
    pub spacing: Option<GridSpacing>,

    // --- Execution ---
    /// Compute models in parallel instead of one after another.
    #[arg(long)]
    pub parallel: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S grid.points=1000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the model configuration file (TOML or JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}
