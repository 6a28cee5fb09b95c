pub mod defaults;
pub mod models;

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use deuteron::core::models::params::ModelParameters;
use deuteron::engine::config::{GridSpacing, GridSpecBuilder, RunConfigBuilder};
use models::AppConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
struct FileCoefficients {
    c: Vec<f64>,
    #[serde(default)]
    d: Vec<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct FileModel {
    name: String,
    alpha: f64,
    #[serde(rename = "m_0", alias = "m0")]
    m0: f64,
    parameters: FileCoefficients,
}

impl From<FileModel> for ModelParameters {
    // Constraint checks run per model in the engine, so a bad model is skipped
    // instead of failing the whole configuration.
    fn from(m: FileModel) -> Self {
        Self {
            name: m.name,
            alpha: m.alpha,
            m0: m.m0,
            c: m.parameters.c,
            d: m.parameters.d,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialGridConfig {
    lower: Option<f64>,
    upper: Option<f64>,
    points: Option<usize>,
    spacing: Option<GridSpacing>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    #[serde(rename = "data-dir")]
    data_dir: Option<PathBuf>,
    #[serde(rename = "plot-dir")]
    plot_dir: Option<PathBuf>,
    plots: Option<bool>,
    #[serde(rename = "tail-threshold")]
    tail_threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRunConfig {
    #[serde(default)]
    models: Vec<FileModel>,
    grid: Option<PartialGridConfig>,
    output: Option<PartialOutputConfig>,
}

impl PartialRunConfig {
    /// Reads a configuration file, choosing JSON or TOML by its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(anyhow::Error::from)
        } else {
            toml::from_str(&content).map_err(anyhow::Error::from)
        };

        parsed.map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the model list: it must be non-empty and names must be unique and
    /// non-blank, since they become output file names.
    pub fn validate_models(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(CliError::Config(
                "The configuration does not define any `models`.".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, model) in self.models.iter().enumerate() {
            let name = model.name.trim();
            if name.is_empty() {
                return Err(CliError::Config(format!(
                    "Model #{} has an empty name.",
                    index + 1
                )));
            }
            if name.contains(['/', '\\']) {
                return Err(CliError::Config(format!(
                    "Model name '{}' must not contain path separators.",
                    model.name
                )));
            }
            if !seen.insert(name) {
                return Err(CliError::Config(format!(
                    "Duplicate model name '{}'.",
                    model.name
                )));
            }
        }
        Ok(())
    }

    /// Resolves every setting as CLI argument, then file value, then built-in default.
    pub fn merge_with_cli(mut self, args: &RunArgs) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;
        self.validate_models()?;

        let defaults = DefaultsConfig::default();
        let grid_config = self.grid.take().unwrap_or_default();
        let output_config = self.output.take().unwrap_or_default();

        let grid = GridSpecBuilder::new()
            .lower(args.lower.or(grid_config.lower).unwrap_or(defaults.lower))
            .upper(args.upper.or(grid_config.upper).unwrap_or(defaults.upper))
            .points(args.points.or(grid_config.points).unwrap_or(defaults.points))
            .spacing(
                args.spacing
                    .or(grid_config.spacing)
                    .unwrap_or(defaults.spacing),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let run = RunConfigBuilder::new()
            .grid(grid)
            .tail_threshold(
                args.tail_threshold
                    .or(output_config.tail_threshold)
                    .unwrap_or(defaults.tail_threshold),
            )
            .parallel(args.parallel)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let plots = if args.no_plots {
            false
        } else {
            output_config.plots.unwrap_or(defaults.plots)
        };

        Ok(AppConfig {
            models: self.models.into_iter().map(Into::into).collect(),
            run,
            data_dir: args
                .data_dir
                .clone()
                .or(output_config.data_dir)
                .unwrap_or_else(|| PathBuf::from(&defaults.data_dir)),
            plot_dir: args
                .plot_dir
                .clone()
                .or(output_config.plot_dir)
                .unwrap_or_else(|| PathBuf::from(&defaults.plot_dir)),
            plots,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            let invalid = |kind: &str| {
                CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
            };

            match key {
                "grid.lower" => {
                    self.grid.get_or_insert_with(Default::default).lower =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "grid.upper" => {
                    self.grid.get_or_insert_with(Default::default).upper =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "grid.points" => {
                    self.grid.get_or_insert_with(Default::default).points =
                        Some(value_str.parse().map_err(|_| invalid("integer"))?);
                }
                "grid.spacing" => {
                    self.grid.get_or_insert_with(Default::default).spacing =
                        Some(value_str.parse().map_err(|_| invalid("spacing"))?);
                }
                "output.tail-threshold" => {
                    self.output.get_or_insert_with(Default::default).tail_threshold =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "output.plots" => {
                    self.output.get_or_insert_with(Default::default).plots =
                        Some(value_str.parse().map_err(|_| invalid("boolean"))?);
                }
                "output.data-dir" => {
                    self.output.get_or_insert_with(Default::default).data_dir =
                        Some(PathBuf::from(value_str));
                }
                "output.plot-dir" => {
                    self.output.get_or_insert_with(Default::default).plot_dir =
                        Some(PathBuf::from(value_str));
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
