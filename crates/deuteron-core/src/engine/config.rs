use crate::core::models::params::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSpacing {
    /// Evenly spaced points.
    #[default]
    Linear,
    /// Constant ratio between neighbors; denser at low momentum. Requires `lower > 0`.
    Geometric,
}

impl fmt::Display for GridSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridSpacing::Linear => write!(f, "linear"),
            GridSpacing::Geometric => write!(f, "geometric"),
        }
    }
}

impl FromStr for GridSpacing {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(GridSpacing::Linear),
            "geometric" | "log" => Ok(GridSpacing::Geometric),
            _ => Err(ParameterError::UnknownSpacing(s.to_string())),
        }
    }
}

/// Momentum grid specification, in fm⁻¹.
///
/// The upper bound truncates the normalization integral: probability beyond it is
/// dropped, not corrected for. The default of 5 fm⁻¹ (about 1 GeV/c) keeps the
/// truncated tail of realistic deuteron models well below 10⁻³.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub lower: f64,
    pub upper: f64,
    pub points: usize,
    pub spacing: GridSpacing,
}

impl GridSpec {
    pub const DEFAULT_LOWER: f64 = 0.001;
    pub const DEFAULT_UPPER: f64 = 5.0;
    pub const DEFAULT_POINTS: usize = 500;

    pub fn linear(lower: f64, upper: f64, points: usize) -> Self {
        Self {
            lower,
            upper,
            points,
            spacing: GridSpacing::Linear,
        }
    }

    pub fn geometric(lower: f64, upper: f64, points: usize) -> Self {
        Self {
            lower,
            upper,
            points,
            spacing: GridSpacing::Geometric,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let invalid = |reason: String| Err(ParameterError::InvalidGrid(reason));
        if !(self.lower.is_finite() && self.upper.is_finite()) {
            return invalid(format!(
                "bounds must be finite (lower = {}, upper = {})",
                self.lower, self.upper
            ));
        }
        if self.lower < 0.0 {
            return invalid(format!("lower bound {} is negative", self.lower));
        }
        if self.upper <= self.lower {
            return invalid(format!(
                "upper bound {} must exceed lower bound {}",
                self.upper, self.lower
            ));
        }
        if self.points < 2 {
            return invalid(format!("at least 2 points are required, got {}", self.points));
        }
        if self.spacing == GridSpacing::Geometric && self.lower == 0.0 {
            return invalid("geometric spacing requires a positive lower bound".to_string());
        }
        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::linear(Self::DEFAULT_LOWER, Self::DEFAULT_UPPER, Self::DEFAULT_POINTS)
    }
}

#[derive(Default)]
pub struct GridSpecBuilder {
    lower: Option<f64>,
    upper: Option<f64>,
    points: Option<usize>,
    spacing: Option<GridSpacing>,
}

impl GridSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lower(mut self, lower: f64) -> Self {
        self.lower = Some(lower);
        self
    }
    pub fn upper(mut self, upper: f64) -> Self {
        self.upper = Some(upper);
        self
    }
    pub fn points(mut self, points: usize) -> Self {
        self.points = Some(points);
        self
    }
    pub fn spacing(mut self, spacing: GridSpacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Fills unset fields from [`GridSpec::default`] and validates the result.
    pub fn build(self) -> Result<GridSpec, ParameterError> {
        let defaults = GridSpec::default();
        let spec = GridSpec {
            lower: self.lower.unwrap_or(defaults.lower),
            upper: self.upper.unwrap_or(defaults.upper),
            points: self.points.unwrap_or(defaults.points),
            spacing: self.spacing.unwrap_or(defaults.spacing),
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub grid: GridSpec,
    /// Estimated probability beyond the grid's upper bound above which a warning is logged.
    pub tail_threshold: f64,
    /// Compute models on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl RunConfig {
    pub const DEFAULT_TAIL_THRESHOLD: f64 = 1e-3;
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            tail_threshold: Self::DEFAULT_TAIL_THRESHOLD,
            parallel: false,
        }
    }
}

#[derive(Default)]
pub struct RunConfigBuilder {
    grid: Option<GridSpec>,
    tail_threshold: Option<f64>,
    parallel: Option<bool>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }
    pub fn tail_threshold(mut self, threshold: f64) -> Self {
        self.tail_threshold = Some(threshold);
        self
    }
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let tail_threshold = self
            .tail_threshold
            .ok_or(ConfigError::MissingParameter("tail_threshold"))?;
        if !(tail_threshold.is_finite() && tail_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "tail_threshold",
                reason: format!("must be a non-negative number, got {tail_threshold}"),
            });
        }
        Ok(RunConfig {
            grid: self.grid.ok_or(ConfigError::MissingParameter("grid"))?,
            tail_threshold,
            parallel: self.parallel.unwrap_or(false),
        })
    }
}
