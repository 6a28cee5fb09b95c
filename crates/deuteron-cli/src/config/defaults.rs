use deuteron::engine::config::{GridSpacing, GridSpec, RunConfig};

pub struct DefaultsConfig {
    pub lower: f64,
    pub upper: f64,
    pub points: usize,
    pub spacing: GridSpacing,
    pub tail_threshold: f64,
    pub data_dir: String,
    pub plot_dir: String,
    pub plots: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            lower: GridSpec::DEFAULT_LOWER,
            upper: GridSpec::DEFAULT_UPPER,
            points: GridSpec::DEFAULT_POINTS,
            spacing: GridSpacing::Linear,
            tail_threshold: RunConfig::DEFAULT_TAIL_THRESHOLD,
            data_dir: "data".to_string(),
            plot_dir: "plots".to_string(),
            plots: true,
        }
    }
}
