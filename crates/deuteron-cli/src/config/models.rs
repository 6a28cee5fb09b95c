use deuteron::core::models::params::ModelParameters;
use deuteron::engine::config::RunConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub models: Vec<ModelParameters>,
    pub run: RunConfig,
    pub data_dir: PathBuf,
    pub plot_dir: PathBuf,
    pub plots: bool,
}
