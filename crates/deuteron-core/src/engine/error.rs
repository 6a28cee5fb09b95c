use crate::core::models::params::ParameterError;
use thiserror::Error;

/// Failures scoped to a single model; they never abort a batch.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid parameter for model '{model}': {source}")]
    InvalidParameter {
        model: String,
        #[source]
        source: ParameterError,
    },

    #[error(
        "Degenerate normalization for model '{model}': density integral is {integral}, which cannot be rescaled to one"
    )]
    DegenerateNormalization { model: String, integral: f64 },

    #[error("Output failed for model '{model}': {source}")]
    Output {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EngineError {
    pub(crate) fn invalid(model: &str, source: ParameterError) -> Self {
        Self::InvalidParameter {
            model: model.to_string(),
            source,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::InvalidParameter { model, .. }
            | Self::DegenerateNormalization { model, .. }
            | Self::Output { model, .. } => model,
        }
    }

    /// Short label for the error kind, used in run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid parameter",
            Self::DegenerateNormalization { .. } => "degenerate normalization",
            Self::Output { .. } => "output",
        }
    }
}
