use thiserror::Error;

use super::config::ConfigError;
use crate::core::validation::ValidationError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Validation failed in phase '{phase}': {source}")]
    Validation {
        phase: &'static str,
        #[source]
        source: ValidationError,
    },
}

impl EngineError {
    pub(crate) fn validation(phase: &'static str) -> impl FnOnce(ValidationError) -> Self {
        move |source| EngineError::Validation { phase, source }
    }
}
