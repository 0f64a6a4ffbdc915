use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::discotope::DiscotopeError;
use crate::core::io::interpro::InterproError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discotope(#[from] DiscotopeError),

    #[error(transparent)]
    Interpro(#[from] InterproError),

    #[error("Epitope table for '{protein}' has no '{column}' column")]
    MissingColumn {
        protein: String,
        column: &'static str,
    },

    #[error("Invalid numeric value '{value}' in column '{column}' of '{file}'")]
    InvalidValue {
        column: &'static str,
        value: String,
        file: String,
    },

    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
}
