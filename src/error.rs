use lettering_format::{ConfigError, FormatError};
use thiserror::Error;

/// Errors surfaced by the command line and the batch helpers.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Loading the formatting document failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Formatting failed: {0}")]
    Format(#[from] FormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
