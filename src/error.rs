//! # Errors
//!
//! Every condition that stops a generation run. All of them are terminal:
//! the run never retries and never leaves a partially written bundle.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for a generation run
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required input file does not exist
    #[error("Required file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// An input file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file is malformed or misses a required field
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// `registry` or `owner` is empty after defaulting
    #[error("Required parameter '{name}' was not provided")]
    MissingRequiredParameter { name: &'static str },

    /// The bundle could not be persisted
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be converted to a YAML tree
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Short machine-friendly name of the condition, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::MissingFile { .. } => "MissingFile",
            GeneratorError::Read { .. } => "ReadFailure",
            GeneratorError::Parse { .. } => "ParseError",
            GeneratorError::MissingRequiredParameter { .. } => "MissingRequiredParameter",
            GeneratorError::WriteFailure { .. } => "WriteFailure",
            GeneratorError::Serialize(_) => "SerializeError",
        }
    }
}
