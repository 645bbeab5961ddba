//! CLI error types

use std::path::PathBuf;

use crate::error::SchemaError;
use crate::import::ImportError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
    #[error(transparent)]
    ImportError(#[from] ImportError),
    #[error("Schema build failed: {0}")]
    SchemaError(#[from] SchemaError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
