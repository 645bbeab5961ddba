//! Import functionality
//!
//! Decodes declarative documents into definition trees:
//! - YAML with `!Table` tags marking nested tables

pub mod yaml;

use crate::validation::ValidationError;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
    #[error("Missing field \"{field}\" in table {table}")]
    MissingField { table: String, field: &'static str },
    #[error("Invalid column \"{column}\" in table \"{table}\": {reason}")]
    InvalidColumn {
        table: String,
        column: String,
        reason: String,
    },
    #[error("Validation error in table \"{table}\": {source}")]
    Validation {
        table: String,
        #[source]
        source: ValidationError,
    },
}

impl From<serde_yaml::Error> for ImportError {
    fn from(e: serde_yaml::Error) -> Self {
        ImportError::Parse(e.to_string())
    }
}

// Re-export for convenience
pub use yaml::DefinitionImporter;
