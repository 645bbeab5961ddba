//! CLI command implementations

pub mod build;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::CliError;
use crate::builder::BuilderConfig;

/// Load input content from file or stdin (`-`)
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load builder configuration from a TOML file, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<BuilderConfig, CliError> {
    let Some(path) = path else {
        return Ok(BuilderConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    let config: BuilderConfig =
        toml::from_str(&content).map_err(|e| CliError::ConfigError(e.to_string()))?;
    debug!("Loaded builder config from {}: {:?}", path.display(), config);
    Ok(config)
}
