//! Build command implementation

use std::path::Path;

use tracing::info;

use super::{load_config, load_input};
use crate::builder::SchemaBuilder;
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_registry};
use crate::import::DefinitionImporter;
use crate::registry::TableRegistry;

/// Parse and build the definitions in `input`
pub fn build_from_input(input: &str, config: Option<&Path>) -> Result<TableRegistry, CliError> {
    let content = load_input(input)?;
    let config = load_config(config)?;

    let roots = DefinitionImporter::new().parse(&content)?;
    let registry = SchemaBuilder::with_config(config).build_all(&roots)?;
    info!("Built {} tables from {}", registry.len(), input);
    Ok(registry)
}

/// Handle the build command
pub fn handle_build(
    input: &str,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let registry = build_from_input(input, config)?;
    print!("{}", format_registry(&registry, format)?);
    Ok(())
}
