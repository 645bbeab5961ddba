//! Output formatting for CLI

use clap::ValueEnum;

use super::error::CliError;
use crate::registry::TableRegistry;
use crate::validation::{RelationshipValidationError, RelationshipValidationResult};

/// Output format of the `build` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Render a registry in the requested format
pub fn format_registry(registry: &TableRegistry, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(format_text_output(registry)),
        OutputFormat::Json => serde_json::to_string_pretty(registry)
            .map_err(|e| CliError::SerializationError(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(registry)
            .map_err(|e| CliError::SerializationError(e.to_string())),
    }
}

/// Human-readable table listing
pub fn format_text_output(registry: &TableRegistry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Built {} table(s):\n", registry.len()));
    for table in registry {
        output.push_str(&format!("\nTable {}:\n", table.name));
        for col in table.columns() {
            output.push_str(&format!("  - {} ({})", col.name, col.column_type));
            if col.primary_key {
                output.push_str(" PRIMARY KEY");
            }
            if col.autoincrement {
                output.push_str(" AUTOINCREMENT");
            }
            if let Some(fk) = &col.foreign_key {
                output.push_str(&format!(" -> {}.{}", fk.table, fk.column));
            }
            output.push('\n');
        }
    }

    output
}

/// Report produced by the `validate` command
pub fn format_validation_report(
    registry: &TableRegistry,
    order: &Result<Vec<&str>, RelationshipValidationError>,
    result: &RelationshipValidationResult,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} table(s) built\n", registry.len()));

    match order {
        Ok(order) => {
            output.push_str(&format!("Dependency order: {}\n", order.join(", ")));
        }
        Err(e) => {
            output.push_str(&format!("Dependency order unavailable: {}\n", e));
        }
    }

    if !result.circular_dependencies.is_empty() {
        output.push_str("\nCircular foreign key dependencies:\n");
        for cycle in &result.circular_dependencies {
            output.push_str(&format!("  - {}\n", cycle.join(" <-> ")));
        }
    }

    if !result.self_references.is_empty() {
        output.push_str("\nSelf-references:\n");
        for reference in &result.self_references {
            output.push_str(&format!("  - {}.{}\n", reference.table, reference.column));
        }
    }

    if !registry.pending().is_empty() {
        output.push_str("\nReferenced but never defined:\n");
        for name in registry.pending() {
            output.push_str(&format!("  - {}\n", name));
        }
    }

    output
}
