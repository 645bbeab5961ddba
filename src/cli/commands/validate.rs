//! Validate command implementation

use std::path::Path;

use super::build::build_from_input;
use crate::cli::error::CliError;
use crate::cli::output::format_validation_report;
use crate::validation::RelationshipGraph;

/// Handle the validate command
///
/// Cycles and self-references are reported, not treated as failures; only import and
/// build errors fail the command.
pub fn handle_validate(input: &str, config: Option<&Path>) -> Result<(), CliError> {
    let registry = build_from_input(input, config)?;
    let graph = RelationshipGraph::from_registry(&registry);

    print!(
        "{}",
        format_validation_report(&registry, &graph.dependency_order(), &graph.validate())
    );
    println!("Validation successful");
    Ok(())
}
