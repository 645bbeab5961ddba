//! YAML definition importer
//!
//! A document is a single table mapping or a sequence of them. Nested tables are marked
//! with the `!Table` tag so they can be told apart from plain column types:
//!
//! ```yaml
//! !Table
//! name: people
//! columns:
//!   firstName: String
//!   lastName:  String
//!   inventory: !Table
//!     name: items
//!     columns:
//!       description: String
//! ```
//!
//! A table mapping has a required `name`, an optional `columns` mapping and an optional
//! `primary_key` naming one of its columns. A nested `!Table` with only a `name` is a
//! reference to a table defined elsewhere in the graph.

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use super::ImportError;
use crate::models::{ColumnSpec, ColumnValue, TableDefinition};
use crate::validation::input::{validate_column_name, validate_table_name};

/// Tag marking a nested table
pub const TABLE_TAG: &str = "Table";

const KNOWN_KEYS: [&str; 3] = ["name", "columns", "primary_key"];

/// Importer for tagged YAML table definitions
#[derive(Debug, Default)]
pub struct DefinitionImporter;

impl DefinitionImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into its root definitions.
    ///
    /// An empty document yields no definitions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nested_schema::import::DefinitionImporter;
    ///
    /// let roots = DefinitionImporter::new()
    ///     .parse("!Table\nname: people\ncolumns:\n  firstName: String\n")
    ///     .unwrap();
    /// assert_eq!(roots[0].name, "people");
    /// ```
    pub fn parse(&self, yaml: &str) -> Result<Vec<TableDefinition>, ImportError> {
        if yaml.trim().is_empty() {
            return Ok(Vec::new());
        }
        let document: Value = serde_yaml::from_str(yaml)?;

        let roots = match &document {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.parse_root(item))
                .collect::<Result<Vec<_>, _>>()?,
            other => vec![self.parse_root(other)?],
        };

        debug!("Parsed {} root table definitions", roots.len());
        Ok(roots)
    }

    fn parse_root(&self, value: &Value) -> Result<TableDefinition, ImportError> {
        match value {
            Value::Tagged(tagged) if tagged.tag == TABLE_TAG => match &tagged.value {
                Value::Mapping(mapping) => self.parse_table(mapping),
                other => Err(ImportError::InvalidStructure(format!(
                    "!{} must be a mapping, found {}",
                    TABLE_TAG,
                    value_kind(other)
                ))),
            },
            Value::Mapping(mapping) => self.parse_table(mapping),
            other => Err(ImportError::InvalidStructure(format!(
                "expected a table definition at the document root, found {}",
                value_kind(other)
            ))),
        }
    }

    fn parse_table(&self, mapping: &Mapping) -> Result<TableDefinition, ImportError> {
        let name = mapping
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ImportError::MissingField {
                table: "<unnamed>".to_string(),
                field: "name",
            })?;
        validate_table_name(name).map_err(|source| ImportError::Validation {
            table: name.to_string(),
            source,
        })?;

        for key in mapping.keys() {
            match key.as_str() {
                Some(k) if KNOWN_KEYS.contains(&k) => {}
                _ => warn!("Ignoring unknown key {:?} in table {}", key, name),
            }
        }

        let mut definition = TableDefinition::new(name);

        match mapping.get("columns") {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(columns)) => {
                for (key, value) in columns {
                    let column_name = key.as_str().ok_or_else(|| ImportError::InvalidColumn {
                        table: name.to_string(),
                        column: format!("{:?}", key),
                        reason: "column names must be strings".to_string(),
                    })?;
                    validate_column_name(column_name).map_err(|source| {
                        ImportError::Validation {
                            table: name.to_string(),
                            source,
                        }
                    })?;
                    let column = self.parse_column(name, column_name, value)?;
                    definition.columns.insert(column_name.to_string(), column);
                }
            }
            Some(other) => {
                return Err(ImportError::InvalidStructure(format!(
                    "columns of table {} must be a mapping, found {}",
                    name,
                    value_kind(other)
                )));
            }
        }

        match mapping.get("primary_key") {
            None | Some(Value::Null) => {}
            Some(Value::String(key)) => {
                validate_column_name(key).map_err(|source| ImportError::Validation {
                    table: name.to_string(),
                    source,
                })?;
                definition.primary_key = Some(key.clone());
            }
            Some(other) => {
                return Err(ImportError::InvalidStructure(format!(
                    "primary_key of table {} must be a column name, found {}",
                    name,
                    value_kind(other)
                )));
            }
        }

        Ok(definition)
    }

    fn parse_column(
        &self,
        table: &str,
        column: &str,
        value: &Value,
    ) -> Result<ColumnValue, ImportError> {
        let invalid = |reason: String| ImportError::InvalidColumn {
            table: table.to_string(),
            column: column.to_string(),
            reason,
        };

        match value {
            Value::String(type_name) => Ok(ColumnValue::Column(ColumnSpec::new(type_name.clone()))),
            Value::Tagged(tagged) if tagged.tag == TABLE_TAG => match &tagged.value {
                Value::Mapping(mapping) => Ok(ColumnValue::Table(self.parse_table(mapping)?)),
                other => Err(invalid(format!(
                    "!{} must be a mapping, found {}",
                    TABLE_TAG,
                    value_kind(other)
                ))),
            },
            Value::Tagged(tagged) => Err(invalid(format!("unsupported tag {}", tagged.tag))),
            Value::Mapping(_) => Err(invalid(format!(
                "nested tables must be tagged !{}",
                TABLE_TAG
            ))),
            other => Err(invalid(format!(
                "expected a type name, found {}",
                value_kind(other)
            ))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
