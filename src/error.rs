//! Error types for schema construction

use thiserror::Error;

/// Errors raised while resolving types, touching the registry, or building a schema.
///
/// Every variant carries the table and/or column names involved so a malformed
/// definition can be located without re-reading the whole input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Column type name not present in the type catalog
    #[error("Unknown type \"{type_name}\" in column \"{column_name}\"")]
    UnknownType {
        type_name: String,
        column_name: String,
    },

    /// Registry lookup miss
    #[error("Table not found: {name}")]
    TableNotFound { name: String },

    /// A table with this name is already registered
    #[error("Table already registered: {name}")]
    DuplicateTable { name: String },

    /// A column with this name already exists on the table
    #[error("Column \"{column}\" already exists in table \"{table}\"")]
    DuplicateColumn { table: String, column: String },

    /// The declared primary key has no matching column entry
    #[error("Primary key \"{column}\" is not declared in the columns of table \"{table}\"")]
    MissingPrimaryKey { table: String, column: String },

    /// The declared primary key is a nested table instead of a plain column
    #[error("Primary key \"{column}\" of table \"{table}\" must be a plain column, not a nested table")]
    InvalidPrimaryKey { table: String, column: String },

    /// Same table name, different shape, under the reject policy
    #[error("Table \"{name}\" is defined twice with different columns")]
    ConflictingDefinition { name: String },

    /// A loaded table or registry does not hold its invariants
    #[error("Invalid table \"{name}\": {reason}")]
    InvalidTable { name: String, reason: String },

    /// Nesting is deeper than the configured guard
    #[error("Maximum nesting depth exceeded at table \"{table}\": {depth} > {max}")]
    MaxDepthExceeded {
        table: String,
        depth: usize,
        max: usize,
    },
}
