//! Nested Schema - relational schemas from nested table definitions
//!
//! Provides:
//! - Definition import (tagged YAML documents)
//! - Column type resolution against a fixed type catalog
//! - The schema graph builder (primary and foreign key synthesis, cycle-safe)
//! - The table registry holding the finished schema
//! - Relationship analysis of a built schema

pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod import;
pub mod models;
pub mod registry;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuilderConfig, ConflictPolicy, SchemaBuilder};
pub use error::SchemaError;
pub use import::{DefinitionImporter, ImportError};
pub use models::{Column, ColumnSpec, ColumnValue, ForeignKey, Table, TableDefinition};
pub use registry::TableRegistry;
pub use types::{ColumnType, TypeCatalog};
pub use validation::{RelationshipGraph, RelationshipValidationError, RelationshipValidationResult};
