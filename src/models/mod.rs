//! Models module
//!
//! Defines the input definition tree and the constructed tables and columns.

pub mod column;
pub mod definition;
pub mod table;

pub use column::{Column, ForeignKey};
pub use definition::{ColumnSpec, ColumnValue, TableDefinition};
pub use table::Table;
