//! Column model

use serde::{Deserialize, Serialize};

use crate::types::ColumnType;

/// Foreign key reference to another table's column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referenced table name
    pub table: String,
    /// Column name in the referenced table
    pub column: String,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// A constructed column of a [`Table`](super::Table)
///
/// # Example
///
/// ```rust
/// use nested_schema::models::Column;
/// use nested_schema::types::ColumnType;
///
/// let column = Column::new("first_name", ColumnType::String);
/// assert!(!column.primary_key);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Resolved column type
    pub column_type: ColumnType,
    /// Whether this column is the table's primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Whether values are assigned by the database
    #[serde(default)]
    pub autoincrement: bool,
    /// Foreign key reference if this column references another table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Create an ordinary column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            primary_key: false,
            autoincrement: false,
            foreign_key: None,
        }
    }

    /// Create a primary key column
    pub fn primary_key(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            primary_key: true,
            ..Self::new(name, column_type)
        }
    }

    /// Create a foreign key column referencing `target`
    pub fn foreign_key(name: impl Into<String>, column_type: ColumnType, target: ForeignKey) -> Self {
        Self {
            foreign_key: Some(target),
            ..Self::new(name, column_type)
        }
    }

    /// Mark the column as auto-assigned
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }
}
