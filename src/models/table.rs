//! Table model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::column::Column;
use crate::error::SchemaError;

/// A constructed table
///
/// The primary key is fixed at construction and always occupies the first column slot.
/// Columns appended later keep their insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawTable")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    columns: Vec<Column>,
}

/// Unchecked serialized form of a [`Table`]
#[derive(Deserialize)]
struct RawTable {
    id: Uuid,
    name: String,
    columns: Vec<Column>,
}

impl TryFrom<RawTable> for Table {
    type Error = SchemaError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| SchemaError::InvalidTable {
            name: raw.name.clone(),
            reason: reason.to_string(),
        };

        match raw.columns.first() {
            Some(key) if key.primary_key => {}
            Some(_) => return Err(invalid("first column must be the primary key")),
            None => return Err(invalid("table has no primary key column")),
        }
        if raw.columns.iter().skip(1).any(|c| c.primary_key) {
            return Err(invalid("only the first column may be a primary key"));
        }
        for (idx, column) in raw.columns.iter().enumerate() {
            if raw.columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(invalid(&format!("duplicate column \"{}\"", column.name)));
            }
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            columns: raw.columns,
        })
    }
}

impl Table {
    /// Create a table holding only its primary key.
    ///
    /// The key column is flagged as a primary key even if the caller built it as an
    /// ordinary column.
    pub fn new(name: impl Into<String>, mut primary_key: Column) -> Self {
        let name = name.into();
        primary_key.primary_key = true;
        Self {
            id: Self::generate_id(&name),
            name,
            columns: vec![primary_key],
        }
    }

    /// Deterministic UUID v5 for a table name
    pub fn generate_id(name: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("table:{}", name).as_bytes())
    }

    pub fn primary_key(&self) -> &Column {
        &self.columns[0]
    }

    /// All columns, primary key first
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Columns that reference other tables
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_foreign_key())
    }

    /// Append a column after the existing ones.
    ///
    /// Column names are unique within a table. Appended columns never become part of
    /// the primary key.
    pub fn append_column(&mut self, mut column: Column) -> Result<(), SchemaError> {
        if self.has_column(&column.name) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        column.primary_key = false;
        self.columns.push(column);
        Ok(())
    }
}
