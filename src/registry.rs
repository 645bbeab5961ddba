//! Table registry
//!
//! Ordered mapping from table name to constructed [`Table`]. Tables are kept in
//! construction order. The registry doubles as the builder's memo table: a name that is
//! present is never constructed again.
//!
//! A name that has only been seen as a reference is registered as a placeholder holding
//! the default primary key and is marked pending. The first full definition for that
//! name completes the placeholder in place.

use indexmap::map::{IntoValues, Values};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::models::Table;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct TableRegistry {
    tables: IndexMap<String, Table>,
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pending: IndexSet<String>,
}

/// Unchecked serialized form of a [`TableRegistry`]
#[derive(Deserialize)]
struct RawRegistry {
    tables: IndexMap<String, Table>,
    #[serde(default)]
    pending: IndexSet<String>,
}

impl TryFrom<RawRegistry> for TableRegistry {
    type Error = SchemaError;

    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        if let Some((key, table)) = raw.tables.iter().find(|(key, table)| **key != table.name) {
            return Err(SchemaError::InvalidTable {
                name: key.clone(),
                reason: format!("registered under a different name than \"{}\"", table.name),
            });
        }
        if let Some(name) = raw.pending.iter().find(|name| !raw.tables.contains_key(*name)) {
            return Err(SchemaError::InvalidTable {
                name: name.clone(),
                reason: "marked pending but not registered".to_string(),
            });
        }

        Ok(Self {
            tables: raw.tables,
            pending: raw.pending,
        })
    }
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Table, SchemaError> {
        self.tables
            .get(name)
            .ok_or_else(|| SchemaError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Table, SchemaError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| SchemaError::TableNotFound {
                name: name.to_string(),
            })
    }

    /// Add a table. Names are unique; registering a name twice is an error.
    pub fn register(&mut self, table: Table) -> Result<(), SchemaError> {
        if self.tables.contains_key(&table.name) {
            return Err(SchemaError::DuplicateTable { name: table.name });
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    /// Whether `name` is a placeholder created from a reference only
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.contains(name)
    }

    /// Placeholder names still waiting for a full definition
    pub fn pending(&self) -> Vec<&str> {
        self.pending.iter().map(|n| n.as_str()).collect()
    }

    /// Mark a registered table as a placeholder.
    pub fn mark_pending(&mut self, name: &str) -> Result<(), SchemaError> {
        if !self.tables.contains_key(name) {
            return Err(SchemaError::TableNotFound {
                name: name.to_string(),
            });
        }
        self.pending.insert(name.to_string());
        Ok(())
    }

    /// Replace a pending placeholder with its full table, keeping its position.
    ///
    /// Returns the placeholder so the caller can carry over columns added to it.
    pub fn complete(&mut self, table: Table) -> Result<Table, SchemaError> {
        let slot = self.tables.get_mut(&table.name).ok_or_else(|| SchemaError::TableNotFound {
            name: table.name.clone(),
        })?;
        if !self.pending.shift_remove(&table.name) {
            return Err(SchemaError::DuplicateTable { name: table.name });
        }
        Ok(std::mem::replace(slot, table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in construction order
    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(|k| k.as_str()).collect()
    }

    /// Tables in construction order
    pub fn tables(&self) -> Values<'_, String, Table> {
        self.tables.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for TableRegistry {
    type Item = Table;
    type IntoIter = IntoValues<String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_values()
    }
}

impl<'a> IntoIterator for &'a TableRegistry {
    type Item = &'a Table;
    type IntoIter = Values<'a, String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.values()
    }
}
