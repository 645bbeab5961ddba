//! Definition tree: the nested input consumed by the schema builder

use indexmap::IndexMap;

/// Leaf column declaration: just the textual type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub type_name: String,
}

impl ColumnSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// Value of one entry in a definition's column map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// Ordinary column
    Column(ColumnSpec),
    /// Nested has-many child table
    Table(TableDefinition),
}

/// One node of the definition graph
///
/// A definition with no columns and no primary key is a reference: it names a table
/// defined elsewhere (or one that is still under construction higher up the tree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: IndexMap<String, ColumnValue>,
    pub primary_key: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Shape<'a> {
    Column(&'a str, &'a str),
    Table(&'a str, &'a str),
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            primary_key: None,
        }
    }

    /// Reference to a table by name only
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Append an ordinary column
    pub fn with_column(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.columns
            .insert(name.into(), ColumnValue::Column(ColumnSpec::new(type_name)));
        self
    }

    /// Append a nested child table
    pub fn with_child(mut self, name: impl Into<String>, child: TableDefinition) -> Self {
        self.columns.insert(name.into(), ColumnValue::Table(child));
        self
    }

    /// Designate an entry of the column map as the primary key
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    pub fn is_reference(&self) -> bool {
        self.columns.is_empty() && self.primary_key.is_none()
    }

    /// Nested child definitions in declaration order
    pub fn children(&self) -> impl Iterator<Item = (&str, &TableDefinition)> {
        self.columns.iter().filter_map(|(name, value)| match value {
            ColumnValue::Table(child) => Some((name.as_str(), child)),
            ColumnValue::Column(_) => None,
        })
    }

    /// Ordinary columns in declaration order, the primary key entry excluded
    pub fn plain_columns(&self) -> impl Iterator<Item = (&str, &ColumnSpec)> {
        self.columns.iter().filter_map(|(name, value)| match value {
            ColumnValue::Column(spec) if self.primary_key.as_deref() != Some(name.as_str()) => {
                Some((name.as_str(), spec))
            }
            _ => None,
        })
    }

    /// Whether two definitions declare the same columns, types, children and key.
    ///
    /// Children are compared by table name only.
    pub fn same_shape(&self, other: &TableDefinition) -> bool {
        self.name == other.name
            && self.primary_key == other.primary_key
            && self.shape() == other.shape()
    }

    fn shape(&self) -> Vec<Shape<'_>> {
        self.columns
            .iter()
            .map(|(name, value)| match value {
                ColumnValue::Column(spec) => Shape::Column(name, &spec.type_name),
                ColumnValue::Table(child) => Shape::Table(name, &child.name),
            })
            .collect()
    }
}
