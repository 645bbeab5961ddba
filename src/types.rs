//! Column type resolution
//!
//! Maps textual type names from a definition document to concrete [`ColumnType`]s.
//! The lookup is a plain name → constructor table; there is no dynamic dispatch on the
//! type name beyond that.
//!
//! Type arguments (e.g. the length of a `String`) are not accepted. A type name is
//! resolved as-is and is case-sensitive.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Concrete column type of a constructed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    String,
    Text,
    Integer,
    SmallInteger,
    BigInteger,
    Boolean,
    Float,
    Numeric,
    Date,
    DateTime,
    Time,
    Interval,
    LargeBinary,
    Json,
}

impl ColumnType {
    /// Generic name of the type
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Text => "Text",
            ColumnType::Integer => "Integer",
            ColumnType::SmallInteger => "SmallInteger",
            ColumnType::BigInteger => "BigInteger",
            ColumnType::Boolean => "Boolean",
            ColumnType::Float => "Float",
            ColumnType::Numeric => "Numeric",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "DateTime",
            ColumnType::Time => "Time",
            ColumnType::Interval => "Interval",
            ColumnType::LargeBinary => "LargeBinary",
            ColumnType::Json => "JSON",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::SmallInteger | ColumnType::BigInteger
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constructor registered for a type name
pub type TypeConstructor = fn() -> ColumnType;

static STANDARD_CATALOG: Lazy<TypeCatalog> = Lazy::new(|| {
    TypeCatalog::empty()
        // Generic names
        .with_type("String", || ColumnType::String)
        .with_type("Unicode", || ColumnType::String)
        .with_type("Text", || ColumnType::Text)
        .with_type("UnicodeText", || ColumnType::Text)
        .with_type("Integer", || ColumnType::Integer)
        .with_type("SmallInteger", || ColumnType::SmallInteger)
        .with_type("BigInteger", || ColumnType::BigInteger)
        .with_type("Boolean", || ColumnType::Boolean)
        .with_type("Float", || ColumnType::Float)
        .with_type("Numeric", || ColumnType::Numeric)
        .with_type("Date", || ColumnType::Date)
        .with_type("DateTime", || ColumnType::DateTime)
        .with_type("Time", || ColumnType::Time)
        .with_type("Interval", || ColumnType::Interval)
        .with_type("LargeBinary", || ColumnType::LargeBinary)
        .with_type("JSON", || ColumnType::Json)
        // SQL spellings
        .with_type("VARCHAR", || ColumnType::String)
        .with_type("CHAR", || ColumnType::String)
        .with_type("TEXT", || ColumnType::Text)
        .with_type("INTEGER", || ColumnType::Integer)
        .with_type("INT", || ColumnType::Integer)
        .with_type("SMALLINT", || ColumnType::SmallInteger)
        .with_type("BIGINT", || ColumnType::BigInteger)
        .with_type("BOOLEAN", || ColumnType::Boolean)
        .with_type("FLOAT", || ColumnType::Float)
        .with_type("REAL", || ColumnType::Float)
        .with_type("NUMERIC", || ColumnType::Numeric)
        .with_type("DECIMAL", || ColumnType::Numeric)
        .with_type("DATE", || ColumnType::Date)
        .with_type("DATETIME", || ColumnType::DateTime)
        .with_type("TIMESTAMP", || ColumnType::DateTime)
        .with_type("TIME", || ColumnType::Time)
        .with_type("BLOB", || ColumnType::LargeBinary)
});

/// Catalog of supported column types, keyed by type name
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    constructors: HashMap<String, TypeConstructor>,
}

impl TypeCatalog {
    /// Catalog with no registered types
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared catalog of the built-in primitive types
    pub fn standard() -> &'static TypeCatalog {
        &STANDARD_CATALOG
    }

    /// Register (or replace) a type name
    pub fn with_type(mut self, name: &str, constructor: TypeConstructor) -> Self {
        self.constructors.insert(name.to_string(), constructor);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Resolve `type_name` for the column `column_name`.
    ///
    /// The column name is only used for diagnostics.
    pub fn resolve(&self, type_name: &str, column_name: &str) -> Result<ColumnType, SchemaError> {
        self.constructors
            .get(type_name)
            .map(|construct| construct())
            .ok_or_else(|| SchemaError::UnknownType {
                type_name: type_name.to_string(),
                column_name: column_name.to_string(),
            })
    }
}
