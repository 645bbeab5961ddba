//! Schema graph builder
//!
//! Walks a definition graph depth-first and fills a [`TableRegistry`]. The graph may
//! reference the same table name from several places, including itself; the registry
//! is consulted at the top of every step, so each name is constructed once.
//!
//! Per table the construction runs through these states:
//!
//! ```text
//! Unseen -> PrimaryKeyResolved -> Registered -> ColumnsPopulated
//! ```
//!
//! A table is registered before its columns are populated. Nested children that refer
//! back to it (directly or through a longer cycle) find it in the registry and can
//! reference its primary key while it is still incomplete.
//!
//! A reference to a name nobody has defined yet registers a pending placeholder. The
//! first full definition of that name completes it instead of counting as a conflict.
//!
//! ## Example
//!
//! ```rust
//! use nested_schema::builder::SchemaBuilder;
//! use nested_schema::models::TableDefinition;
//!
//! let people = TableDefinition::new("people")
//!     .with_column("firstName", "String")
//!     .with_child(
//!         "inventory",
//!         TableDefinition::new("items").with_column("description", "String"),
//!     );
//!
//! let registry = SchemaBuilder::new().build_all(&[people]).unwrap();
//! let items = registry.get("items").unwrap();
//! assert_eq!(items.column_names(), vec!["id", "description", "people_id"]);
//! ```

mod config;

use std::collections::HashMap;

use tracing::{debug, info, warn};

pub use config::{BuilderConfig, BuilderConfigBuilder, ConflictPolicy};

use crate::error::SchemaError;
use crate::models::{Column, ColumnValue, ForeignKey, Table, TableDefinition};
use crate::registry::TableRegistry;
use crate::types::{ColumnType, TypeCatalog};

/// Definitions that started construction during the current call, by table name
type SeenDefinitions<'a> = HashMap<&'a str, &'a TableDefinition>;

/// Builds relational tables from nested table definitions
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    config: BuilderConfig,
    catalog: TypeCatalog,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Create a builder with default configuration and the standard type catalog
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Create a builder with custom configuration
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            catalog: TypeCatalog::standard().clone(),
        }
    }

    /// Replace the type catalog used to resolve column types
    pub fn with_catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build `root` and everything reachable from it into `registry`.
    ///
    /// Tables already in the registry are not constructed again. On error the registry
    /// is left exactly as it was passed in.
    pub fn build(
        &self,
        root: &TableDefinition,
        registry: &mut TableRegistry,
    ) -> Result<(), SchemaError> {
        let mut staged = registry.clone();
        let mut seen = SeenDefinitions::new();
        self.construct_table(root, &mut staged, &mut seen, 0)?;
        *registry = staged;
        Ok(())
    }

    /// Build a forest of root definitions into a fresh registry
    pub fn build_all(&self, roots: &[TableDefinition]) -> Result<TableRegistry, SchemaError> {
        let mut registry = TableRegistry::new();
        let mut seen = SeenDefinitions::new();
        for root in roots {
            self.construct_table(root, &mut registry, &mut seen, 0)?;
        }
        info!(
            "Built {} tables from {} root definitions",
            registry.len(),
            roots.len()
        );
        if !registry.pending().is_empty() {
            warn!(
                "Referenced tables without a definition: {}",
                registry.pending().join(", ")
            );
        }
        Ok(registry)
    }

    fn construct_table<'a>(
        &self,
        definition: &'a TableDefinition,
        registry: &mut TableRegistry,
        seen: &mut SeenDefinitions<'a>,
        depth: usize,
    ) -> Result<(), SchemaError> {
        let name = definition.name.as_str();

        // Cycle breaking and de-duplication: the first traversal to reach a name wins.
        if registry.contains(name) {
            if registry.is_pending(name) && !definition.is_reference() {
                return self.complete_table(definition, registry, seen, depth);
            }
            self.check_conflict(definition, registry, seen)?;
            debug!("Table {} already constructed, skipping", name);
            return Ok(());
        }

        self.check_depth(name, depth)?;

        // Only a name is known; hold the slot until a full definition shows up.
        if definition.is_reference() {
            registry.register(Table::new(name, self.default_primary_key()))?;
            registry.mark_pending(name)?;
            debug!("Registered placeholder for referenced table {}", name);
            return Ok(());
        }

        // The key must exist before descending so self-references can target it.
        let primary_key = self.resolve_primary_key(definition)?;
        registry.register(Table::new(name, primary_key))?;
        seen.insert(name, definition);
        debug!("Registered table {} at depth {}", name, depth);

        self.populate_columns(definition, registry, seen, depth)
    }

    /// Turn a placeholder into the full table for `definition`.
    ///
    /// Foreign keys attached to the placeholder by earlier parents are carried over after
    /// the declared columns.
    fn complete_table<'a>(
        &self,
        definition: &'a TableDefinition,
        registry: &mut TableRegistry,
        seen: &mut SeenDefinitions<'a>,
        depth: usize,
    ) -> Result<(), SchemaError> {
        let name = definition.name.as_str();
        self.check_depth(name, depth)?;

        let primary_key = self.resolve_primary_key(definition)?;
        let placeholder = registry.complete(Table::new(name, primary_key))?;
        seen.insert(name, definition);
        debug!("Completed referenced table {} at depth {}", name, depth);

        self.populate_columns(definition, registry, seen, depth)?;

        let table = registry.get_mut(name)?;
        for column in placeholder.foreign_keys() {
            if table.column(&column.name) == Some(column) {
                continue;
            }
            table.append_column(column.clone())?;
        }
        Ok(())
    }

    fn populate_columns<'a>(
        &self,
        definition: &'a TableDefinition,
        registry: &mut TableRegistry,
        seen: &mut SeenDefinitions<'a>,
        depth: usize,
    ) -> Result<(), SchemaError> {
        let key = registry.get(&definition.name)?.primary_key();
        let parent_key = (key.name.clone(), key.column_type);

        for (column_name, value) in &definition.columns {
            if definition.primary_key.as_deref() == Some(column_name.as_str()) {
                continue;
            }
            match value {
                ColumnValue::Column(spec) => {
                    let column_type = self.catalog.resolve(&spec.type_name, column_name)?;
                    registry
                        .get_mut(&definition.name)?
                        .append_column(Column::new(column_name.clone(), column_type))?;
                }
                ColumnValue::Table(child) => {
                    self.construct_table(child, registry, seen, depth + 1)?;
                    self.attach_foreign_key(&definition.name, &parent_key, &child.name, registry)?;
                }
            }
        }

        Ok(())
    }

    fn check_depth(&self, table: &str, depth: usize) -> Result<(), SchemaError> {
        if depth > self.config.max_depth {
            return Err(SchemaError::MaxDepthExceeded {
                table: table.to_string(),
                depth,
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    fn default_primary_key(&self) -> Column {
        Column::primary_key(self.config.default_primary_key.clone(), ColumnType::Integer)
            .autoincrement()
    }

    fn resolve_primary_key(&self, definition: &TableDefinition) -> Result<Column, SchemaError> {
        let Some(key) = &definition.primary_key else {
            return Ok(self.default_primary_key());
        };

        match definition.columns.get(key) {
            Some(ColumnValue::Column(spec)) => {
                let column_type = self.catalog.resolve(&spec.type_name, key)?;
                Ok(Column::primary_key(key.clone(), column_type))
            }
            Some(ColumnValue::Table(_)) => Err(SchemaError::InvalidPrimaryKey {
                table: definition.name.clone(),
                column: key.clone(),
            }),
            None => Err(SchemaError::MissingPrimaryKey {
                table: definition.name.clone(),
                column: key.clone(),
            }),
        }
    }

    /// Add `<parent>_<parentKey>` to the child, referencing the parent's primary key.
    fn attach_foreign_key(
        &self,
        parent: &str,
        parent_key: &(String, ColumnType),
        child: &str,
        registry: &mut TableRegistry,
    ) -> Result<(), SchemaError> {
        let (key_name, key_type) = parent_key;
        let column_name = format!("{}_{}", parent, key_name);
        let target = ForeignKey::new(parent, key_name.as_str());

        let child_table = registry.get_mut(child)?;
        if let Some(existing) = child_table.column(&column_name) {
            if existing.foreign_key.as_ref() == Some(&target) {
                debug!("Foreign key {}.{} already present", child, column_name);
                return Ok(());
            }
            return Err(SchemaError::DuplicateColumn {
                table: child.to_string(),
                column: column_name,
            });
        }

        child_table.append_column(Column::foreign_key(column_name.clone(), *key_type, target))?;
        debug!(
            "Added foreign key {}.{} -> {}.{}",
            child, column_name, parent, key_name
        );
        Ok(())
    }

    fn check_conflict(
        &self,
        definition: &TableDefinition,
        registry: &TableRegistry,
        seen: &SeenDefinitions<'_>,
    ) -> Result<(), SchemaError> {
        if definition.is_reference() {
            return Ok(());
        }

        let consistent = match seen.get(definition.name.as_str()) {
            Some(first) => first.same_shape(definition),
            None => self.matches_table(definition, registry.get(&definition.name)?),
        };
        if consistent {
            return Ok(());
        }

        match self.config.on_conflict {
            ConflictPolicy::KeepExisting => {
                warn!(
                    "Table {} is defined again with different columns; keeping the first definition",
                    definition.name
                );
                Ok(())
            }
            ConflictPolicy::Reject => Err(SchemaError::ConflictingDefinition {
                name: definition.name.clone(),
            }),
        }
    }

    /// Compare a definition against a table finished by an earlier build call.
    ///
    /// Nested children are not compared; they surface as foreign keys on other tables.
    fn matches_table(&self, definition: &TableDefinition, table: &Table) -> bool {
        let key_name = definition
            .primary_key
            .as_deref()
            .unwrap_or(&self.config.default_primary_key);
        if table.primary_key().name != key_name {
            return false;
        }

        let declared: Vec<_> = definition.plain_columns().collect();
        let existing: Vec<&Column> = table
            .columns()
            .iter()
            .skip(1)
            .filter(|c| !c.is_foreign_key())
            .collect();

        declared.len() == existing.len()
            && declared.iter().zip(existing).all(|((name, spec), column)| {
                column.name == *name
                    && self
                        .catalog
                        .resolve(&spec.type_name, name)
                        .is_ok_and(|t| t == column.column_type)
            })
    }
}
