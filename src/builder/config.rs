//! Configuration for the schema builder

use serde::{Deserialize, Serialize};

/// What to do when a definition reuses the name of a table that is already known but
/// declares a different set of columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The first table to claim a name wins; later definitions are ignored with a warning
    #[default]
    KeepExisting,
    /// Fail the build with `SchemaError::ConflictingDefinition`
    Reject,
}

/// Configuration for schema construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BuilderConfig {
    /// Maximum nesting depth below a root definition
    pub max_depth: usize,

    /// Handling of same-name definitions with different columns
    pub on_conflict: ConflictPolicy,

    /// Name of the synthesized primary key when a definition declares none
    pub default_primary_key: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            on_conflict: ConflictPolicy::KeepExisting,
            default_primary_key: "id".to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> BuilderConfigBuilder {
        BuilderConfigBuilder::default()
    }
}

/// Builder for BuilderConfig
#[derive(Debug, Default)]
pub struct BuilderConfigBuilder {
    config: BuilderConfig,
}

impl BuilderConfigBuilder {
    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the name-collision policy
    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.config.on_conflict = policy;
        self
    }

    /// Set the synthesized primary key name
    pub fn default_primary_key(mut self, name: impl Into<String>) -> Self {
        self.config.default_primary_key = name.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> BuilderConfig {
        self.config
    }
}
