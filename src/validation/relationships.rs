//! Relationship analysis for a finished schema
//!
//! Builds a directed graph of foreign keys (referencing table → referenced table) and
//! answers ordering and cycle questions on it. Self-references are reported separately;
//! they do not block dependency ordering because a table can reference itself in its
//! own definition.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::registry::TableRegistry;

/// Result of relationship validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipValidationResult {
    /// Groups of tables that reference each other in a cycle
    pub circular_dependencies: Vec<Vec<String>>,
    /// Foreign keys that point at their own table
    pub self_references: Vec<SelfReference>,
}

impl RelationshipValidationResult {
    pub fn is_acyclic(&self) -> bool {
        self.circular_dependencies.is_empty()
    }
}

/// Self-reference detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfReference {
    pub table: String,
    pub column: String,
}

/// Error during relationship validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationshipValidationError {
    #[error("Circular foreign key dependency involving table {0}")]
    CircularDependency(String),
}

/// Foreign key graph of a registry
pub struct RelationshipGraph<'a> {
    graph: DiGraph<&'a str, &'a str>,
    self_references: Vec<SelfReference>,
}

impl<'a> RelationshipGraph<'a> {
    pub fn from_registry(registry: &'a TableRegistry) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for table in registry {
            nodes.insert(table.name.as_str(), graph.add_node(table.name.as_str()));
        }

        let mut self_references = Vec::new();
        for table in registry {
            for column in table.foreign_keys() {
                let Some(target) = &column.foreign_key else {
                    continue;
                };
                if target.table == table.name {
                    self_references.push(SelfReference {
                        table: table.name.clone(),
                        column: column.name.clone(),
                    });
                    continue;
                }
                // Dangling targets are skipped; the builder only emits known ones.
                if let (Some(&from), Some(&to)) =
                    (nodes.get(table.name.as_str()), nodes.get(target.table.as_str()))
                {
                    graph.add_edge(from, to, column.name.as_str());
                }
            }
        }

        Self {
            graph,
            self_references,
        }
    }

    /// Tables ordered so that every referenced table precedes the tables referencing it
    pub fn dependency_order(&self) -> Result<Vec<&'a str>, RelationshipValidationError> {
        let sorted = toposort(&self.graph, None).map_err(|cycle| {
            RelationshipValidationError::CircularDependency(self.graph[cycle.node_id()].to_string())
        })?;
        // Edges point from referencing to referenced, so reverse the topological order.
        Ok(sorted.into_iter().rev().map(|idx| self.graph[idx]).collect())
    }

    /// Strongly connected groups with more than one table, members in registry order
    pub fn circular_dependencies(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|mut component| {
                component.sort();
                component
                    .into_iter()
                    .map(|idx| self.graph[idx].to_string())
                    .collect()
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub fn self_references(&self) -> &[SelfReference] {
        &self.self_references
    }

    pub fn validate(&self) -> RelationshipValidationResult {
        RelationshipValidationResult {
            circular_dependencies: self.circular_dependencies(),
            self_references: self.self_references.clone(),
        }
    }
}
