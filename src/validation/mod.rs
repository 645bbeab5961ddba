//! Validation functionality
//!
//! Provides validation logic for:
//! - Identifier validation of imported definitions
//! - Relationship analysis of a built schema (dependency order, circular references)

pub mod input;
pub mod relationships;

pub use input::ValidationError;
pub use relationships::{
    RelationshipGraph, RelationshipValidationError, RelationshipValidationResult,
};
