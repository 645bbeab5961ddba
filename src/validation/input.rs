//! Input validation for identifiers read from definition documents.
//!
//! Table and column names end up as SQL identifiers and as parts of synthesized
//! foreign key names, so they are checked before a definition tree is handed to the
//! builder.

use thiserror::Error;

/// Maximum length for table names
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Maximum length for column names
pub const MAX_COLUMN_NAME_LENGTH: usize = 255;

/// Errors that can occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} contains invalid characters: {reason}")]
    InvalidCharacters { field: &'static str, reason: String },

    /// Input has invalid format
    #[error("{field}: {reason}")]
    InvalidFormat { field: &'static str, reason: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a table name.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - Must start with a letter or underscore
/// - May contain letters, digits, underscores, and hyphens
///
/// # Examples
///
/// ```
/// use nested_schema::validation::input::validate_table_name;
///
/// assert!(validate_table_name("people").is_ok());
/// assert!(validate_table_name("").is_err());
/// assert!(validate_table_name("1people").is_err());
/// ```
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    validate_identifier(name, "table name", MAX_TABLE_NAME_LENGTH)
}

/// Validate a column name. Same rules as [`validate_table_name`].
pub fn validate_column_name(name: &str) -> ValidationResult<()> {
    validate_identifier(name, "column name", MAX_COLUMN_NAME_LENGTH)
}

fn validate_identifier(name: &str, field: &'static str, max: usize) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty(field));
    }

    if name.len() > max {
        return Err(ValidationError::TooLong {
            field,
            max,
            actual: name.len(),
        });
    }

    let first_char = match name.chars().next() {
        Some(c) => c,
        None => return Err(ValidationError::Empty(field)),
    };
    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must start with a letter or underscore".to_string(),
        });
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' {
            return Err(ValidationError::InvalidCharacters {
                field,
                reason: format!("'{}' is not allowed", c),
            });
        }
    }

    Ok(())
}
