//! CLI module for the nested-schema binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
