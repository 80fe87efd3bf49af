//! Error types for the data-loader crate.
//!
//! Every variant here is fatal at startup: a catalog that failed to load
//! must never be handed to the recommendation engine.

use thiserror::Error;

/// Errors that can occur while reading the raw tables and building the catalog
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The header row of a table lacks a column we depend on
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Row in a data file couldn't be parsed
    ///
    /// `line` is the 1-based line number reported by the CSV reader
    /// (the header is line 1).
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
