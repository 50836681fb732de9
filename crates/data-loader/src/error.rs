//! Error types for the data-loader crate.
//!
//! Everything that can go wrong while reading the seed dataset and building
//! the in-memory store. All of these are fatal at startup.

use thiserror::Error;

/// Errors that can occur while loading the seed dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Seed file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Seed file isn't a JSON array of movies
    ///
    /// `line` and `column` come straight from serde_json so the broken
    /// record can be found in an editor.
    #[error("Parse error at line {line}, column {column} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// Two seed records share an identifier
    #[error("Duplicate movie id: {id}")]
    DuplicateId { id: String },

    /// A seed record violates a data invariant
    #[error("Invalid value for {field} in movie {id}: {reason}")]
    InvalidValue {
        id: String,
        field: String,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
