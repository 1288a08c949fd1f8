//! Error types for the data-loader crate.
//!
//! Loading is the only fallible stage of the system: once a [`Catalog`]
//! exists, every query against it is infallible.
//!
//! [`Catalog`]: crate::Catalog

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading the movies and ratings tables
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Input file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A CSV record couldn't be read or deserialized
    ///
    /// `line` is the 1-based line in the source file (the header is line 1)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A column required to build the catalog is absent from the header
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Two rows of the movies table share an id
    #[error("Duplicate movieId {id} in movies table")]
    DuplicateMovieId { id: MovieId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
