//! Error types for compile-commands database loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that prevent a database from being read at all.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Cannot read compile commands database {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compile commands database {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Compile commands database must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
}

/// Why a single record was rejected.
///
/// A malformed record never aborts loading; it is skipped and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("record is not an object (found {found})")]
    NotAnObject { found: &'static str },

    #[error("field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("field '{field}' must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("element {position} of 'arguments' is not a string")]
    NonStringArgument { position: usize },

    #[error("'command' could not be split into arguments")]
    UnsplittableCommand,

    #[error("argument list has {len} element(s), the compiler is expected at position 1")]
    MissingCompiler { len: usize },
}
