//! Compile-commands database input.
//!
//! The database is a JSON array with one record per compiled source file.
//! Records are validated one by one into [`ParsedRecord`]; a bad record only
//! affects itself, while an unreadable file or a non-array document fails the
//! whole load with [`DatabaseError`].

mod entry;
mod error;

pub use entry::{CompileCommandEntry, ParsedRecord};
pub use error::{DatabaseError, MalformedReason};

pub(crate) use entry::absolutize;

use serde_json::Value;
use std::path::Path;

/// Conventional file name written by CMake, xmake, bear and friends.
pub const DEFAULT_DATABASE_FILE: &str = "compile_commands.json";

/// A parsed database: every record in file order, valid or not.
#[derive(Debug, Clone, Default)]
pub struct CompileCommandsDatabase {
    records: Vec<ParsedRecord>,
}

impl CompileCommandsDatabase {
    /// Read and validate a database file.
    pub fn load(path: &Path) -> Result<Self, DatabaseError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatabaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| DatabaseError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(&value)
    }

    /// Validate an already-parsed JSON document.
    pub fn from_value(value: &Value) -> Result<Self, DatabaseError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Object(_) => return Err(DatabaseError::NotAnArray { found: "an object" }),
            Value::String(_) => return Err(DatabaseError::NotAnArray { found: "a string" }),
            Value::Number(_) => return Err(DatabaseError::NotAnArray { found: "a number" }),
            Value::Bool(_) => return Err(DatabaseError::NotAnArray { found: "a boolean" }),
            Value::Null => return Err(DatabaseError::NotAnArray { found: "null" }),
        };
        Ok(Self {
            records: items.iter().map(ParsedRecord::from_value).collect(),
        })
    }

    /// Build a database from in-memory entries. Entries without a compiler
    /// position become malformed records.
    pub fn from_entries(entries: impl IntoIterator<Item = CompileCommandEntry>) -> Self {
        Self {
            records: entries.into_iter().map(ParsedRecord::from_entry).collect(),
        }
    }

    pub fn records(&self) -> &[ParsedRecord] {
        &self.records
    }

    /// Valid entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = &CompileCommandEntry> {
        self.records.iter().filter_map(|record| match record {
            ParsedRecord::Valid(entry) => Some(entry),
            ParsedRecord::Malformed(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
