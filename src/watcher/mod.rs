//! Refresh trigger for the index.
//!
//! Deciding when the database itself is regenerated belongs to the build
//! tool. This module only reacts to the new file:
//!
//! ```text
//! notify (database dir) -> Debouncer -> SharedIndex::refresh_from
//! ```

mod database;
mod debouncer;
mod error;

pub use database::{DatabaseWatcher, is_database_event};
pub use debouncer::Debouncer;
pub use error::WatchError;
