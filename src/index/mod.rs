//! IntelliSense configuration index.
//!
//! [`ConfigurationIndex`] owns the per-file configurations and per-folder
//! browse aggregates and is the only writer of them. Hosts read through
//! [`ConfigurationProvider`]. When rebuilds and reads happen on different
//! threads, wrap the index in a [`SharedIndex`].
//!
//! `ConfigurationIndex::rebuild` clears before it repopulates, so a caller
//! that interleaves reads with an in-place rebuild can observe a partial
//! index. `SharedIndex::rebuild` avoids that by swapping in a finished index.

mod provider;
mod shared;
mod store;

pub use provider::ConfigurationProvider;
pub use shared::SharedIndex;
pub use store::{ConfigurationIndex, RebuildStats};
