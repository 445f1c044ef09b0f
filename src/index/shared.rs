//! Shared handle used when a watcher rebuilds while a host is reading.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::configuration::{
    BuildTarget, SourceFileConfigurationItem, WorkspaceBrowseConfiguration,
};
use crate::database::{CompileCommandsDatabase, DatabaseError};

use super::{ConfigurationIndex, ConfigurationProvider, RebuildStats};

/// Cloneable, thread-safe wrapper around a [`ConfigurationIndex`].
///
/// `rebuild` builds a fresh index without holding the lock and swaps it in,
/// so readers see either the previous index or the new one, never a
/// half-populated state.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<ConfigurationIndex>>,
}

impl SharedIndex {
    pub fn new(index: ConfigurationIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Rebuild from `database` and atomically replace the current index.
    pub fn rebuild(&self, database: &CompileCommandsDatabase, target: &BuildTarget) -> RebuildStats {
        let folders: Vec<PathBuf> = {
            let current = self.inner.read();
            current.folders().map(|(path, _)| path.to_path_buf()).collect()
        };

        let mut fresh = ConfigurationIndex::new(folders);
        let stats = fresh.rebuild(database, target);
        *self.inner.write() = fresh;
        stats
    }

    /// Load the database at `path` and rebuild from it.
    ///
    /// A database that cannot be read leaves the current index untouched.
    pub fn refresh_from(&self, path: &Path, target: &BuildTarget) -> Result<RebuildStats, DatabaseError> {
        let database = CompileCommandsDatabase::load(path)?;
        Ok(self.rebuild(&database, target))
    }

    /// Run `f` against a read-locked view of the index.
    pub fn read<R>(&self, f: impl FnOnce(&ConfigurationIndex) -> R) -> R {
        f(&self.inner.read())
    }
}

impl ConfigurationProvider for SharedIndex {
    fn can_provide_configuration(&self, path: &Path) -> bool {
        self.inner.read().can_provide_configuration(path)
    }

    fn provide_configurations(&self, paths: &[PathBuf]) -> Vec<SourceFileConfigurationItem> {
        self.inner.read().provide_configurations(paths)
    }

    fn can_provide_browse_configuration(&self) -> bool {
        self.inner.read().can_provide_browse_configuration()
    }

    fn provide_browse_configuration(&self) -> Option<WorkspaceBrowseConfiguration> {
        self.inner.read().provide_browse_configuration()
    }

    fn provide_folder_browse_configuration(
        &self,
        folder: &Path,
    ) -> Option<WorkspaceBrowseConfiguration> {
        self.inner.read().provide_folder_browse_configuration(folder)
    }
}
