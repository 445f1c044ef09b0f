//! The read surface an IDE host queries.

use std::path::{Path, PathBuf};

use crate::configuration::{SourceFileConfigurationItem, WorkspaceBrowseConfiguration};

use super::ConfigurationIndex;

/// Queries a code-intelligence host issues against the index.
///
/// None of these fail: unknown files are omitted and unknown folders come
/// back as `None`.
pub trait ConfigurationProvider {
    /// True iff `path` is an indexed source file (exact key match).
    fn can_provide_configuration(&self, path: &Path) -> bool;

    /// Configurations for the indexed paths among `paths`, in input order.
    fn provide_configurations(&self, paths: &[PathBuf]) -> Vec<SourceFileConfigurationItem>;

    /// True iff at least one workspace folder is tracked.
    fn can_provide_browse_configuration(&self) -> bool;

    /// Aggregate of the primary (first registered) workspace folder.
    fn provide_browse_configuration(&self) -> Option<WorkspaceBrowseConfiguration>;

    /// Aggregate for exactly `folder`, if it is tracked.
    fn provide_folder_browse_configuration(
        &self,
        folder: &Path,
    ) -> Option<WorkspaceBrowseConfiguration>;
}

impl ConfigurationProvider for ConfigurationIndex {
    fn can_provide_configuration(&self, path: &Path) -> bool {
        self.contains_file(path)
    }

    fn provide_configurations(&self, paths: &[PathBuf]) -> Vec<SourceFileConfigurationItem> {
        self.files_for(paths)
    }

    fn can_provide_browse_configuration(&self) -> bool {
        self.has_folders()
    }

    fn provide_browse_configuration(&self) -> Option<WorkspaceBrowseConfiguration> {
        self.primary_folder()
            .and_then(|folder| self.folder(folder))
            .cloned()
    }

    fn provide_folder_browse_configuration(
        &self,
        folder: &Path,
    ) -> Option<WorkspaceBrowseConfiguration> {
        self.folder(folder).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::BuildTarget;
    use crate::database::{CompileCommandEntry, CompileCommandsDatabase};

    fn indexed(folders: &[&str]) -> ConfigurationIndex {
        let mut index = ConfigurationIndex::new(folders.iter().map(PathBuf::from));
        let db = CompileCommandsDatabase::from_entries([CompileCommandEntry {
            directory: PathBuf::from("/ws/app"),
            file: PathBuf::from("main.cpp"),
            arguments: vec!["sh".into(), "clang".into(), "-Iinc".into()],
        }]);
        index.rebuild(&db, &BuildTarget::new("x64", "linux"));
        index
    }

    #[test]
    fn test_file_queries() {
        let index = indexed(&["/ws/app"]);

        assert!(index.can_provide_configuration(Path::new("/ws/app/main.cpp")));
        assert!(!index.can_provide_configuration(Path::new("main.cpp")));
        assert!(index.provide_configurations(&[PathBuf::from("/nope.c")]).is_empty());
    }

    #[test]
    fn test_browse_queries_use_primary_folder() {
        let index = indexed(&["/ws/app", "/ws/lib"]);

        assert!(index.can_provide_browse_configuration());
        let primary = index.provide_browse_configuration().unwrap();
        assert!(primary.browse_path.contains("/ws/app/inc"));
        assert!(index.provide_folder_browse_configuration(Path::new("/ws/lib")).is_some());
        assert!(index.provide_folder_browse_configuration(Path::new("/ws/other")).is_none());
    }

    #[test]
    fn test_no_folders_means_no_browse_configuration() {
        let index = indexed(&[]);

        assert!(!index.can_provide_browse_configuration());
        assert!(index.provide_browse_configuration().is_none());
        // File queries still work without folders
        assert!(index.can_provide_configuration(Path::new("/ws/app/main.cpp")));
    }

    #[test]
    fn test_empty_folder_is_still_provided() {
        let index = ConfigurationIndex::new([PathBuf::from("/ws/app")]);

        assert!(index.can_provide_browse_configuration());
        assert_eq!(
            index.provide_browse_configuration(),
            Some(WorkspaceBrowseConfiguration::default())
        );
    }
}
