//! The configuration store: per-file map plus per-folder aggregates.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::configuration::{
    BuildTarget, SourceFileConfiguration, SourceFileConfigurationItem,
    WorkspaceBrowseConfiguration, is_attributed,
};
use crate::database::{CompileCommandsDatabase, ParsedRecord};
use crate::{debug_event, log_event};

/// Counters reported by a rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RebuildStats {
    /// Records in the database, valid or not.
    pub records: usize,
    /// Malformed records that were skipped.
    pub skipped: usize,
    /// Distinct source files in the index afterwards.
    pub files: usize,
    /// Valid entries that replaced an earlier entry for the same file.
    pub replaced: usize,
}

/// In-memory IntelliSense index.
///
/// Workspace folders are registered at construction and keep an aggregate
/// (possibly empty) for the lifetime of the index. The first registered
/// folder is the primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationIndex {
    files: HashMap<PathBuf, SourceFileConfiguration>,
    folders: IndexMap<PathBuf, WorkspaceBrowseConfiguration>,
}

impl ConfigurationIndex {
    /// Create an empty index tracking the given workspace folders.
    pub fn new(folders: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: HashMap::new(),
            folders: folders
                .into_iter()
                .map(|folder| (folder, WorkspaceBrowseConfiguration::new()))
                .collect(),
        }
    }

    /// Clear every file configuration and folder aggregate, then repopulate
    /// them from `database`.
    ///
    /// The last entry for a given file wins in the per-file map. Folder
    /// aggregates see every valid entry in order, so duplicates still fold
    /// their include paths and arguments.
    pub fn rebuild(&mut self, database: &CompileCommandsDatabase, target: &BuildTarget) -> RebuildStats {
        self.clear();

        let mut stats = RebuildStats {
            records: database.len(),
            ..RebuildStats::default()
        };

        for (position, record) in database.records().iter().enumerate() {
            let entry = match record {
                ParsedRecord::Valid(entry) => entry,
                ParsedRecord::Malformed(reason) => {
                    tracing::warn!("[index] skipping record {position}: {reason}");
                    stats.skipped += 1;
                    continue;
                }
            };

            let file = entry.absolute_file();
            let configuration = SourceFileConfiguration::from_entry(entry, target);
            debug_event!(
                "index",
                "classified",
                "{} ({}, {})",
                file.display(),
                configuration.standard,
                configuration.intelli_sense_mode
            );

            for (folder, browse) in self.folders.iter_mut() {
                if is_attributed(&file, folder) {
                    browse.fold(&configuration);
                }
            }

            if self.files.insert(file, configuration).is_some() {
                stats.replaced += 1;
            }
        }

        stats.files = self.files.len();
        log_event!(
            "index",
            "rebuilt",
            "{} files from {} records ({} skipped)",
            stats.files,
            stats.records,
            stats.skipped
        );
        stats
    }

    /// Drop all file configurations and empty every folder aggregate.
    /// Registered folders stay registered.
    pub fn clear(&mut self) {
        self.files.clear();
        for browse in self.folders.values_mut() {
            browse.clear();
        }
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFileConfiguration> {
        self.files.get(path)
    }

    /// Configurations for the known paths among `paths`, in input order.
    pub fn files_for(&self, paths: &[PathBuf]) -> Vec<SourceFileConfigurationItem> {
        paths
            .iter()
            .filter_map(|path| {
                self.files.get(path).map(|configuration| SourceFileConfigurationItem {
                    uri: path.clone(),
                    configuration: configuration.clone(),
                })
            })
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn has_folders(&self) -> bool {
        !self.folders.is_empty()
    }

    pub fn primary_folder(&self) -> Option<&Path> {
        self.folders.keys().next().map(PathBuf::as_path)
    }

    pub fn folder(&self, folder: &Path) -> Option<&WorkspaceBrowseConfiguration> {
        self.folders.get(folder)
    }

    /// Registered folders with their aggregates, in registration order.
    pub fn folders(&self) -> impl Iterator<Item = (&Path, &WorkspaceBrowseConfiguration)> {
        self.folders.iter().map(|(path, browse)| (path.as_path(), browse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::CompileCommandEntry;
    use crate::resolver::StandardId;
    use serde_json::json;

    fn entry(file: &str, arguments: &[&str]) -> CompileCommandEntry {
        CompileCommandEntry {
            directory: PathBuf::from("/work/proj"),
            file: PathBuf::from(file),
            arguments: arguments.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn target() -> BuildTarget {
        BuildTarget::new("x64", "linux")
    }

    #[test]
    fn test_new_index_tracks_empty_folders() {
        let index = ConfigurationIndex::new([PathBuf::from("/work/proj"), PathBuf::from("/work/lib")]);

        assert!(index.has_folders());
        assert_eq!(index.primary_folder(), Some(Path::new("/work/proj")));
        assert!(index.folder(Path::new("/work/lib")).unwrap().is_empty());
        assert_eq!(index.file_count(), 0);
    }

    #[test]
    fn test_rebuild_keys_files_by_absolute_path() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        let db = CompileCommandsDatabase::from_entries([
            entry("src/a.cpp", &["sh", "g++", "-Iinclude"]),
            entry("/elsewhere/b.c", &["sh", "gcc", "-std=c99"]),
        ]);

        let stats = index.rebuild(&db, &target());

        assert_eq!(stats.files, 2);
        assert!(index.contains_file(Path::new("/work/proj/src/a.cpp")));
        assert!(index.contains_file(Path::new("/elsewhere/b.c")));
        assert!(!index.contains_file(Path::new("src/a.cpp")));
        assert_eq!(
            index.file(Path::new("/work/proj/src/a.cpp")).unwrap().include_path,
            vec!["/work/proj/include"]
        );
    }

    #[test]
    fn test_later_entry_for_same_file_wins() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        let db = CompileCommandsDatabase::from_entries([
            entry("a.cpp", &["sh", "g++", "-DFIRST", "-I/one"]),
            entry("/work/proj/a.cpp", &["sh", "g++", "-DSECOND", "-I/two"]),
        ]);

        let stats = index.rebuild(&db, &target());

        assert_eq!(stats.files, 1);
        assert_eq!(stats.replaced, 1);
        let config = index.file(Path::new("/work/proj/a.cpp")).unwrap();
        assert_eq!(config.defines, vec!["SECOND"]);

        // Both entries were folded before the second replaced the first
        let browse = index.folder(Path::new("/work/proj")).unwrap();
        assert_eq!(browse.browse_path.len(), 2);
    }

    #[test]
    fn test_rebuild_clears_previous_state() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        index.rebuild(
            &CompileCommandsDatabase::from_entries([entry("old.cpp", &["sh", "g++", "-I/old"])]),
            &target(),
        );
        index.rebuild(
            &CompileCommandsDatabase::from_entries([entry("new.cpp", &["sh", "g++", "-I/new"])]),
            &target(),
        );

        assert!(!index.contains_file(Path::new("/work/proj/old.cpp")));
        assert!(index.contains_file(Path::new("/work/proj/new.cpp")));
        let browse = index.folder(Path::new("/work/proj")).unwrap();
        assert!(browse.browse_path.contains("/new"));
        assert!(!browse.browse_path.contains("/old"));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        let db = CompileCommandsDatabase::from_value(&json!([
            {"directory": "/work/proj", "file": "a.c", "arguments": ["sh", "gcc"]},
            {"directory": "/work/proj", "file": "b.c", "arguments": [1, 2]},
            {"directory": ["/work/proj"], "file": "c.c", "arguments": ["sh", "gcc"]}
        ]))
        .unwrap();

        let stats = index.rebuild(&db, &target());

        assert_eq!(stats.records, 3);
        assert_eq!(stats.skipped, 2);
        assert_eq!(index.file_count(), 1);
        assert!(index.contains_file(Path::new("/work/proj/a.c")));
    }

    #[test]
    fn test_entries_without_compiler_are_skipped() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        let db = CompileCommandsDatabase::from_entries([
            entry("short.c", &["sh"]),
            entry("empty.c", &[]),
            entry("ok.c", &["sh", "/usr/bin/gcc", "-Wall"]),
        ]);

        let stats = index.rebuild(&db, &target());

        assert_eq!(stats.records, 3);
        assert_eq!(stats.skipped, 2);
        assert!(!index.contains_file(Path::new("/work/proj/short.c")));
        assert!(index.contains_file(Path::new("/work/proj/ok.c")));
        let browse = index.folder(Path::new("/work/proj")).unwrap();
        assert_eq!(browse.compiler_path.as_deref(), Some("/usr/bin/gcc"));
    }

    #[test]
    fn test_folder_aggregates_last_write_wins() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        let db = CompileCommandsDatabase::from_entries([
            entry("a.c", &["sh", "/usr/bin/gcc", "-std=c11", "-Wall"]),
            entry("b.cpp", &["sh", "/usr/bin/clang++", "-std=c++17", "-Wall", "-g"]),
        ]);

        index.rebuild(&db, &target());

        let browse = index.folder(Path::new("/work/proj")).unwrap();
        assert_eq!(browse.compiler_path.as_deref(), Some("/usr/bin/clang++"));
        assert_eq!(browse.standard, Some(StandardId::CPP17));
        assert_eq!(browse.compiler_args.len(), 2);
    }

    #[test]
    fn test_files_for_preserves_order_and_drops_unknown() {
        let mut index = ConfigurationIndex::new([PathBuf::from("/work/proj")]);
        index.rebuild(
            &CompileCommandsDatabase::from_entries([
                entry("a.c", &["sh", "gcc"]),
                entry("b.c", &["sh", "gcc"]),
            ]),
            &target(),
        );

        let items = index.files_for(&[
            PathBuf::from("/work/proj/b.c"),
            PathBuf::from("/work/proj/missing.c"),
            PathBuf::from("/work/proj/a.c"),
        ]);

        let uris: Vec<_> = items.iter().map(|item| item.uri.clone()).collect();
        assert_eq!(
            uris,
            vec![PathBuf::from("/work/proj/b.c"), PathBuf::from("/work/proj/a.c")]
        );
    }
}
