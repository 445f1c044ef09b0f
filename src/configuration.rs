//! Per-file and per-folder configuration records.
//!
//! A [`SourceFileConfiguration`] is computed from one database entry. Every
//! file configuration is then offered to each workspace folder's
//! [`WorkspaceBrowseConfiguration`], which keeps the union of include paths
//! and compiler arguments plus the most recently seen compiler and standard.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::classifier::classify;
use crate::database::CompileCommandEntry;
use crate::resolver::{IntelliSenseMode, StandardId, resolve_intellisense_mode, resolve_standard};

/// Architecture and platform labels the configurations are built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    /// Free text; only the literal `x86` is treated specially.
    pub architecture: String,
    /// Carried through for hosts, not consulted by resolution.
    pub platform: String,
}

impl BuildTarget {
    pub fn new(architecture: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            architecture: architecture.into(),
            platform: platform.into(),
        }
    }
}

/// IntelliSense configuration for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFileConfiguration {
    pub include_path: Vec<String>,
    pub defines: Vec<String>,
    pub intelli_sense_mode: IntelliSenseMode,
    pub standard: StandardId,
    pub compiler_path: String,
    pub compiler_args: Vec<String>,
}

impl SourceFileConfiguration {
    /// Classify the entry and resolve its standard and IntelliSense mode.
    pub fn from_entry(entry: &CompileCommandEntry, target: &BuildTarget) -> Self {
        let classified = classify(entry);
        Self {
            include_path: classified.include_paths,
            defines: classified.defines,
            intelli_sense_mode: resolve_intellisense_mode(
                entry.compiler_base_name(),
                &target.architecture,
            ),
            standard: resolve_standard(classified.standard.as_deref()),
            compiler_path: classified.compiler_path,
            compiler_args: classified.compiler_args,
        }
    }
}

/// A file configuration paired with the file it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileConfigurationItem {
    pub uri: PathBuf,
    pub configuration: SourceFileConfiguration,
}

/// Aggregated browse data for one workspace folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceBrowseConfiguration {
    /// Union of attributed include paths, first-seen order.
    pub browse_path: IndexSet<String>,
    /// Union of attributed compiler arguments, first-seen order.
    pub compiler_args: IndexSet<String>,
    /// Compiler of the last attributed file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_path: Option<String>,
    /// Standard of the last attributed file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<StandardId>,
}

impl WorkspaceBrowseConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's configuration into the aggregate.
    pub fn fold(&mut self, configuration: &SourceFileConfiguration) {
        self.browse_path
            .extend(configuration.include_path.iter().cloned());
        self.compiler_args
            .extend(configuration.compiler_args.iter().cloned());
        self.compiler_path = Some(configuration.compiler_path.clone());
        self.standard = Some(configuration.standard);
    }

    pub fn clear(&mut self) {
        self.browse_path.clear();
        self.compiler_args.clear();
        self.compiler_path = None;
        self.standard = None;
    }

    pub fn is_empty(&self) -> bool {
        self.browse_path.is_empty()
            && self.compiler_args.is_empty()
            && self.compiler_path.is_none()
            && self.standard.is_none()
    }
}

/// Whether a file contributes to a folder's browse configuration.
///
/// The test computes the relative path *from the file to the folder* and
/// accepts it when the result starts with `.`. For absolute paths on the
/// same root that holds for every folder except the file itself and paths
/// nested below the file. Paths with different roots (e.g. two Windows
/// drives) have no relative form and are rejected.
pub fn is_attributed(file: &Path, folder: &Path) -> bool {
    match relative_path(file, folder) {
        Some(relative) => relative.starts_with('.'),
        None => false,
    }
}

/// Lexical relative path from `from` to `to`.
///
/// Both paths are normalized (`.` dropped, `..` folded) before comparison.
/// Returns `None` when the paths share no leading component, and an empty
/// string when they are equal.
pub fn relative_path(from: &Path, to: &Path) -> Option<String> {
    let from = normalize_lexically(from);
    let to = normalize_lexically(to);

    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && !(from_parts.is_empty() && to_parts.is_empty()) {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[common..] {
        relative.push(part.as_os_str());
    }
    Some(relative.to_string_lossy().into_owned())
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
