//! Configuration module for the IntelliSense index.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.ccindex/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides (applied by the binary)
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CCINDEX_` and use double
//! underscores to separate nested levels:
//! - `CCINDEX_TARGET__ARCHITECTURE=x86` sets `target.architecture`
//! - `CCINDEX_DATABASE__PATH=build/compile_commands.json` sets `database.path`
//! - `CCINDEX_WATCH__DEBOUNCE_MS=1000` sets `watch.debounce_ms`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::configuration::BuildTarget;
use crate::database::{DEFAULT_DATABASE_FILE, absolutize};

/// Directory holding the settings file, searched for from the cwd upwards.
pub const LOCAL_DIR_NAME: &str = ".ccindex";

/// Settings file name inside [`LOCAL_DIR_NAME`].
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

const ENV_PREFIX: &str = "CCINDEX_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .ccindex is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Workspace folders tracked for browse configurations
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Compile-commands database location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Architecture and platform the configurations target
    #[serde(default)]
    pub target: TargetConfig,

    /// Database watcher settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Log levels
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct WorkspaceConfig {
    /// Registered folders. The first one is the primary folder.
    /// Relative entries are resolved against the workspace root.
    #[serde(default)]
    pub folders: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Path to compile_commands.json, relative to the primary folder
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TargetConfig {
    /// Architecture label; only `x86` selects 32-bit IntelliSense modes
    #[serde(default = "default_architecture")]
    pub architecture: String,

    /// Platform label passed through to hosts
    #[serde(default = "default_platform")]
    pub platform: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    /// How long the database must stay quiet before a rebuild
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level for all modules
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `ccindex::watcher = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_FILE)
}
fn default_architecture() -> String {
    "x64".to_string()
}
fn default_platform() -> String {
    std::env::consts::OS.to_string()
}
fn default_debounce_ms() -> u64 {
    300
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            workspace: WorkspaceConfig::default(),
            database: DatabaseConfig::default(),
            target: TargetConfig::default(),
            watch: WatchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            architecture: default_architecture(),
            platform: default_platform(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(LOCAL_DIR_NAME).join(SETTINGS_FILE_NAME));

        Self::load_from(config_path).map(|mut settings| {
            if settings.workspace_root.is_none() {
                settings.workspace_root = Self::workspace_root();
            }
            settings
        })
    }

    /// Load configuration from a specific file, still honoring env overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore separates nested levels, single underscore
            // stays inside field names
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for `.ccindex` from the current
    /// directory up to the filesystem root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(LOCAL_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Get the workspace root directory (where .ccindex is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(LOCAL_DIR_NAME).is_dir())
            .map(Path::to_path_buf)
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `root`
    pub fn init_config_file(root: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(LOCAL_DIR_NAME).join(SETTINGS_FILE_NAME);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let settings = Settings {
            workspace: WorkspaceConfig {
                folders: vec![root.to_path_buf()],
            },
            ..Settings::default()
        };
        settings.save(&config_path)?;

        Ok(config_path)
    }

    /// Base directory for relative folder entries: the workspace root when
    /// known, otherwise the current directory
    fn base_dir(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Workspace folders in registration order.
    ///
    /// Falls back to the workspace root when no folders are configured.
    pub fn workspace_folders(&self) -> Vec<PathBuf> {
        let base = self.base_dir();
        if self.workspace.folders.is_empty() {
            return vec![base];
        }
        self.workspace
            .folders
            .iter()
            .map(|folder| absolutize(&base, folder))
            .collect()
    }

    /// Database location, resolved against the primary folder
    pub fn database_path(&self) -> PathBuf {
        let primary = self
            .workspace_folders()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.base_dir());
        absolutize(&primary, &self.database.path)
    }

    pub fn build_target(&self) -> BuildTarget {
        BuildTarget::new(&self.target.architecture, &self.target.platform)
    }
}
