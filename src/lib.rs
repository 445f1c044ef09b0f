pub mod classifier;
pub mod cli;
pub mod config;
pub mod configuration;
pub mod database;
pub mod host;
pub mod index;
pub mod logging;
pub mod resolver;
pub mod watcher;

pub use classifier::{ClassifiedArgs, CompilerFlavor, classify};
pub use config::Settings;
pub use configuration::{
    BuildTarget, SourceFileConfiguration, SourceFileConfigurationItem,
    WorkspaceBrowseConfiguration,
};
pub use database::{CompileCommandEntry, CompileCommandsDatabase, ParsedRecord};
pub use index::{ConfigurationIndex, ConfigurationProvider, RebuildStats, SharedIndex};
pub use resolver::{IntelliSenseMode, StandardId, resolve_intellisense_mode, resolve_standard};
