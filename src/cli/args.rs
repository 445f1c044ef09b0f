//! CLI argument parsing using clap.
//!
//! Contains the Cli struct, Commands enum, and all subcommand enums.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::config::Settings;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// IntelliSense configuration index for compile_commands.json
#[derive(Parser, Debug)]
#[command(
    name = "ccindex",
    version = env!("CARGO_PKG_VERSION"),
    about = "IntelliSense configuration index for compile_commands.json",
    long_about = "Turn a compile-commands database into per-file and per-folder IntelliSense configurations.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the database and target sections of the settings.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Compile-commands database (overrides config)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Target architecture label, e.g. x86 or x64 (overrides config)
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Target platform label (overrides config)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,
}

impl TargetArgs {
    /// Apply the overrides on top of loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(database) = &self.database {
            settings.database.path = database.clone();
        }
        if let Some(arch) = &self.arch {
            settings.target.architecture = arch.clone();
        }
        if let Some(platform) = &self.platform {
            settings.target.platform = platform.clone();
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .ccindex directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .ccindex/settings.toml")]
    Config,

    /// Build the index once and report what it holds
    #[command(
        about = "Build the index from the database and print a summary",
        after_help = "Examples:\n  ccindex index\n  ccindex index --database build/compile_commands.json --arch x86\n  ccindex index --json"
    )]
    Index {
        #[command(flatten)]
        target: TargetArgs,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Query file or folder configurations
    #[command(
        about = "Print configurations the host would receive",
        after_help = "Examples:\n  ccindex query file src/main.cpp src/util.cpp\n  ccindex query browse\n  ccindex query browse /work/lib"
    )]
    Query {
        #[command(flatten)]
        target: TargetArgs,

        #[command(subcommand)]
        query: QueryKind,
    },

    /// Serve the host protocol on stdio
    #[command(
        about = "Answer line-delimited JSON requests on stdin/stdout",
        after_help = "Methods:\n  canProvideConfiguration        {\"uri\": PATH}\n  provideConfigurations          {\"uris\": [PATH]}\n  canProvideBrowseConfiguration\n  provideBrowseConfiguration\n  provideFolderBrowseConfiguration {\"folder\": PATH}\n  rebuild"
    )]
    Serve {
        #[command(flatten)]
        target: TargetArgs,

        /// Rebuild automatically when the database changes
        #[arg(long)]
        watch: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryKind {
    /// Configurations for specific source files
    File {
        /// Source files (relative paths are resolved against the cwd)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Browse configuration of a folder (primary folder when omitted)
    Browse {
        /// Workspace folder
        folder: Option<PathBuf>,
    },
}
