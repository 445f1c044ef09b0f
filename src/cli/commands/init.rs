//! Init and Config commands.

use anyhow::{Result, anyhow};

use crate::config::Settings;

/// Run init command - create `.ccindex/settings.toml` in the current directory.
pub fn run_init(force: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let path = Settings::init_config_file(&root, force).map_err(|e| anyhow!("{e}"))?;

    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to register workspace folders and the database path.");
    Ok(())
}

/// Run config command - display current configuration.
pub fn run_config(settings: &Settings) -> Result<()> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    println!("{}", toml::to_string_pretty(settings)?);
    println!("Resolved folders:");
    for folder in settings.workspace_folders() {
        println!("  - {}", folder.display());
    }
    println!("Resolved database: {}", settings.database_path().display());
    Ok(())
}
