//! Index command: rebuild once and summarize.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Settings;
use crate::database::CompileCommandsDatabase;
use crate::index::{ConfigurationIndex, RebuildStats};

#[derive(Debug, Serialize)]
struct FolderSummary {
    folder: PathBuf,
    browse_paths: usize,
    compiler_args: usize,
    compiler_path: Option<String>,
    standard: Option<String>,
}

#[derive(Debug, Serialize)]
struct IndexSummary {
    database: PathBuf,
    architecture: String,
    platform: String,
    stats: RebuildStats,
    folders: Vec<FolderSummary>,
}

/// Load the configured database and build a fresh index from it.
pub fn build_index(settings: &Settings) -> Result<(ConfigurationIndex, RebuildStats)> {
    let database_path = settings.database_path();
    let database = CompileCommandsDatabase::load(&database_path)
        .with_context(|| format!("loading {}", database_path.display()))?;

    let mut index = ConfigurationIndex::new(settings.workspace_folders());
    let stats = index.rebuild(&database, &settings.build_target());
    Ok((index, stats))
}

pub fn run(settings: &Settings, json: bool) -> Result<()> {
    let (index, stats) = build_index(settings)?;

    let summary = IndexSummary {
        database: settings.database_path(),
        architecture: settings.target.architecture.clone(),
        platform: settings.target.platform.clone(),
        stats,
        folders: index
            .folders()
            .map(|(folder, browse)| FolderSummary {
                folder: folder.to_path_buf(),
                browse_paths: browse.browse_path.len(),
                compiler_args: browse.compiler_args.len(),
                compiler_path: browse.compiler_path.clone(),
                standard: browse.standard.map(|s| s.to_string()),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Indexed {} from {}", plural(stats.files, "file"), summary.database.display());
    println!(
        "  records: {}, skipped: {}, replaced: {}",
        stats.records, stats.skipped, stats.replaced
    );
    println!("  target: {} / {}", summary.architecture, summary.platform);
    for folder in &summary.folders {
        println!(
            "  {}: {}, {}, standard {}",
            folder.folder.display(),
            plural(folder.browse_paths, "browse path"),
            plural(folder.compiler_args, "compiler arg"),
            folder.standard.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
