//! Query command: answer host queries from the command line.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::QueryKind;
use crate::config::Settings;
use crate::index::ConfigurationProvider;

use super::index::build_index;

pub fn run(settings: &Settings, query: &QueryKind) -> Result<()> {
    let (index, _) = build_index(settings)?;

    match query {
        QueryKind::File { paths } => {
            let paths = paths
                .iter()
                .map(|path| absolute(path))
                .collect::<Result<Vec<_>>>()?;
            let items = index.provide_configurations(&paths);
            if items.len() < paths.len() {
                for path in paths.iter().filter(|p| !index.can_provide_configuration(p)) {
                    eprintln!("No configuration for {}", path.display());
                }
            }
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        QueryKind::Browse { folder } => {
            let browse = match folder {
                Some(folder) => index.provide_folder_browse_configuration(&absolute(folder)?),
                None => index.provide_browse_configuration(),
            };
            if browse.is_none() {
                eprintln!("No browse configuration for this folder");
            }
            println!("{}", serde_json::to_string_pretty(&browse)?);
        }
    }
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}
