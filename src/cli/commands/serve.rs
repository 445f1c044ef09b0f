//! Serve command: stdio host protocol with optional database watching.

use anyhow::{Result, anyhow};
use std::io;

use crate::config::Settings;
use crate::host::HostSession;
use crate::index::{ConfigurationIndex, SharedIndex};
use crate::log_event;
use crate::watcher::DatabaseWatcher;

pub fn run(settings: &Settings, watch: bool) -> Result<()> {
    let database_path = settings.database_path();
    let target = settings.build_target();
    let index = SharedIndex::new(ConfigurationIndex::new(settings.workspace_folders()));

    // A missing database is not fatal: the host can still connect and the
    // watcher picks the file up once the build tool writes it.
    if let Err(e) = index.refresh_from(&database_path, &target) {
        tracing::warn!("[serve] initial rebuild failed: {e}");
    }

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    let watcher_handle = if watch {
        let watcher = DatabaseWatcher::new(
            index.clone(),
            database_path.clone(),
            target.clone(),
            settings.watch.debounce_ms,
        )?;
        Some(std::thread::spawn(move || watcher.run(stop_rx)))
    } else {
        None
    };

    log_event!("serve", "ready", "{}", database_path.display());
    let session = HostSession::new(index, database_path, target);
    let served = session.serve(io::stdin().lock(), io::stdout().lock());

    drop(stop_tx);
    if let Some(handle) = watcher_handle {
        handle
            .join()
            .map_err(|_| anyhow!("watcher thread panicked"))??;
    }

    Ok(served?)
}
