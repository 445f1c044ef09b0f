//! Watches the compile-commands database and rebuilds the index on change.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::{Receiver, select, unbounded};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::configuration::BuildTarget;
use crate::index::SharedIndex;
use crate::{debug_event, log_event};

use super::{Debouncer, WatchError};

/// Poll interval while no change is pending.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Rebuilds a [`SharedIndex`] whenever the database file changes.
///
/// The parent directory is watched rather than the file itself because
/// generators commonly replace the database by renaming a temporary file.
/// Rebuilds run on the watcher's own thread, one at a time; a burst of
/// changes collapses into a single rebuild of the latest content.
pub struct DatabaseWatcher {
    index: SharedIndex,
    database_path: PathBuf,
    target: BuildTarget,
    debouncer: Debouncer,
    event_rx: Receiver<notify::Result<Event>>,
    _watcher: notify::RecommendedWatcher,
}

impl DatabaseWatcher {
    pub fn new(
        index: SharedIndex,
        database_path: PathBuf,
        target: BuildTarget,
        debounce_ms: u64,
    ) -> Result<Self, WatchError> {
        let (event_tx, event_rx) = unbounded::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Receiver gone means the watcher is shutting down
            let _ = event_tx.send(res);
        })?;

        let dir = watch_dir(&database_path)?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        debug_event!("watcher", "watching", "{}", dir.display());

        Ok(Self {
            index,
            database_path,
            target,
            debouncer: Debouncer::new(debounce_ms),
            event_rx,
            _watcher: watcher,
        })
    }

    /// Run until `stop` receives a message or is disconnected.
    pub fn run(mut self, stop: Receiver<()>) -> Result<(), WatchError> {
        log_event!("watcher", "started", "{}", self.database_path.display());

        let events = self.event_rx.clone();
        loop {
            let timeout = self.debouncer.time_until_ready().unwrap_or(IDLE_TICK);

            select! {
                recv(events) -> message => match message {
                    Ok(Ok(event)) => self.handle_event(event),
                    Ok(Err(e)) => tracing::error!("[watcher] file watch error: {e}"),
                    Err(_) => return Err(WatchError::ChannelClosed),
                },
                recv(stop) -> _ => {
                    log_event!("watcher", "stopped");
                    return Ok(());
                }
                default(timeout) => {}
            }

            if !self.debouncer.take_ready().is_empty() {
                self.rebuild();
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        if !is_database_event(&event, &self.database_path) {
            return;
        }

        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => {
                self.debouncer.record(self.database_path.clone());
            }
            EventKind::Remove(_) => {
                // Keep serving the last good index until the file returns
                self.debouncer.remove(&self.database_path);
                tracing::warn!(
                    "[watcher] database removed: {}",
                    self.database_path.display()
                );
            }
            _ => {}
        }
    }

    fn rebuild(&self) {
        match self.index.refresh_from(&self.database_path, &self.target) {
            Ok(stats) => log_event!(
                "watcher",
                "reindexed",
                "{} files ({} skipped)",
                stats.files,
                stats.skipped
            ),
            Err(e) => tracing::warn!("[watcher] rebuild failed, keeping previous index: {e}"),
        }
    }
}

fn watch_dir(database_path: &Path) -> Result<PathBuf, WatchError> {
    match database_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(WatchError::NoParentDirectory {
            path: database_path.to_path_buf(),
        }),
    }
}

/// Whether `event` touches the database file.
///
/// Only the file name is compared: the watch is non-recursive on the
/// database's own directory, and notify may report canonicalized paths.
pub fn is_database_event(event: &Event, database_path: &Path) -> bool {
    let Some(name) = database_path.file_name() else {
        return false;
    };
    event.paths.iter().any(|path| path.file_name() == Some(name))
}
