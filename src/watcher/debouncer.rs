//! Debouncing of database change events.
//!
//! Build tools usually rewrite compile_commands.json in several steps
//! (truncate, write, rename). Rebuilding on each step would index a
//! half-written file, so changes are held until the path has been quiet
//! for the configured duration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Debounces change events by path.
#[derive(Debug)]
pub struct Debouncer {
    /// Pending changes: path -> last change timestamp.
    pending: HashMap<PathBuf, Instant>,
    /// How long a path must be quiet before it is released.
    duration: Duration,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            pending: HashMap::new(),
            duration: Duration::from_millis(debounce_ms),
        }
    }

    /// Record a change, restarting the quiet period for `path`.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path, Instant::now());
    }

    /// Forget a pending change (e.g. the file was deleted).
    pub fn remove(&mut self, path: &Path) {
        self.pending.remove(path);
    }

    /// Take every path whose quiet period has elapsed.
    pub fn take_ready(&mut self) -> Vec<PathBuf> {
        let now = Instant::now();
        let mut ready = Vec::new();

        self.pending.retain(|path, last_change| {
            if now.duration_since(*last_change) >= self.duration {
                ready.push(path.clone());
                false
            } else {
                true
            }
        });

        ready
    }

    /// Time until the earliest pending path becomes ready, `None` when idle.
    pub fn time_until_ready(&self) -> Option<Duration> {
        let now = Instant::now();
        self.pending
            .values()
            .map(|last_change| (*last_change + self.duration).saturating_duration_since(now))
            .min()
    }
}
