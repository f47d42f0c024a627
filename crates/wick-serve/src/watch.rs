//! Filesystem watching for development mode.
//!
//! Wraps a `notify` watcher over a set of paths and forwards
//! create/modify/remove events through a channel. Two watchers exist per
//! serve session: one over the source tree, one over the `from` side of
//! every copy pair. Events are forwarded as they arrive, one cycle per
//! event; coalescing bursts is deliberately left to the collaborators.

use crate::error::{Result, ServeError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone)]
pub enum FileChange {
    /// File or directory was created
    Created(PathBuf),
    /// File was modified
    Modified(PathBuf),
    /// File or directory was removed
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Created(p) | FileChange::Modified(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Watches a fixed set of paths and forwards change events.
///
/// Directories are watched recursively. The watcher only reports changes,
/// so the file set that already exists at startup never produces an event.
/// Dropping the watcher stops event delivery and ends the channel.
#[derive(Debug)]
pub struct FileWatcher {
    /// Underlying notify watcher; kept alive for the watcher's lifetime
    _watcher: RecommendedWatcher,
    /// Paths being watched
    paths: Vec<PathBuf>,
}

impl FileWatcher {
    /// Start watching the given paths.
    ///
    /// Returns the watcher plus the receiving end of its event channel.
    ///
    /// # Errors
    ///
    /// Fails if any path does not exist or the platform watcher cannot be
    /// created.
    pub fn new(paths: Vec<PathBuf>) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        for path in &paths {
            if !path.exists() {
                return Err(ServeError::WatchTargetMissing(path.clone()));
            }
        }

        let (tx, rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "watch event error");
                    return;
                }
            };

            for path in &event.paths {
                let change = match event.kind {
                    EventKind::Create(_) => FileChange::Created(path.clone()),
                    EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                // Receiver gone means the session is over; nothing to do.
                let _ = tx.blocking_send(change);
            }
        })?;

        for path in &paths {
            watcher.watch(path, RecursiveMode::Recursive)?;
        }

        Ok((
            Self {
                _watcher: watcher,
                paths,
            },
            rx,
        ))
    }

    /// The paths being watched.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}
