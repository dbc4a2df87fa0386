// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::errors::{Error, Result};
use crate::watch::patterns::DescriptorMatcher;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch `dir` (non-recursively) and poke `wake` whenever a descriptor file
/// is created or modified.
///
/// The loop still polls on its interval; this only lets an idle loop start
/// the next scan early. Scanning stays the single source of truth, so a
/// missed or duplicated notification is harmless.
pub fn spawn_watcher(
    dir: impl Into<PathBuf>,
    matcher: DescriptorMatcher,
    wake: Arc<Notify>,
) -> Result<WatcherHandle> {
    let dir = dir.into();
    // Canonicalize once so we have a stable base path.
    let dir = dir.canonicalize().unwrap_or_else(|_| dir.clone());

    // Called synchronously on notify's own thread.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !(event.kind.is_create() || event.kind.is_modify()) {
                    return;
                }
                if event.paths.iter().any(|p| matcher.matches(p)) {
                    debug!(paths = ?event.paths, "descriptor change detected; waking loop");
                    wake.notify_one();
                }
            }
            Err(err) => {
                warn!(error = %err, "file watch error");
            }
        },
        Config::default(),
    )
    .map_err(Error::from)?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(Error::from)?;

    info!("file watcher started on {:?}", dir);

    Ok(WatcherHandle { _inner: watcher })
}
