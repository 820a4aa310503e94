use std::path::PathBuf;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// One or more watched paths changed on disk.
    Changed(Vec<PathBuf>),
}

/// A file system watcher over the taskrc file and the task data directory.
///
/// taskwarrior rewrites its database on every mutation, so watching the data
/// directory is a better refresh trigger than a short timer.
pub struct DataWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl DataWatcher {
    /// Start watching the given paths. Paths that cannot be watched (e.g. a
    /// taskrc that doesn't exist yet) are skipped with a warning; the watcher
    /// itself only fails if the backend cannot be created at all.
    pub fn start(paths: &[PathBuf]) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                if !event.paths.is_empty() {
                    let _ = tx.send(FileEvent::Changed(event.paths));
                }
            },
            Config::default(),
        )?;

        for path in paths {
            if let Err(e) = watcher.watch(path, RecursiveMode::Recursive) {
                warn!(path = %path.display(), error = %e, "could not watch path");
            }
        }

        Ok(DataWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
