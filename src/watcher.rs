// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! File system watcher for the sprite directory

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use tracing::info;

use crate::Result;

/// Events emitted by the watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A sprite was added
    FileCreated(PathBuf),
    /// A sprite was removed or renamed away
    FileDeleted(PathBuf),
    /// Watcher error
    Error(String),
}

impl WatchEvent {
    /// Whether this event changes the set of sprites with `extension`
    pub fn changes_listing(&self, extension: &str) -> bool {
        match self {
            WatchEvent::FileCreated(p) | WatchEvent::FileDeleted(p) => {
                should_process(p)
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e == extension)
            }
            WatchEvent::Error(_) => false,
        }
    }
}

/// Sprite directory watcher
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched_paths: Vec<PathBuf>,
    event_rx: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    /// Create a new file watcher
    pub fn new() -> Result<Self> {
        let (tx, rx) = channel();

        let config = Config::default()
            .with_poll_interval(Duration::from_secs(2));

        let watcher = RecommendedWatcher::new(tx, config)?;

        Ok(Self {
            watcher,
            watched_paths: Vec::new(),
            event_rx: rx,
        })
    }

    /// Add a directory to watch
    pub fn watch(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
            info!("Created sprite directory: {:?}", path);
        }

        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        self.watched_paths.push(path.to_path_buf());
        info!("Watching: {:?}", path);

        Ok(())
    }

    /// Get the next event (blocking with timeout)
    pub fn next_event(&self, timeout: Duration) -> Option<WatchEvent> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(Ok(event)) => convert_event(event),
            Ok(Err(e)) => Some(WatchEvent::Error(e.to_string())),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => None,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                Some(WatchEvent::Error("Watcher disconnected".to_string()))
            }
        }
    }

    /// Get currently watched paths
    pub fn watched_paths(&self) -> &[PathBuf] {
        &self.watched_paths
    }
}

/// Convert notify event to our event type. Renames surface as a
/// create/remove pair on most backends; a bare rename is treated as a create
/// of its final path.
fn convert_event(event: Event) -> Option<WatchEvent> {
    match event.kind {
        EventKind::Create(_) => {
            event.paths.first().map(|p| WatchEvent::FileCreated(p.clone()))
        }
        EventKind::Remove(_) => {
            event.paths.first().map(|p| WatchEvent::FileDeleted(p.clone()))
        }
        EventKind::Modify(notify::event::ModifyKind::Name(_)) => {
            event.paths.last().map(|p| WatchEvent::FileCreated(p.clone()))
        }
        _ => None,
    }
}

/// Check if a file in the sprite directory should be considered
pub fn should_process(path: &Path) -> bool {
    let filename = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };

    // Skip hidden files
    if filename.starts_with('.') {
        return false;
    }

    // Skip temporary files
    let temp_extensions = [".tmp", ".part", ".crdownload", ".partial", ".download"];
    if temp_extensions.iter().any(|ext| filename.ends_with(ext)) {
        return false;
    }

    // Skip system files
    let skip_names = ["desktop.ini", "thumbs.db", ".ds_store"];
    !skip_names.iter().any(|n| filename.eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};

    #[test]
    fn test_should_process() {
        assert!(should_process(Path::new("Sprite/HeroOrcMale_tank.png")));
        assert!(!should_process(Path::new("Sprite/.HeroOrcMale_tank.png")));
        assert!(!should_process(Path::new("Sprite/HeroOrcMale_tank.png.part")));
        assert!(!should_process(Path::new("Sprite/Thumbs.db")));
    }

    #[test]
    fn test_convert_event_kinds() {
        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("Sprite/a.png"));
        assert_eq!(
            convert_event(created),
            Some(WatchEvent::FileCreated(PathBuf::from("Sprite/a.png")))
        );

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("Sprite/a.png"));
        assert_eq!(
            convert_event(removed),
            Some(WatchEvent::FileDeleted(PathBuf::from("Sprite/a.png")))
        );

        let renamed = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("Sprite/a.png"))
            .add_path(PathBuf::from("Sprite/b.png"));
        assert_eq!(
            convert_event(renamed),
            Some(WatchEvent::FileCreated(PathBuf::from("Sprite/b.png")))
        );

        let touched = Event::new(EventKind::Modify(ModifyKind::Any));
        assert_eq!(convert_event(touched), None);
    }

    #[test]
    fn test_changes_listing_ignores_other_files() {
        assert!(WatchEvent::FileCreated(PathBuf::from("a.png")).changes_listing("png"));
        assert!(WatchEvent::FileDeleted(PathBuf::from("a.png")).changes_listing("png"));
        assert!(!WatchEvent::FileCreated(PathBuf::from("a.png.tmp")).changes_listing("png"));
        assert!(!WatchEvent::FileCreated(PathBuf::from("skin_tags.json")).changes_listing("png"));
        assert!(!WatchEvent::Error("boom".to_string()).changes_listing("png"));
    }
}
