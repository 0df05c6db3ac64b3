//! File system watcher that turns vault and settings edits into
//! re-evaluation triggers.
//!
//! Uses the `notify` crate for cross-platform file system events
//! (FSEvents on macOS, inotify on Linux, ReadDirectoryChanges on Windows).

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

use pintab_core::error::PintabError;

use crate::scanner::is_hidden;

/// Events emitted by the vault watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    /// A markdown note was created or modified.
    Changed(PathBuf),
    /// A markdown note was deleted.
    Removed(PathBuf),
    /// The settings file was written, so the rules may have changed.
    SettingsChanged,
}

/// Watches a vault directory (and optionally a settings file) for changes.
pub struct VaultWatcher {
    _watcher: RecommendedWatcher,
    receiver: mpsc::Receiver<VaultEvent>,
}

fn classify(
    vault_root: &Path,
    settings: Option<&Path>,
    kind: &EventKind,
    path: &Path,
) -> Option<VaultEvent> {
    if settings.is_some_and(|s| s == path) {
        return match kind {
            EventKind::Create(_) | EventKind::Modify(_) => Some(VaultEvent::SettingsChanged),
            _ => None,
        };
    }

    // Skip non-markdown files
    if path.extension().and_then(|e| e.to_str()) != Some("md") {
        return None;
    }
    // Skip anything under a hidden directory (.obsidian, .trash)
    let rel = path.strip_prefix(vault_root).ok()?;
    if rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .any(is_hidden)
    {
        return None;
    }

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(VaultEvent::Changed(path.to_path_buf()))
        }
        EventKind::Remove(_) => Some(VaultEvent::Removed(path.to_path_buf())),
        _ => None,
    }
}

impl VaultWatcher {
    /// Start watching `vault_root` recursively, plus `settings_path` when given.
    ///
    /// # Errors
    ///
    /// Returns [`PintabError::Io`] if the watcher cannot be created.
    pub fn start(vault_root: &Path, settings_path: Option<&Path>) -> Result<Self, PintabError> {
        let (tx, rx) = mpsc::channel();

        let vault_root_owned = vault_root.to_path_buf();
        let settings_owned = settings_path.map(Path::to_path_buf);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in &event.paths {
                    if let Some(vault_event) =
                        classify(&vault_root_owned, settings_owned.as_deref(), &event.kind, path)
                    {
                        debug!(?vault_event, "vault event");
                        let _ = tx.send(vault_event);
                    }
                }
            }
        })
        .map_err(|e| PintabError::Io(std::io::Error::other(e)))?;

        watcher
            .watch(vault_root, RecursiveMode::Recursive)
            .map_err(|e| PintabError::Io(std::io::Error::other(e)))?;

        if let Some(parent) = settings_path
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty() && !p.starts_with(vault_root))
        {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .map_err(|e| PintabError::Io(std::io::Error::other(e)))?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Try to receive the next event with a timeout.
    ///
    /// Returns `None` if no event is available within the timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<VaultEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Try to receive the next event without blocking.
    ///
    /// Returns `None` if no event is immediately available.
    pub fn try_recv(&self) -> Option<VaultEvent> {
        self.receiver.try_recv().ok()
    }

    /// Drain every event that is already queued.
    pub fn drain(&self) -> Vec<VaultEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}
