use cinemap_models::{CatalogItem, CatalogKey, WatchlistEntry};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("failed to write watchlist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize watchlist: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The saved watchlist, persisted as a JSON array of entries.
///
/// Entries are unique by `CatalogKey` and kept in insertion order. Every
/// mutation rewrites the whole file.
pub struct WatchlistStore {
    path: PathBuf,
    entries: Vec<WatchlistEntry>,
}

impl WatchlistStore {
    /// Load the list at `path`.
    ///
    /// A missing file is an empty list. An unreadable or malformed file is
    /// also treated as empty; it is moved aside to `<name>.bak` first so the
    /// next save does not destroy it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<WatchlistEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded {} watchlist entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!("Watchlist {} is malformed ({}), starting empty", path.display(), e);
                    Self::back_up(&path);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!("Could not read watchlist {} ({}), starting empty", path.display(), e);
                Self::back_up(&path);
                Vec::new()
            }
        };

        Self { path, entries }
    }

    fn back_up(path: &Path) {
        let backup = backup_path(path);
        match std::fs::rename(path, &backup) {
            Ok(()) => info!("Moved unreadable watchlist to {}", backup.display()),
            Err(e) => warn!("Failed to back up watchlist to {}: {}", backup.display(), e),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: CatalogKey) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    pub fn get(&self, key: CatalogKey) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Append `item` unless its key is already saved. Returns whether the
    /// list changed; an existing entry keeps its original fields.
    pub fn add(&mut self, item: CatalogItem) -> Result<bool, WatchlistError> {
        if self.contains(item.key()) {
            debug!("{} already on the watchlist", item.key());
            return Ok(false);
        }

        info!("Adding {} to the watchlist", item.display_title());
        let mut entries = self.entries.clone();
        entries.push(WatchlistEntry::new(item));
        self.commit(entries)?;
        Ok(true)
    }

    /// Returns whether an entry was removed
    pub fn remove(&mut self, key: CatalogKey) -> Result<bool, WatchlistError> {
        if !self.contains(key) {
            return Ok(false);
        }

        let entries: Vec<WatchlistEntry> = self.entries.iter().filter(|e| e.key() != key).cloned().collect();
        self.commit(entries)?;
        info!("Removed {} from the watchlist", key);
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), WatchlistError> {
        self.commit(Vec::new())
    }

    /// Persist `entries`, then adopt them. A failed write leaves the
    /// in-memory list untouched.
    fn commit(&mut self, entries: Vec<WatchlistEntry>) -> Result<(), WatchlistError> {
        self.write(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn write(&self, entries: &[WatchlistEntry]) -> Result<(), WatchlistError> {
        let io_err = |source| WatchlistError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        // write to a sibling temp file, then rename over the target
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content).map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        debug!("Saved {} watchlist entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}
