//! Watchlist storage.
//!
//! Entries are deep copies of the indexed records taken when they were
//! added, so the file stays valid even if the dataset changes later. The
//! whole list is rewritten after every mutation.

use crate::error::{PersistenceError, Result};
use data_loader::MovieRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A snapshot of a movie as it looked when it was added
pub type WatchlistEntry = MovieRecord;

/// Result of [`Watchlist::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same title was already present; nothing changed
    AlreadyPresent,
}

/// Ordered, title-unique list of movies backed by a JSON file
#[derive(Debug, Clone)]
pub struct Watchlist {
    path: PathBuf,
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    /// An empty watchlist that will be saved to `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the watchlist stored at `path`
    ///
    /// A missing file is not an error and yields an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No watchlist file at {}", path.display());
            return Ok(Self::empty(path));
        }

        let json = fs::read_to_string(&path).map_err(|source| PersistenceError::Read {
            path: path.clone(),
            source,
        })?;
        let entries: Vec<WatchlistEntry> =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Parse {
                path: path.clone(),
                source,
            })?;

        info!("Loaded {} watchlist entries from {}", entries.len(), path.display());
        Ok(Self { path, entries })
    }

    /// Append a copy of `movie` unless its title is already listed
    ///
    /// The list is saved after a successful add. If saving fails the entry
    /// stays in memory and the error is returned.
    pub fn add(&mut self, movie: &MovieRecord) -> Result<AddOutcome> {
        if self.contains(&movie.title) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        self.entries.push(movie.clone());
        self.save()?;
        Ok(AddOutcome::Added)
    }

    /// Remove every entry titled `title` and save
    ///
    /// Returns how many entries were removed. The remaining entries keep
    /// their order.
    pub fn remove(&mut self, title: &str) -> Result<usize> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.title != title);
        let removed = before - self.entries.len();
        self.save()?;
        Ok(removed)
    }

    /// Overwrite the file with the full list
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(PersistenceError::Serialize)?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} watchlist entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.iter().any(|entry| entry.title == title)
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

    pub fn path(&self) -> &Path {
        &self.path
    }
}
