//! Error types for watchlist persistence.
//!
//! All of these are recoverable: the in-memory list is left as it was and
//! the caller decides how to tell the user.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The watchlist file exists but could not be read
    #[error("Failed to read watchlist {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The watchlist file is not a JSON array of movies
    #[error("Failed to parse watchlist {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize watchlist: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The watchlist file could not be written
    #[error("Failed to save watchlist {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
