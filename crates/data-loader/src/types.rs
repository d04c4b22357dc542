//! Core domain types for the movie dataset.
//!
//! Key Rust concepts demonstrated here:
//! - `Arc<T>` for one record shared by several indices
//! - `Option<T>` for fields the source may not provide
//! - HashMap and BTreeMap for lookups

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// =============================================================================
// Movie Types
// =============================================================================

/// A movie as it appears in the dataset.
///
/// Exactly one `MovieRecord` exists per distinct title. The title map and
/// every genre bucket hold an `Arc` to that same allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// IMDB score as read from the dataset
    pub score: f64,
    /// Four-digit year pulled from the title, e.g. "Alien (1979)" -> "1979"
    ///
    /// Rust concept: `None` here means "the title had no year", which is
    /// different from a parse error and needs no special handling.
    #[serde(default)]
    pub year: Option<String>,
    /// Poster image URL
    pub poster: String,
    /// Genre labels in first-seen order, without duplicates
    #[serde(default)]
    pub genres: Vec<String>,
}

impl MovieRecord {
    /// Year for display, `"Unknown"` when the title had none
    pub fn year_label(&self) -> &str {
        self.year.as_deref().unwrap_or("Unknown")
    }

    /// Genres joined for display, `"Unknown"` when empty
    pub fn genres_label(&self) -> String {
        if self.genres.is_empty() {
            "Unknown".to_string()
        } else {
            self.genres.join(" | ")
        }
    }
}

/// One cleaned row from the dataset file, before indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub title: String,
    pub score: f64,
    pub year: Option<String>,
    pub poster: String,
    /// Pipe-split genre tokens, not yet trimmed.
    /// `None` when the genre cell was empty.
    pub genres: Option<Vec<String>>,
}

// =============================================================================
// MovieIndex - The In-Memory Catalogue
// =============================================================================

/// Title and genre indices over the dataset.
///
/// Built once by [`MovieIndex::build`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct MovieIndex {
    /// Every distinct movie, in the order its title was first seen
    pub(crate) movies: Vec<Arc<MovieRecord>>,
    /// Title -> position in `movies`
    pub(crate) by_title: HashMap<String, usize>,
    /// Genre label -> movies carrying it, one entry per source row.
    /// BTreeMap keeps the labels sorted for listing.
    pub(crate) genre_index: BTreeMap<String, Vec<Arc<MovieRecord>>>,
}

impl MovieIndex {
    /// Creates a new, empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by its exact title
    pub fn get_movie(&self, title: &str) -> Option<&Arc<MovieRecord>> {
        self.by_title.get(title).map(|&idx| &self.movies[idx])
    }

    /// Get all movies in a genre
    ///
    /// Returns an empty slice if the genre is unknown
    pub fn movies_by_genre(&self, genre: &str) -> &[Arc<MovieRecord>] {
        self.genre_index
            .get(genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All genre labels in sorted order
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre_index.keys().map(String::as_str)
    }

    /// All movies in first-seen order
    pub fn movies(&self) -> &[Arc<MovieRecord>] {
        &self.movies
    }

    /// `(distinct movies, genres)`
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.genre_index.len())
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
