//! MovieIndex building and querying.
//!
//! Records are grown in a plain `Vec` arena while rows stream in (a movie
//! gains genres as later rows mention it), then each one is frozen into a
//! single `Arc` that the title map and every genre bucket share.
//!
//! Rust concepts you'll learn:
//! - Entry API for HashMap/BTreeMap
//! - Arena indices instead of shared mutable references
//! - `Arc::ptr_eq` for identity checks

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

impl MovieIndex {
    /// Load the dataset file and build the index from it
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie dataset from {}", path.display());

        let rows = parser::parse_dataset(path)?;
        let index = Self::build(rows);

        let (movies, genres) = index.counts();
        info!("Indexed {} movies across {} genres", movies, genres);
        Ok(index)
    }

    /// Build the title and genre indices from cleaned rows
    ///
    /// Rows without a genre list are skipped, so a movie only exists once
    /// some row gives it at least one genre.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        // Arena phase: records are owned by `arena` and referred to by slot
        let mut arena: Vec<MovieRecord> = Vec::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();
        let mut buckets: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let Some(tokens) = row.genres else {
                skipped += 1;
                continue;
            };

            let slot = *by_title.entry(row.title.clone()).or_insert_with(|| {
                arena.push(MovieRecord {
                    title: row.title,
                    score: row.score,
                    year: row.year,
                    poster: row.poster,
                    genres: Vec::new(),
                });
                arena.len() - 1
            });

            for token in &tokens {
                let genre = token.trim();
                buckets.entry(genre.to_string()).or_default().push(slot);

                let record = &mut arena[slot];
                if !record.genres.iter().any(|g| g == genre) {
                    record.genres.push(genre.to_string());
                }
            }
        }

        if skipped > 0 {
            debug!("Skipped {} rows without genres", skipped);
        }

        // Freeze phase: one Arc per record, cloned into every bucket entry
        let movies: Vec<Arc<MovieRecord>> = arena.into_iter().map(Arc::new).collect();
        let genre_index = buckets
            .into_iter()
            .map(|(genre, slots)| {
                let entries = slots.into_iter().map(|slot| Arc::clone(&movies[slot])).collect();
                (genre, entries)
            })
            .collect();

        Self {
            movies,
            by_title,
            genre_index,
        }
    }

    /// Case-insensitive substring search over titles
    ///
    /// Results keep dataset order. An empty query matches nothing.
    pub fn search_title(&self, query: &str) -> Vec<&Arc<MovieRecord>> {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Pick a movie uniformly at random, `None` if nothing is loaded
    pub fn random_movie<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Arc<MovieRecord>> {
        self.movies.choose(rng)
    }

    /// Validate the shared-record invariants
    ///
    /// Check that:
    /// - every bucket entry is the title map's record (same allocation)
    /// - every bucket entry lists the bucket's genre
    /// - every genre a record lists has a bucket containing that record
    ///
    /// Returns Ok(()) if valid, Err if any issues found
    pub fn validate(&self) -> Result<()> {
        if self.by_title.len() != self.movies.len() {
            return Err(DataLoadError::ValidationError(format!(
                "title map has {} entries but {} records exist",
                self.by_title.len(),
                self.movies.len()
            )));
        }

        for (genre, entries) in &self.genre_index {
            for movie in entries {
                let canonical = self.get_movie(&movie.title).ok_or_else(|| {
                    DataLoadError::ValidationError(format!(
                        "'{}' in genre '{}' is missing from the title map",
                        movie.title, genre
                    ))
                })?;
                if !Arc::ptr_eq(canonical, movie) {
                    return Err(DataLoadError::ValidationError(format!(
                        "'{}' in genre '{}' is a copy, not the shared record",
                        movie.title, genre
                    )));
                }
                if !movie.genres.iter().any(|g| g == genre) {
                    return Err(DataLoadError::ValidationError(format!(
                        "'{}' is filed under '{}' but does not list it",
                        movie.title, genre
                    )));
                }
            }
        }

        for movie in &self.movies {
            for genre in &movie.genres {
                let filed = self
                    .movies_by_genre(genre)
                    .iter()
                    .any(|entry| Arc::ptr_eq(entry, movie));
                if !filed {
                    return Err(DataLoadError::ValidationError(format!(
                        "'{}' lists '{}' but is not in that bucket",
                        movie.title, genre
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn row(title: &str, score: f64, genres: Option<&str>, poster: &str) -> RawRow {
        RawRow {
            title: title.to_string(),
            score,
            year: parser::extract_year_from_title(title),
            poster: poster.to_string(),
            genres: genres.and_then(parser::split_genres),
        }
    }

    #[test]
    fn test_alien_merges_genres_across_rows() {
        let index = MovieIndex::build(vec![
            row("Alien (1979)", 8.5, Some("Horror|Sci-Fi"), "http://x/a.jpg"),
            row("Alien (1979)", 8.5, Some("Thriller"), "http://x/a.jpg"),
        ]);

        assert_eq!(index.counts(), (1, 3));
        let alien = index.get_movie("Alien (1979)").unwrap();
        assert_eq!(alien.genres, vec!["Horror", "Sci-Fi", "Thriller"]);
        assert_eq!(alien.year.as_deref(), Some("1979"));

        for genre in ["Horror", "Sci-Fi", "Thriller"] {
            let bucket = index.movies_by_genre(genre);
            assert_eq!(bucket.len(), 1);
            assert!(Arc::ptr_eq(&bucket[0], alien));
        }
        index.validate().unwrap();
    }

    #[test]
    fn test_genre_labels_are_trimmed() {
        let index = MovieIndex::build(vec![row("Mixed", 6.0, Some(" Action |Comedy "), "p")]);
        let genres: Vec<&str> = index.genres().collect();
        assert_eq!(genres, vec!["Action", "Comedy"]);
        assert!(index.movies_by_genre(" Action ").is_empty());
    }

    #[test]
    fn test_repeated_tokens_and_rows() {
        let index = MovieIndex::build(vec![
            row("Loud (2001)", 5.0, Some("Action|Action"), "p"),
            row("Loud (2001)", 5.0, Some("Action"), "p"),
        ]);
        let loud = index.get_movie("Loud (2001)").unwrap();
        assert_eq!(loud.genres, vec!["Action"]);
        // One bucket entry per token occurrence, shared record every time
        let bucket = index.movies_by_genre("Action");
        assert_eq!(bucket.len(), 3);
        assert!(bucket.iter().all(|m| Arc::ptr_eq(m, loud)));
        index.validate().unwrap();
    }

    #[test]
    fn test_rows_without_genres_create_no_movie() {
        let index = MovieIndex::build(vec![
            row("Orphan (2009)", 7.0, None, "p"),
            row("Kept (2010)", 7.0, Some("Drama"), "p"),
        ]);
        assert!(index.get_movie("Orphan (2009)").is_none());
        assert_eq!(index.counts(), (1, 1));
    }

    #[test]
    fn test_first_row_wins_for_score_and_poster() {
        let index = MovieIndex::build(vec![
            row("Twice", 7.0, None, "skipped.jpg"),
            row("Twice", 6.0, Some("Drama"), "first.jpg"),
            row("Twice", 9.0, Some("Comedy"), "second.jpg"),
        ]);
        let twice = index.get_movie("Twice").unwrap();
        assert_eq!(twice.score, 6.0);
        assert_eq!(twice.poster, "first.jpg");
        assert_eq!(twice.year, None);
        assert_eq!(twice.genres, vec!["Drama", "Comedy"]);
    }

    #[test]
    fn test_title_count_matches_distinct_titles() {
        let rows: Vec<RawRow> = (0..50)
            .map(|i| {
                let genre = if i % 2 == 0 { "Drama|Comedy" } else { "Horror" };
                row(&format!("Movie {} ({})", i % 20, 1980 + i % 20), 6.0, Some(genre), "p")
            })
            .collect();
        let index = MovieIndex::build(rows);
        assert_eq!(index.counts().0, 20);
        index.validate().unwrap();
    }

    #[test]
    fn test_search_title() {
        let index = MovieIndex::build(vec![
            row("The Matrix (1999)", 8.7, Some("Sci-Fi"), "p"),
            row("Alien (1979)", 8.5, Some("Horror"), "p"),
            row("Matrix Reloaded (2003)", 7.2, Some("Sci-Fi"), "p"),
        ]);
        let titles: Vec<&str> = index
            .search_title("MATRIX")
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["The Matrix (1999)", "Matrix Reloaded (2003)"]);
        assert!(index.search_title("").is_empty());
        assert!(index.search_title("zzz").is_empty());
    }

    #[test]
    fn test_random_movie() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(MovieIndex::new().random_movie(&mut rng).is_none());

        let index = MovieIndex::build(vec![
            row("A", 1.0, Some("Drama"), "p"),
            row("B", 2.0, Some("Drama"), "p"),
        ]);
        for _ in 0..10 {
            let pick = index.random_movie(&mut rng).unwrap();
            assert!(Arc::ptr_eq(pick, index.get_movie(&pick.title).unwrap()));
        }
    }

    #[test]
    fn test_validate_detects_copied_record() {
        let mut index = MovieIndex::build(vec![row("A", 1.0, Some("Drama"), "p")]);
        let copy = Arc::new((*index.movies[0]).clone());
        index.genre_index.insert("Drama".to_string(), vec![copy]);
        assert!(matches!(
            index.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }
}
