//! Application state owned by the command dispatcher.
//!
//! Loading never fails outright: a missing dataset leaves an empty index and
//! a broken watchlist file leaves an empty watchlist, with a notice for the
//! user in both cases.

use anyhow::{Result, anyhow};
use data_loader::{MovieIndex, MovieRecord};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use watchlist::{AddOutcome, Watchlist};

/// Where the app reads its data from
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset: PathBuf,
    pub watchlist: PathBuf,
}

pub struct AppState {
    pub index: MovieIndex,
    pub watchlist: Watchlist,
    /// Problems hit during `init` that the user should hear about
    pub notices: Vec<String>,
}

impl AppState {
    /// Load the dataset and the watchlist
    pub fn init(config: &Config) -> Self {
        let mut notices = Vec::new();

        let index = match MovieIndex::load_from_file(&config.dataset) {
            Ok(index) => index,
            Err(e) => {
                warn!("Dataset unavailable: {e}");
                notices.push(format!(
                    "Failed to load data: {e}. Make sure {} exists and has the \
                     Title, IMDB Score, Genre and Poster columns.",
                    config.dataset.display()
                ));
                MovieIndex::new()
            }
        };

        let watchlist = match Watchlist::load(&config.watchlist) {
            Ok(watchlist) => watchlist,
            Err(e) => {
                warn!("Watchlist unavailable: {e}");
                notices.push(format!("Failed to load watchlist: {e}"));
                Watchlist::empty(&config.watchlist)
            }
        };

        Self {
            index,
            watchlist,
            notices,
        }
    }

    /// Look up `title` in the dataset and add it to the watchlist
    pub fn add_to_watchlist(&mut self, title: &str) -> Result<(Arc<MovieRecord>, AddOutcome)> {
        let movie = self
            .index
            .get_movie(title)
            .cloned()
            .ok_or_else(|| anyhow!("No movie titled '{}' in the dataset", title))?;
        let outcome = self.watchlist.add(&movie)?;
        Ok((movie, outcome))
    }
}
