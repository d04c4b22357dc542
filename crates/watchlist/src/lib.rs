//! # Watchlist Crate
//!
//! A small, ordered list of movie snapshots persisted as a JSON array.
//!
//! ## Example Usage
//!
//! ```ignore
//! use watchlist::{AddOutcome, Watchlist};
//!
//! let mut watchlist = Watchlist::load("watchlist.json")?;
//! if watchlist.add(&movie)? == AddOutcome::AlreadyPresent {
//!     println!("{} is already in your watchlist!", movie.title);
//! }
//! watchlist.remove(&movie.title)?;
//! ```

pub mod error;
pub mod store;

pub use error::{PersistenceError, Result};
pub use store::{AddOutcome, Watchlist, WatchlistEntry};
