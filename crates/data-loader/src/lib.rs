//! # Data Loader Crate
//!
//! This crate loads the movie genre CSV and indexes it by title and genre.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, RawRow, MovieIndex)
//! - **parser**: Encoding detection, CSV parsing and row cleaning
//! - **index**: Build the shared-record indices and query them
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieIndex;
//! use std::path::Path;
//!
//! let index = MovieIndex::load_from_file(Path::new("MovieGenre.csv"))?;
//!
//! for movie in index.movies_by_genre("Horror") {
//!     println!("{} ({})", movie.title, movie.year_label());
//! }
//! let hits = index.search_title("alien");
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{MovieIndex, MovieRecord, RawRow};
