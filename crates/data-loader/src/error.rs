//! Error types for the data-loader crate.
//!
//! Every variant here means the dataset is unavailable for browsing. The
//! caller is expected to report it and carry on with an empty index.

use thiserror::Error;

/// Errors that can occur during dataset loading and indexing
///
/// Rust concept: The `#[derive(Error)]` macro from thiserror implements
/// `std::error::Error` and `Display` from our `#[error(...)]` attributes
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Dataset file does not exist
    #[error("Could not find dataset file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No candidate encoding produced a readable table
    #[error("Could not read {path} with any encoding (tried {tried})")]
    UnreadableEncoding { path: String, tried: String },

    /// Header row lacks one or more required columns
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The table parsed but contained no data rows
    #[error("Dataset {path} contains no rows")]
    EmptyDataset { path: String },

    /// Index invariants did not hold after construction
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
