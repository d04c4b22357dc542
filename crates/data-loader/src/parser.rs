//! Parser for the movie genre CSV file.
//!
//! The file has (at least) these columns:
//! `Title`, `IMDB Score`, `Genre`, `Poster`
//!
//! Exports of this dataset circulate in several encodings, so the bytes are
//! sniffed first and then decoded against a fixed fallback list until one
//! of them yields a table with the required columns.
//!
//! Rust concepts you'll see here:
//! - Borrowed vs. owned strings (`Cow<str>` from the decoder)
//! - Early returns with `?`
//! - Parallel iterators that keep input order

use crate::error::{DataLoadError, Result};
use crate::types::RawRow;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use rayon::prelude::*;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Columns the loader reads; any others are ignored
pub const REQUIRED_COLUMNS: [&str; 4] = ["Title", "IMDB Score", "Genre", "Poster"];

/// Encodings tried, in order, when the sniffed one fails
pub const FALLBACK_ENCODINGS: [&str; 4] = ["utf-8", "latin1", "iso-8859-1", "cp1252"];

/// Number of leading bytes fed to the encoding detector
const SNIFF_LEN: usize = 10_000;

/// Cell values read as missing, on top of the empty string
const MISSING_MARKERS: [&str; 8] = ["NA", "N/A", "n/a", "#N/A", "NaN", "nan", "NULL", "null"];

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]{4})\)").expect("year pattern is valid"));

/// The four cells of interest from one CSV record, still as text
#[derive(Debug, Clone, Default)]
pub(crate) struct RawFields {
    pub(crate) title: String,
    pub(crate) score: String,
    pub(crate) genre: String,
    pub(crate) poster: String,
}

/// Positions of the required columns in the header row
struct ColumnMap {
    title: usize,
    score: usize,
    genre: usize,
    poster: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let [title, score, genre, poster] = REQUIRED_COLUMNS.map(find);
        match (title, score, genre, poster) {
            (Some(title), Some(score), Some(genre), Some(poster)) => Ok(Self {
                title,
                score,
                genre,
                poster,
            }),
            _ => Err(DataLoadError::MissingColumns {
                missing: REQUIRED_COLUMNS
                    .iter()
                    .filter(|name| find(**name).is_none())
                    .map(|name| name.to_string())
                    .collect(),
            }),
        }
    }

    fn extract(&self, record: &csv::StringRecord) -> RawFields {
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        RawFields {
            title: cell(self.title),
            score: cell(self.score),
            genre: cell(self.genre),
            poster: cell(self.poster),
        }
    }
}

/// Load and clean the dataset at `path`
///
/// Steps:
/// 1. Sniff the encoding from the first few KB
/// 2. Decode + parse with it, falling back through [`FALLBACK_ENCODINGS`]
/// 3. Drop rows without a poster or a numeric score
/// 4. Extract the year and split the genres
pub fn parse_dataset(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path)?;

    let fields = read_with_fallback(path, &bytes)?;
    if fields.is_empty() {
        return Err(DataLoadError::EmptyDataset {
            path: path.display().to_string(),
        });
    }

    let rows: Vec<RawRow> = fields.par_iter().filter_map(clean_row).collect();
    info!(
        "Read {} rows from {}, kept {} ({} dropped)",
        fields.len(),
        path.display(),
        rows.len(),
        fields.len() - rows.len()
    );
    Ok(rows)
}

/// Try the sniffed encoding, then each fallback, returning the first table
/// that decodes cleanly and has the required columns.
fn read_with_fallback(path: &Path, bytes: &[u8]) -> Result<Vec<RawFields>> {
    let sniffed = sniff_encoding(bytes);
    debug!("Sniffed encoding {} for {}", sniffed.name(), path.display());

    let fallbacks = FALLBACK_ENCODINGS
        .iter()
        .filter_map(|label| Encoding::for_label(label.as_bytes()).map(|enc| (*label, enc)));
    let attempts = std::iter::once((sniffed.name(), sniffed)).chain(fallbacks);

    let mut tried = Vec::new();
    let mut last_error = None;
    for (label, encoding) in attempts {
        tried.push(label);
        let Some(text) = decode_strict(bytes, encoding) else {
            debug!("{} is not valid {}", path.display(), label);
            continue;
        };
        match read_table(&text) {
            Ok(fields) => {
                info!("Decoded {} as {}", path.display(), label);
                return Ok(fields);
            }
            Err(e) => {
                debug!("Parsing {} as {} failed: {}", path.display(), label, e);
                last_error = Some(e);
            }
        }
    }

    warn!("No encoding could read {}", path.display());
    Err(last_error.unwrap_or_else(|| DataLoadError::UnreadableEncoding {
        path: path.display().to_string(),
        tried: tried.join(", "),
    }))
}

/// Guess the text encoding from a fixed-size prefix
fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];
    let mut detector = EncodingDetector::new();
    detector.feed(prefix, prefix.len() == bytes.len());
    detector.guess(None, true)
}

/// Decode `bytes`, treating any malformed sequence as failure rather than
/// substituting replacement characters.
fn decode_strict<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Option<Cow<'a, str>> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors { None } else { Some(text) }
}

/// Parse decoded CSV text into the four required cells per record
pub(crate) fn read_table(text: &str) -> Result<Vec<RawFields>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut fields = Vec::new();
    for record in reader.records() {
        fields.push(columns.extract(&record?));
    }
    Ok(fields)
}

/// Turn one record into a [`RawRow`], or `None` if it must be dropped
pub(crate) fn clean_row(fields: &RawFields) -> Option<RawRow> {
    if is_missing(&fields.poster) || is_missing(&fields.title) {
        return None;
    }
    let score = coerce_score(&fields.score)?;

    Some(RawRow {
        title: fields.title.clone(),
        score,
        year: extract_year_from_title(&fields.title),
        poster: fields.poster.clone(),
        genres: split_genres(&fields.genre),
    })
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

/// Numeric score, or `None` for anything that isn't a number
fn coerce_score(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return None;
    }
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Extract the year from a movie title
///
/// Example: "Toy Story (1995)" -> Some("1995")
///          "Unknown Movie" -> None
pub fn extract_year_from_title(title: &str) -> Option<String> {
    YEAR_PATTERN
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split a genre cell on `|` without trimming the tokens
///
/// Example: " Action |Comedy " -> Some([" Action ", "Comedy "])
///          "" -> None
pub fn split_genres(cell: &str) -> Option<Vec<String>> {
    if is_missing(cell) {
        return None;
    }
    Some(cell.split('|').map(str::to_string).collect())
}
