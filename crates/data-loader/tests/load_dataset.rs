//! Integration tests for loading dataset files from disk.
//!
//! Each test writes a small CSV into a temp directory and loads it through
//! the public API, the same way the binary does.

use data_loader::{DataLoadError, MovieIndex};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "imdbId,Imdb Link,Title,IMDB Score,Genre,Poster\n";

fn write_dataset(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_load_utf8_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let csv = format!(
        "{HEADER}\
         1,http://imdb/1,Alien (1979),8.5,Horror|Sci-Fi,http://x/a.jpg\n\
         1,http://imdb/1,Alien (1979),8.5,Thriller,http://x/a.jpg\n\
         2,http://imdb/2,Unknown Movie,6.1,Drama,http://x/u.jpg\n\
         3,http://imdb/3,No Poster (2000),7.0,Drama,\n\
         4,http://imdb/4,Bad Score (2001),n/a,Drama,http://x/b.jpg\n\
         5,http://imdb/5,No Genre (2002),7.3,,http://x/n.jpg\n"
    );
    let path = write_dataset(&dir, "MovieGenre.csv", csv.as_bytes());

    let index = MovieIndex::load_from_file(&path).unwrap();
    index.validate().unwrap();

    assert_eq!(index.counts(), (2, 4));
    let alien = index.get_movie("Alien (1979)").unwrap();
    assert_eq!(alien.genres, vec!["Horror", "Sci-Fi", "Thriller"]);
    for genre in ["Horror", "Sci-Fi", "Thriller"] {
        assert!(Arc::ptr_eq(&index.movies_by_genre(genre)[0], alien));
    }

    let unknown = index.get_movie("Unknown Movie").unwrap();
    assert_eq!(unknown.year, None);
    assert!(index.get_movie("No Poster (2000)").is_none());
    assert!(index.get_movie("Bad Score (2001)").is_none());
    assert!(index.get_movie("No Genre (2002)").is_none());
}

#[test]
fn test_load_latin1_dataset_loses_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = HEADER.as_bytes().to_vec();
    // 0xE9 is 'é' in Latin-1 and invalid on its own in UTF-8
    bytes.extend_from_slice(b"1,l,Am\xe9lie (2001),8.3,Comedy|Romance,http://x/am.jpg\n");
    bytes.extend_from_slice(b"2,l,Les Mis\xe9rables (1998),7.5,Drama,http://x/lm.jpg\n");
    bytes.extend_from_slice(b"3,l,Heat (1995),8.2,Crime,http://x/h.jpg\n");
    assert!(std::str::from_utf8(&bytes).is_err());
    let path = write_dataset(&dir, "latin1.csv", &bytes);

    let index = MovieIndex::load_from_file(&path).unwrap();
    assert_eq!(index.counts().0, 3);
    let amelie = index.get_movie("Amélie (2001)").unwrap();
    assert_eq!(amelie.genres, vec!["Comedy", "Romance"]);
    assert!(index.get_movie("Les Misérables (1998)").is_some());
}

#[test]
fn test_load_utf8_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("Title,IMDB Score,Genre,Poster\nLéon (1994),8.5,Crime|Drama,http://x/l.jpg\n".as_bytes());
    let path = write_dataset(&dir, "bom.csv", &bytes);

    let index = MovieIndex::load_from_file(&path).unwrap();
    assert!(index.get_movie("Léon (1994)").is_some());
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = MovieIndex::load_from_file(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DataLoadError::FileNotFound { .. }));
}

#[test]
fn test_missing_columns_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, "cols.csv", b"Title,Genre\nAlien (1979),Horror\n");

    let err = MovieIndex::load_from_file(&path).unwrap_err();
    match err {
        DataLoadError::MissingColumns { missing } => {
            assert_eq!(missing, vec!["IMDB Score", "Poster"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_header_only_dataset_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, "empty.csv", HEADER.as_bytes());

    let err = MovieIndex::load_from_file(&path).unwrap_err();
    assert!(matches!(err, DataLoadError::EmptyDataset { .. }));
}
