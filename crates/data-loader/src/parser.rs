//! Parser for the MovieLens CSV tables.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//! - tags.csv: userId,movieId,tag,timestamp
//! - links.csv: movieId,imdbId,tmdbId
//!
//! Every table must have a header row. Columns are matched by name, so
//! extra columns and column order don't matter, but a missing required
//! column fails the whole load with `DataLoadError::MissingColumn`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const MOVIES_FILE: &str = "movies.csv";
pub const RATINGS_FILE: &str = "ratings.csv";
pub const TAGS_FILE: &str = "tags.csv";
pub const LINKS_FILE: &str = "links.csv";

const MOVIES_COLUMNS: &[&str] = &["movieId", "title", "genres"];
const RATINGS_COLUMNS: &[&str] = &["movieId", "rating"];
const TAGS_COLUMNS: &[&str] = &["movieId", "tag"];
const LINKS_COLUMNS: &[&str] = &["movieId", "imdbId", "tmdbId"];

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn csv_error(file: &str, err: csv::Error) -> DataLoadError {
    DataLoadError::ParseError {
        file: file.to_string(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

/// Read every row of a table after checking its header for `required` columns
fn read_rows<R, T>(reader: R, file: &str, required: &[&str]) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(|e| csv_error(file, e))?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }

    rdr.deserialize()
        .map(|row| row.map_err(|e| csv_error(file, e)))
        .collect()
}

/// Parse the movies table from any reader
pub fn parse_movies_from_reader<R: Read>(reader: R) -> Result<Vec<Movie>> {
    read_rows(reader, MOVIES_FILE, MOVIES_COLUMNS)
}

/// Parse the ratings table from any reader
///
/// Rejects non-finite rating values; everything else about the value range
/// is left to the dataset.
pub fn parse_ratings_from_reader<R: Read>(reader: R) -> Result<Vec<Rating>> {
    let ratings: Vec<Rating> = read_rows(reader, RATINGS_FILE, RATINGS_COLUMNS)?;
    if let Some(bad) = ratings.iter().find(|r| !r.rating.is_finite()) {
        return Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: bad.rating.to_string(),
        });
    }
    Ok(ratings)
}

/// Parse the tags table from any reader
pub fn parse_tags_from_reader<R: Read>(reader: R) -> Result<Vec<Tag>> {
    read_rows(reader, TAGS_FILE, TAGS_COLUMNS)
}

/// Parse the links table from any reader. Empty id fields become `None`.
pub fn parse_links_from_reader<R: Read>(reader: R) -> Result<Vec<Link>> {
    read_rows(reader, LINKS_FILE, LINKS_COLUMNS)
}

pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    parse_movies_from_reader(open(path)?)
}

pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    parse_ratings_from_reader(open(path)?)
}

pub fn parse_tags(path: &Path) -> Result<Vec<Tag>> {
    parse_tags_from_reader(open(path)?)
}

pub fn parse_links(path: &Path) -> Result<Vec<Link>> {
    parse_links_from_reader(open(path)?)
}
