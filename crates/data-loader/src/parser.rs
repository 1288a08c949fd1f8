//! Parser for the movies and ratings CSV tables.
//!
//! - movies.csv: movieId,title,genres
//! - ratings.csv: userId,movieId,rating,timestamp
//!
//! Header cells are normalized before use: surrounding whitespace and stray
//! quote characters are removed, so `" 'userId' "` reads as `userId`.

use crate::error::{DataLoadError, Result};
use crate::types::{Movie, MovieId, Rating, UserId};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Columns the movies table must provide for loading
pub const REQUIRED_MOVIE_COLUMNS: [&str; 3] = ["movieId", "title", "genres"];

/// Columns the ratings table must provide for loading
///
/// `timestamp` is optional at load time; validation reports its absence.
pub const REQUIRED_RATING_COLUMNS: [&str; 3] = ["userId", "movieId", "rating"];

/// A parsed table together with its normalized header
#[derive(Debug)]
pub struct Table<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MovieRow {
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    title: String,
    #[serde(default)]
    genres: String,
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "userId")]
    user_id: UserId,
    #[serde(rename = "movieId")]
    movie_id: MovieId,
    rating: f32,
    #[serde(default)]
    timestamp: i64,
}

/// Trim whitespace and stray `'`/`"` from a header cell.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string()
}

/// Read a whole file as text.
///
/// Falls back to ISO-8859-1 (Latin-1) when the bytes are not valid UTF-8;
/// every Latin-1 byte maps directly to the code point of the same value.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => Ok(err.into_bytes().iter().map(|&b| b as char).collect()),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Deserialize every record of `text` into `T` after normalizing headers.
fn parse_table<T>(text: &str, file: &str, required: &[&str]) -> Result<Table<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Fields)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: 1,
        reason: format!("Failed to read header: {}", e),
    })?;
    let columns: Vec<String> = headers.iter().map(normalize_column_name).collect();

    for column in required {
        if !columns.iter().any(|c| c == column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }
    reader.set_headers(csv::StringRecord::from(columns.clone()));

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let row = record.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    Ok(Table { columns, rows })
}

/// Parse movies from CSV text. `file` labels errors.
pub fn parse_movies_str(text: &str, file: &str) -> Result<Table<Movie>> {
    let table = parse_table::<MovieRow>(text, file, &REQUIRED_MOVIE_COLUMNS)?;
    Ok(Table {
        columns: table.columns,
        rows: table
            .rows
            .into_iter()
            .map(|row| Movie::new(row.movie_id, row.title, row.genres))
            .collect(),
    })
}

/// Parse ratings from CSV text. `file` labels errors.
pub fn parse_ratings_str(text: &str, file: &str) -> Result<Table<Rating>> {
    let table = parse_table::<RatingRow>(text, file, &REQUIRED_RATING_COLUMNS)?;
    Ok(Table {
        columns: table.columns,
        rows: table
            .rows
            .into_iter()
            .map(|row| Rating {
                user_id: row.user_id,
                movie_id: row.movie_id,
                rating: row.rating,
                timestamp: row.timestamp,
            })
            .collect(),
    })
}

/// Parse the movies file
pub fn parse_movies(path: &Path) -> Result<Table<Movie>> {
    let text = read_text(path)?;
    parse_movies_str(&text, &file_label(path))
}

/// Parse the ratings file
pub fn parse_ratings(path: &Path) -> Result<Table<Rating>> {
    let text = read_text(path)?;
    parse_ratings_str(&text, &file_label(path))
}
