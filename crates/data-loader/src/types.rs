//! Core domain types for the movie catalog.
//!
//! The catalog is loaded once and never mutated afterwards. Engines share it
//! behind an `Arc` and read from it concurrently without locking.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

/// Separator between genre tokens in the raw genres column
pub const GENRE_DELIMITER: char = '|';

// =============================================================================
// Movie
// =============================================================================

/// A movie row from the movies table.
///
/// `title` is the display name: the raw title with any trailing `(YYYY)`
/// removed. The raw string is kept in `original_title`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
    /// Year taken from a trailing `(YYYY)` in the raw title
    pub year: Option<u16>,
    /// Raw pipe-delimited genre string, possibly empty
    pub genres: String,
}

impl Movie {
    /// Build a movie from its raw table values, splitting title and year.
    pub fn new(id: MovieId, raw_title: impl Into<String>, genres: impl Into<String>) -> Self {
        let original_title = raw_title.into();
        let (title, year) = split_title_and_year(&original_title);
        Self {
            id,
            title: title.to_string(),
            original_title,
            year,
            genres: genres.into(),
        }
    }

    /// Re-derive `title` and `year` from `original_title`.
    ///
    /// Always starts from the raw title, so applying it any number of times
    /// leaves the movie unchanged.
    pub fn normalize_title(&mut self) {
        let (title, year) = split_title_and_year(&self.original_title);
        self.title = title.to_string();
        self.year = year;
    }

    /// Genre tokens in the order they appear in the raw string.
    pub fn genre_tokens(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split(GENRE_DELIMITER)
            .filter(|token| !token.is_empty())
    }
}

/// Split `"Name (YYYY)"` into `("Name", Some(YYYY))`.
///
/// Only a parenthesised group of exactly four ASCII digits at the very end of
/// the string counts. Whitespace in front of the group is dropped with it.
/// Titles without the suffix come back whole with no year.
pub fn split_title_and_year(raw: &str) -> (&str, Option<u16>) {
    let bytes = raw.as_bytes();
    let len = bytes.len();
    if len < 6 || bytes[len - 1] != b')' || bytes[len - 6] != b'(' {
        return (raw, None);
    }

    let digits = &raw[len - 5..len - 1];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (raw, None);
    }

    match digits.parse::<u16>() {
        Ok(year) => (raw[..len - 6].trim_end(), Some(year)),
        Err(_) => (raw, None),
    }
}

// =============================================================================
// Rating
// =============================================================================

/// A single rating from a user for a movie.
///
/// The range is not validated and the same (user, movie) pair may occur more
/// than once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
    /// Unix timestamp when the rating was made (not used for ranking)
    pub timestamp: i64,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Aggregate rating statistics for one movie.
///
/// Movies with no ratings carry all zeros rather than missing values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieStats {
    pub avg_rating: f32,
    pub rating_count: u32,
    pub rating_std: f32,
}

/// A movie paired with its statistics, the unit that ranking filters see
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry<'a> {
    pub movie: &'a Movie,
    pub stats: MovieStats,
}

// =============================================================================
// Catalog - The Core In-Memory Store
// =============================================================================

/// Movies and ratings for one process run, with lookup indices and
/// per-movie statistics.
///
/// Movies keep their table order. That order is the "storage order" used
/// wherever ties need a deterministic winner.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: Vec<Movie>,
    /// Position of each movie in `movies`
    pub(crate) positions: HashMap<MovieId, usize>,
    pub(crate) ratings: Vec<Rating>,

    /// All ratings made by each user
    pub(crate) user_ratings: HashMap<UserId, Vec<Rating>>,
    /// All ratings received by each movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<Rating>>,

    /// One entry per catalog movie
    pub(crate) movie_stats: HashMap<MovieId, MovieStats>,

    /// Normalized column names seen when loading, used by validation
    pub(crate) movie_columns: Vec<String>,
    pub(crate) rating_columns: Vec<String>,
}

impl Catalog {
    /// All movies in storage order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// All ratings in load order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Statistics for a movie; zeros if it has no ratings or is unknown.
    pub fn get_movie_stats(&self, movie_id: MovieId) -> MovieStats {
        self.movie_stats
            .get(&movie_id)
            .copied()
            .unwrap_or_default()
    }

    /// Get all ratings made by a user
    pub fn get_user_ratings(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all ratings for a movie
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every movie joined with its statistics, in storage order
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> + '_ {
        self.movies.iter().map(|movie| CatalogEntry {
            movie,
            stats: self.get_movie_stats(movie.id),
        })
    }

    /// Counts of (distinct users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.user_ratings.len(), self.movies.len(), self.ratings.len())
    }
}
