//! Catalog building, statistics, validation and summary.
//!
//! Loading steps:
//! 1. Parse both tables (in parallel)
//! 2. Build primary indices (movie positions, ratings per user/movie)
//! 3. Compute per-movie statistics, zero-filled for unrated movies
//! 4. Validate and log any referential warnings

use crate::error::{DataLoadError, Result};
use crate::parser::{self, REQUIRED_MOVIE_COLUMNS};
use crate::types::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{info, warn};

/// File name of the movies table inside a data directory
pub const MOVIES_FILE: &str = "movies.csv";

/// File name of the ratings table inside a data directory
pub const RATINGS_FILE: &str = "ratings.csv";

/// Columns checked by [`Catalog::validate`] on the ratings table
pub const VALIDATED_RATING_COLUMNS: [&str; 4] = ["userId", "movieId", "rating", "timestamp"];

/// Non-fatal inconsistency between the two tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationWarning {
    /// Ratings reference movie ids that the movies table does not contain
    UnknownRatedMovies { ids: Vec<MovieId> },
}

/// Outcome of [`Catalog::validate`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub missing_movie_columns: Vec<String>,
    pub missing_rating_columns: Vec<String>,
    pub warnings: Vec<ValidationWarning>,
}

/// Dataset-wide summary figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub total_movies: usize,
    pub total_users: usize,
    pub total_ratings: usize,
    pub average_rating: Option<f32>,
    pub min_rating: Option<f32>,
    pub max_rating: Option<f32>,
    pub unique_genres: usize,
    /// ratings / (movies × users) × 100
    pub sparsity: f64,
}

impl Catalog {
    /// Load `movies.csv` and `ratings.csv` from a directory
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load(&data_dir.join(MOVIES_FILE), &data_dir.join(RATINGS_FILE))
    }

    /// Load the catalog from explicit movie and rating file paths.
    ///
    /// Fails if either file is missing or unparseable. Referential problems
    /// between the two tables are only logged.
    pub fn load(movies_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            movies = %movies_path.display(),
            ratings = %ratings_path.display(),
            "Loading catalog"
        );

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!(
            "Loaded {} movies, {} ratings",
            movies.rows.len(),
            ratings.rows.len()
        );

        let mut catalog = Self::from_parts(movies.rows, ratings.rows)?;
        catalog.movie_columns = movies.columns;
        catalog.rating_columns = ratings.columns;

        let report = catalog.validate();
        for warning in &report.warnings {
            match warning {
                ValidationWarning::UnknownRatedMovies { ids } => warn!(
                    count = ids.len(),
                    "Some movie IDs in ratings are not in the movies table"
                ),
            }
        }
        if !report.valid {
            warn!(
                missing_movie_columns = ?report.missing_movie_columns,
                missing_rating_columns = ?report.missing_rating_columns,
                "Catalog is missing expected columns"
            );
        }

        Ok(catalog)
    }

    /// Build a catalog from in-memory tables and compute statistics.
    ///
    /// Movie ids must be unique. Ratings are taken as they are: values are
    /// not range-checked and duplicate (user, movie) pairs are kept.
    pub fn from_parts(movies: Vec<Movie>, ratings: Vec<Rating>) -> Result<Self> {
        let mut catalog = Catalog {
            movie_columns: REQUIRED_MOVIE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rating_columns: VALIDATED_RATING_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            ..Catalog::default()
        };

        for (pos, movie) in movies.iter().enumerate() {
            if catalog.positions.insert(movie.id, pos).is_some() {
                return Err(DataLoadError::DuplicateMovieId { id: movie.id });
            }
        }
        catalog.movies = movies;

        for rating in &ratings {
            catalog
                .user_ratings
                .entry(rating.user_id)
                .or_default()
                .push(*rating);
            catalog
                .movie_ratings
                .entry(rating.movie_id)
                .or_default()
                .push(*rating);
        }
        catalog.ratings = ratings;

        catalog.compute_movie_stats();
        Ok(catalog)
    }

    /// Compute mean, count and standard deviation for every catalog movie.
    ///
    /// Movies without ratings get zeros, so the result always has one entry
    /// per movie.
    fn compute_movie_stats(&mut self) {
        let movie_ratings = &self.movie_ratings;
        self.movie_stats = self
            .movies
            .par_iter()
            .map(|movie| {
                let stats = movie_ratings
                    .get(&movie.id)
                    .map(|ratings| compute_stats(ratings))
                    .unwrap_or_default();
                (movie.id, stats)
            })
            .collect();
    }

    /// Distinct genre tokens across the catalog, sorted
    pub fn genre_vocabulary(&self) -> Vec<String> {
        self.movies
            .iter()
            .flat_map(|movie| movie.genre_tokens())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct user ids that appear in ratings, ascending
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.user_ratings.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Check required columns and cross-table references.
    ///
    /// Rated movie ids missing from the movies table produce a warning but
    /// do not make the catalog invalid.
    pub fn validate(&self) -> ValidationReport {
        let missing = |present: &[String], required: &[&str]| -> Vec<String> {
            required
                .iter()
                .filter(|col| !present.iter().any(|p| p.as_str() == **col))
                .map(|col| col.to_string())
                .collect()
        };
        let missing_movie_columns = missing(&self.movie_columns, &REQUIRED_MOVIE_COLUMNS);
        let missing_rating_columns = missing(&self.rating_columns, &VALIDATED_RATING_COLUMNS);

        let mut unknown: Vec<MovieId> = self
            .movie_ratings
            .keys()
            .filter(|id| !self.positions.contains_key(*id))
            .copied()
            .collect();
        unknown.sort_unstable();

        let mut warnings = Vec::new();
        if !unknown.is_empty() {
            warnings.push(ValidationWarning::UnknownRatedMovies { ids: unknown });
        }

        ValidationReport {
            valid: missing_movie_columns.is_empty() && missing_rating_columns.is_empty(),
            missing_movie_columns,
            missing_rating_columns,
            warnings,
        }
    }

    /// Dataset-wide counts and rating figures
    pub fn summary(&self) -> DataSummary {
        let total_movies = self
            .movies
            .iter()
            .map(|m| m.id)
            .collect::<HashSet<_>>()
            .len();
        let total_users = self.user_ratings.len();
        let total_ratings = self.ratings.len();

        let (average_rating, min_rating, max_rating) = if self.ratings.is_empty() {
            (None, None, None)
        } else {
            let values = self.ratings.iter().map(|r| r.rating);
            let sum: f64 = values.clone().map(f64::from).sum();
            let min = values.clone().fold(f32::INFINITY, f32::min);
            let max = values.fold(f32::NEG_INFINITY, f32::max);
            (Some((sum / total_ratings as f64) as f32), Some(min), Some(max))
        };

        let denominator = total_movies * total_users;
        let sparsity = if denominator == 0 {
            0.0
        } else {
            total_ratings as f64 / denominator as f64 * 100.0
        };

        DataSummary {
            total_movies,
            total_users,
            total_ratings,
            average_rating,
            min_rating,
            max_rating,
            unique_genres: self.genre_vocabulary().len(),
            sparsity,
        }
    }
}

/// Mean, count and sample standard deviation, rounded to two decimals
fn compute_stats(ratings: &[Rating]) -> MovieStats {
    let count = ratings.len();
    if count == 0 {
        return MovieStats::default();
    }

    let mean = ratings.iter().map(|r| f64::from(r.rating)).sum::<f64>() / count as f64;
    let std = if count > 1 {
        let var = ratings
            .iter()
            .map(|r| (f64::from(r.rating) - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };

    MovieStats {
        avg_rating: round2(mean),
        rating_count: count as u32,
        rating_std: round2(std),
    }
}

/// Two decimals, ties to even
fn round2(value: f64) -> f32 {
    ((value * 100.0).round_ties_even() / 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rating(user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating: value,
            timestamp: 0,
        }
    }

    fn sample_catalog() -> Catalog {
        let movies = vec![
            Movie::new(1, "Movie A (2020)", "Action|Adventure"),
            Movie::new(2, "Movie B (2019)", "Comedy"),
            Movie::new(3, "Movie C", ""),
        ];
        let ratings = vec![
            rating(1, 1, 4.0),
            rating(2, 1, 5.0),
            rating(1, 2, 3.5),
            rating(3, 99, 2.0),
        ];
        Catalog::from_parts(movies, ratings).unwrap()
    }

    #[test]
    fn test_stats_cover_every_movie() {
        let catalog = sample_catalog();

        assert_eq!(catalog.movie_stats.len(), 3);
        let a = catalog.get_movie_stats(1);
        assert_eq!(a.rating_count, 2);
        assert_eq!(a.avg_rating, 4.5);
        assert_eq!(a.rating_std, 0.71);

        let b = catalog.get_movie_stats(2);
        assert_eq!(b.rating_count, 1);
        assert_eq!(b.rating_std, 0.0);

        assert_eq!(catalog.get_movie_stats(3), MovieStats::default());
    }

    #[test]
    fn test_stats_round_half_to_even() {
        // Mean is exactly 3.125
        let movies = vec![Movie::new(1, "Tie", "Drama")];
        let ratings = vec![
            rating(1, 1, 3.0),
            rating(2, 1, 3.0),
            rating(3, 1, 3.5),
            rating(4, 1, 3.0),
        ];
        let catalog = Catalog::from_parts(movies, ratings).unwrap();

        assert_eq!(catalog.get_movie_stats(1).avg_rating, 3.12);
    }

    #[test]
    fn test_duplicate_pairs_both_count() {
        let movies = vec![Movie::new(1, "Dup", "Drama")];
        let ratings = vec![rating(1, 1, 2.0), rating(1, 1, 4.0)];
        let catalog = Catalog::from_parts(movies, ratings).unwrap();

        let stats = catalog.get_movie_stats(1);
        assert_eq!(stats.rating_count, 2);
        assert_eq!(stats.avg_rating, 3.0);
    }

    #[test]
    fn test_duplicate_movie_id_rejected() {
        let movies = vec![Movie::new(1, "One", ""), Movie::new(1, "Other", "")];
        let err = Catalog::from_parts(movies, Vec::new()).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateMovieId { id: 1 }));
    }

    #[test]
    fn test_validate_warns_on_unknown_movies() {
        let catalog = sample_catalog();
        let report = catalog.validate();

        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec![ValidationWarning::UnknownRatedMovies { ids: vec![99] }]
        );
    }

    #[test]
    fn test_summary() {
        let catalog = sample_catalog();
        let summary = catalog.summary();

        assert_eq!(summary.total_movies, 3);
        assert_eq!(summary.total_users, 3);
        assert_eq!(summary.total_ratings, 4);
        assert_eq!(summary.min_rating, Some(2.0));
        assert_eq!(summary.max_rating, Some(5.0));
        assert!((summary.average_rating.unwrap() - 3.625).abs() < 1e-6);
        assert_eq!(summary.unique_genres, 3);
        assert!((summary.sparsity - 4.0 / 9.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let catalog = Catalog::from_parts(Vec::new(), Vec::new()).unwrap();
        let summary = catalog.summary();

        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.sparsity, 0.0);
    }

    #[test]
    fn test_genre_vocabulary_sorted_and_distinct() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.genre_vocabulary(),
            vec!["Action", "Adventure", "Comedy"]
        );
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MOVIES_FILE),
            "movieId,title,genres\n1,Heat (1995),Action|Crime|Thriller\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(RATINGS_FILE),
            "userId,movieId,rating\n7,1,4.0\n",
        )
        .unwrap();

        let catalog = Catalog::load_from_dir(dir.path()).unwrap();
        assert_eq!(catalog.counts(), (1, 1, 1));
        assert_eq!(catalog.get_movie(1).unwrap().title, "Heat");

        // Loaded without a timestamp column, so validation flags it
        let report = catalog.validate();
        assert!(!report.valid);
        assert_eq!(report.missing_rating_columns, vec!["timestamp"]);
    }

    #[test]
    fn test_load_missing_ratings_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MOVIES_FILE), "movieId,title,genres\n").unwrap();

        let err = Catalog::load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
