//! Neighborhood Predictor - user-based collaborative filtering
//!
//! "Users who rate like you rated these movies highly"
//!
//! ## Algorithm
//! 1. Cosine similarity between the target user's zero-filled row and every
//!    other user's row
//! 2. Keep the top `k` users (stable sort, so ties keep ascending user id)
//! 3. For each movie the target has not rated, in ascending movie id order,
//!    predict the similarity-weighted mean of the neighbors who rated it
//!    (plain mean when their similarities sum to zero)
//! 4. Rank predictions descending and keep `limit`
//!
//! Movies no neighbor rated get no prediction and are skipped.

use crate::matrix::UserMovieMatrix;
use crate::similarity::cosine_similarity;
use crate::types::{Recommendation, RecommendationSource, assign_ranks, descending};
use data_loader::{Catalog, CatalogEntry, MovieId, UserId};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Neighborhood size used when the caller does not pick one
pub const DEFAULT_K: usize = 100;

/// Predicts ratings for unseen movies from the most similar users
pub struct NeighborhoodPredictor {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Built once from every rating in the catalog
    matrix: UserMovieMatrix,
}

impl NeighborhoodPredictor {
    /// Create a predictor, building the user × movie matrix
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let matrix = UserMovieMatrix::from_ratings(catalog.ratings());
        let (users, movies) = matrix.dims();
        debug!("Built rating matrix: {} users x {} movies", users, movies);
        Self { catalog, matrix }
    }

    /// The underlying rating matrix
    pub fn matrix(&self) -> &UserMovieMatrix {
        &self.matrix
    }

    /// Up to `k` most similar users with their similarity, best first.
    ///
    /// Empty for a user with no ratings.
    pub fn neighbors(&self, user_id: UserId, k: usize) -> Vec<(UserId, f32)> {
        self.matrix
            .user_position(user_id)
            .map(|row| {
                self.neighbor_rows(row, k)
                    .into_iter()
                    .map(|(other, sim)| (self.matrix.user_ids()[other], sim))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Similarities against every other row, sorted best first and cut to `k`
    fn neighbor_rows(&self, row: usize, k: usize) -> Vec<(usize, f32)> {
        let target = self.matrix.filled_row(row);
        let (users, _) = self.matrix.dims();

        // Collect keeps row order, so the stable sort below breaks ties by user id
        let mut similarities: Vec<(usize, f32)> = (0..users)
            .into_par_iter()
            .filter(|&other| other != row)
            .map(|other| (other, cosine_similarity(target, self.matrix.filled_row(other))))
            .collect();

        similarities.sort_by(|a, b| descending(a.1, b.1));
        similarities.truncate(k);
        similarities
    }

    /// Predicted rating for one matrix column, or `None` if no neighbor rated it
    fn predict_column(&self, neighbors: &[(usize, f32)], col: usize) -> Option<f32> {
        let rated: Vec<(f32, f32)> = neighbors
            .iter()
            .filter_map(|&(other, sim)| self.matrix.row(other)[col].map(|r| (sim, r)))
            .collect();
        if rated.is_empty() {
            return None;
        }

        let weight_sum: f32 = rated.iter().map(|(sim, _)| sim).sum();
        let prediction = if weight_sum == 0.0 {
            rated.iter().map(|(_, r)| r).sum::<f32>() / rated.len() as f32
        } else {
            rated.iter().map(|(sim, r)| sim * r).sum::<f32>() / weight_sum
        };
        Some(prediction)
    }

    /// Top `limit` unseen movies by predicted rating for `user_id`.
    ///
    /// Unknown users and neighborhoods that produce no prediction give an
    /// empty result. Never returns a movie the user already rated.
    #[instrument(skip(self))]
    pub fn recommend(&self, user_id: UserId, limit: usize, k: usize) -> Vec<Recommendation> {
        let Some(row) = self.matrix.user_position(user_id) else {
            info!("User {} has no ratings, nothing to predict", user_id);
            return Vec::new();
        };

        let neighbors = self.neighbor_rows(row, k);
        debug!("Selected {} neighbors for user {}", neighbors.len(), user_id);

        let target = self.matrix.row(row);
        let movie_ids = self.matrix.movie_ids();

        // Columns are in ascending movie id, which fixes the tie order
        let mut predictions: Vec<(MovieId, f32)> = (0..movie_ids.len())
            .into_par_iter()
            .filter(|&col| target[col].is_none())
            .filter(|&col| self.catalog.get_movie(movie_ids[col]).is_some())
            .filter_map(|col| {
                self.predict_column(&neighbors, col)
                    .map(|prediction| (movie_ids[col], prediction))
            })
            .collect();

        if predictions.is_empty() {
            info!("No movie received a prediction for user {}", user_id);
            return Vec::new();
        }

        predictions.sort_by(|a, b| descending(a.1, b.1));

        let mut recommendations: Vec<Recommendation> = predictions
            .into_iter()
            .take(limit)
            .filter_map(|(movie_id, prediction)| {
                let movie = self.catalog.get_movie(movie_id)?;
                let entry = CatalogEntry {
                    movie,
                    stats: self.catalog.get_movie_stats(movie_id),
                };
                Some(Recommendation::from_entry(
                    entry,
                    prediction,
                    RecommendationSource::Collaborative,
                ))
            })
            .collect();
        assign_ranks(&mut recommendations);

        debug!("Generated {} collaborative recommendations", recommendations.len());
        recommendations
    }
}
