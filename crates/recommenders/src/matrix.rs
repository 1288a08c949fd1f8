//! Dense user × movie rating matrix.
//!
//! Rows are users and columns are rated movies, both in ascending id order.
//! A cell is `None` when the user never rated the movie. Repeated ratings of
//! the same pair collapse to their mean.

use data_loader::{MovieId, Rating, UserId};
use std::collections::HashMap;

/// Rating matrix with an unfilled view (`Option` cells) and a zero-filled
/// view used for similarity.
#[derive(Debug, Clone, Default)]
pub struct UserMovieMatrix {
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
    user_index: HashMap<UserId, usize>,
    movie_index: HashMap<MovieId, usize>,

    /// Row-major, `user_ids.len() * movie_ids.len()` cells
    cells: Vec<Option<f32>>,
    /// Same layout as `cells` with missing ratings as 0.0
    filled: Vec<f32>,
}

impl UserMovieMatrix {
    /// Build the matrix from raw ratings
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let mut user_ids: Vec<UserId> = ratings.iter().map(|r| r.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let mut movie_ids: Vec<MovieId> = ratings.iter().map(|r| r.movie_id).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let user_index: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let width = movie_ids.len();
        let size = user_ids.len() * width;

        // (sum, count) per cell so duplicates average
        let mut sums = vec![0.0_f64; size];
        let mut counts = vec![0_u32; size];
        for rating in ratings {
            let idx = user_index[&rating.user_id] * width + movie_index[&rating.movie_id];
            sums[idx] += f64::from(rating.rating);
            counts[idx] += 1;
        }

        let cells: Vec<Option<f32>> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| (count > 0).then(|| (sum / f64::from(count)) as f32))
            .collect();
        let filled = cells.iter().map(|cell| cell.unwrap_or(0.0)).collect();

        Self {
            user_ids,
            movie_ids,
            user_index,
            movie_index,
            cells,
            filled,
        }
    }

    /// Users (rows) in ascending order
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Movies (columns) in ascending order
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// (rows, columns)
    pub fn dims(&self) -> (usize, usize) {
        (self.user_ids.len(), self.movie_ids.len())
    }

    /// Row position of a user
    pub fn user_position(&self, user_id: UserId) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    /// Zero-filled ratings row at a row position
    pub fn filled_row(&self, row: usize) -> &[f32] {
        let width = self.movie_ids.len();
        &self.filled[row * width..(row + 1) * width]
    }

    /// Unfilled ratings row at a row position
    pub fn row(&self, row: usize) -> &[Option<f32>] {
        let width = self.movie_ids.len();
        &self.cells[row * width..(row + 1) * width]
    }

    /// The (averaged) rating a user gave a movie, if any
    pub fn get(&self, user_id: UserId, movie_id: MovieId) -> Option<f32> {
        let row = self.user_position(user_id)?;
        let col = *self.movie_index.get(&movie_id)?;
        self.row(row)[col]
    }
}
