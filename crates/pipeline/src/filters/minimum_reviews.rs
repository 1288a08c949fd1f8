//! Filter to enforce a review-count floor.
//!
//! Unrated movies carry a count of zero, so any floor above zero drops them.

use crate::traits::Filter;
use data_loader::CatalogEntry;

/// Removes entries with fewer than `min_reviews` ratings.
pub struct MinimumReviewsFilter {
    min_reviews: u32,
}

impl MinimumReviewsFilter {
    /// Create a new MinimumReviewsFilter.
    ///
    /// # Arguments
    /// * `min_reviews` - Minimum number of ratings a movie needs to survive
    pub fn new(min_reviews: u32) -> Self {
        Self { min_reviews }
    }
}

impl Filter for MinimumReviewsFilter {
    fn name(&self) -> &str {
        "MinimumReviewsFilter"
    }

    fn apply<'a>(&self, entries: Vec<CatalogEntry<'a>>) -> Vec<CatalogEntry<'a>> {
        entries
            .into_iter()
            .filter(|entry| entry.stats.rating_count >= self.min_reviews)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, Movie, Rating};

    fn create_test_catalog() -> Catalog {
        let movies = vec![
            Movie::new(1, "Many Ratings", "Drama"),
            Movie::new(2, "Few Ratings", "Drama"),
            Movie::new(3, "No Ratings", "Drama"),
        ];

        let mut ratings = Vec::new();
        for user_id in 0..20 {
            ratings.push(Rating {
                user_id,
                movie_id: 1,
                rating: 4.5,
                timestamp: 1000000,
            });
        }
        for user_id in 0..5 {
            ratings.push(Rating {
                user_id,
                movie_id: 2,
                rating: 4.5,
                timestamp: 1000000,
            });
        }

        Catalog::from_parts(movies, ratings).unwrap()
    }

    #[test]
    fn test_minimum_reviews_filter() {
        let catalog = create_test_catalog();

        let filtered = MinimumReviewsFilter::new(10).apply(catalog.entries().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].movie.id, 1);
    }

    #[test]
    fn test_floor_is_inclusive() {
        let catalog = create_test_catalog();

        let filtered = MinimumReviewsFilter::new(5).apply(catalog.entries().collect());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_zero_floor_keeps_unrated() {
        let catalog = create_test_catalog();

        let filtered = MinimumReviewsFilter::new(0).apply(catalog.entries().collect());
        assert_eq!(filtered.len(), 3);
    }
}
