//! Popularity Ranker - best-rated movies, optionally within a genre
//!
//! ## Algorithm
//! 1. Keep movies whose genre string contains the requested genre
//!    (case-insensitive substring; no genre keeps everything)
//! 2. Keep movies with at least `min_reviews` ratings
//! 3. Sort by mean rating, then rating count, both descending
//! 4. Return the first `limit`
//!
//! There is no Bayesian shrinkage: with a floor of zero, a single 5.0 rating
//! outranks a 4.9 mean over thousands of ratings.

use crate::types::{Recommendation, RecommendationSource, assign_ranks};
use data_loader::{Catalog, CatalogEntry};
use pipeline::FilterPipeline;
use pipeline::filters::{GenreSubstringFilter, MinimumReviewsFilter};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks catalog movies by rating statistics
#[derive(Clone)]
pub struct PopularityRanker {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,
}

impl PopularityRanker {
    /// Create a new popularity ranker
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Top `limit` movies by (mean rating desc, rating count desc).
    ///
    /// `genre` of `None` or `""` applies no genre filter. Returns an empty
    /// list when nothing survives the filters.
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        genre: Option<&str>,
        min_reviews: u32,
        limit: usize,
    ) -> Vec<Recommendation> {
        let mut pipeline = FilterPipeline::new();
        if let Some(genre) = genre.filter(|g| !g.is_empty()) {
            pipeline = pipeline.add_filter(GenreSubstringFilter::new(genre));
        }
        let pipeline = pipeline.add_filter(MinimumReviewsFilter::new(min_reviews));

        let mut survivors: Vec<CatalogEntry<'_>> = pipeline.apply(self.catalog.entries().collect());
        if survivors.is_empty() {
            debug!("No movies passed the popularity filters");
            return Vec::new();
        }

        // Stable: full ties keep storage order
        survivors.sort_by(|a, b| {
            b.stats
                .avg_rating
                .total_cmp(&a.stats.avg_rating)
                .then_with(|| b.stats.rating_count.cmp(&a.stats.rating_count))
        });

        let mut recommendations: Vec<Recommendation> = survivors
            .into_iter()
            .take(limit)
            .map(|entry| {
                Recommendation::from_entry(
                    entry,
                    entry.stats.avg_rating,
                    RecommendationSource::Popularity,
                )
            })
            .collect();
        assign_ranks(&mut recommendations);

        debug!("Generated {} popularity recommendations", recommendations.len());
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Movie, Rating};

    fn ratings_for(movie_id: u32, values: &[f32]) -> Vec<Rating> {
        values
            .iter()
            .enumerate()
            .map(|(idx, &rating)| Rating {
                user_id: idx as u32 + 1,
                movie_id,
                rating,
                timestamp: 1000000,
            })
            .collect()
    }

    fn create_test_catalog() -> Arc<Catalog> {
        let movies = vec![
            Movie::new(1, "Action Movie A", "Action"),
            Movie::new(2, "Comedy Movie B", "Comedy"),
            Movie::new(3, "Drama Movie C", "Drama"),
            Movie::new(4, "Action Movie D", "Action"),
            Movie::new(5, "Romance Movie E", "Romance"),
            Movie::new(6, "Action Movie F", "Action|Thriller"),
        ];

        let mut ratings = Vec::new();
        ratings.extend(ratings_for(1, &[4.5; 100]));
        ratings.extend(ratings_for(2, &[3.8; 50]));
        ratings.extend(ratings_for(3, &[4.2; 80]));
        ratings.extend(ratings_for(4, &[4.0; 120]));
        ratings.extend(ratings_for(5, &[3.5; 30]));
        ratings.extend(ratings_for(6, &[4.0; 60]));

        Arc::new(Catalog::from_parts(movies, ratings).unwrap())
    }

    #[test]
    fn test_genre_and_floor() {
        let ranker = PopularityRanker::new(create_test_catalog());
        let recs = ranker.recommend(Some("Action"), 50, 2);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].movie_id, 1);
        // 4 and 6 tie on mean; 4 has more ratings
        assert_eq!(recs[1].movie_id, 4);
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[1].rank, 2);
    }

    #[test]
    fn test_sorted_by_mean_then_count() {
        let ranker = PopularityRanker::new(create_test_catalog());
        let recs = ranker.recommend(None, 0, 10);

        assert_eq!(recs.len(), 6);
        for pair in recs.windows(2) {
            assert!(pair[0].avg_rating >= pair[1].avg_rating);
            if pair[0].avg_rating == pair[1].avg_rating {
                assert!(pair[0].rating_count >= pair[1].rating_count);
            }
        }
    }

    #[test]
    fn test_no_results() {
        let ranker = PopularityRanker::new(create_test_catalog());
        assert!(ranker.recommend(Some("Sci-Fi"), 50, 5).is_empty());
        assert!(ranker.recommend(Some("Action"), 1000, 5).is_empty());
    }

    #[test]
    fn test_empty_genre_means_all() {
        let ranker = PopularityRanker::new(create_test_catalog());
        assert_eq!(ranker.recommend(Some(""), 0, 10).len(), 6);
    }

    #[test]
    fn test_single_high_rating_outranks_large_average() {
        let movies = vec![
            Movie::new(1, "Loved By Many", "Drama"),
            Movie::new(2, "Loved By One", "Drama"),
        ];
        let mut ratings = ratings_for(1, &[4.9; 200]);
        ratings.extend(ratings_for(2, &[5.0]));
        let ranker = PopularityRanker::new(Arc::new(Catalog::from_parts(movies, ratings).unwrap()));

        let recs = ranker.recommend(Some("Drama"), 0, 2);
        assert_eq!(recs[0].movie_id, 2);

        let recs = ranker.recommend(Some("Drama"), 2, 2);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie_id, 1);
    }

    #[test]
    fn test_zero_review_movies_excluded_by_floor() {
        let movies = vec![Movie::new(1, "Rated", "Drama"), Movie::new(2, "Unrated", "Drama")];
        let ranker = PopularityRanker::new(Arc::new(
            Catalog::from_parts(movies, ratings_for(1, &[3.0])).unwrap(),
        ));

        let recs = ranker.recommend(None, 1, 10);
        assert_eq!(recs.len(), 1);

        let recs = ranker.recommend(None, 0, 10);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].avg_rating, 0.0);
    }
}
