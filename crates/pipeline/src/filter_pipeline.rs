//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::CatalogEntry;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreSubstringFilter::new("Comedy"))
///     .add_filter(MinimumReviewsFilter::new(20));
///
/// let survivors = pipeline.apply(catalog.entries().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, logging counts around each stage.
    pub fn apply<'a>(&self, entries: Vec<CatalogEntry<'a>>) -> Vec<CatalogEntry<'a>> {
        let mut current = entries;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::MinimumReviewsFilter;
    use data_loader::{Movie, MovieStats};

    fn entry(movie: &Movie, rating_count: u32) -> CatalogEntry<'_> {
        CatalogEntry {
            movie,
            stats: MovieStats {
                avg_rating: 4.0,
                rating_count,
                rating_std: 0.0,
            },
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let a = Movie::new(1, "A", "Drama");
        let b = Movie::new(2, "B", "Comedy");

        let filtered = pipeline.apply(vec![entry(&a, 1), entry(&b, 2)]);
        assert!(pipeline.is_empty());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(MinimumReviewsFilter::new(5));
        let a = Movie::new(1, "A", "Drama");
        let b = Movie::new(2, "B", "Comedy");

        let filtered = pipeline.apply(vec![entry(&a, 1), entry(&b, 10)]);
        assert_eq!(pipeline.len(), 1);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].movie.id, 2);
    }
}
