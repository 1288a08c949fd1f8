//! Filter implementations for the catalog pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod genre_substring;
pub mod minimum_reviews;

// Re-export for convenience
pub use genre_substring::GenreSubstringFilter;
pub use minimum_reviews::MinimumReviewsFilter;
