//! # Recommenders Crate
//!
//! Ranking engines over a loaded [`data_loader::Catalog`].
//!
//! ## Components
//!
//! ### Popularity Ranker
//! Best-rated movies, optionally restricted to a genre substring and a
//! minimum number of ratings.
//!
//! ### Content Similarity Engine
//! "More like this": binary genre vectors compared by cosine similarity
//! against a movie found by title.
//!
//! ### Neighborhood Predictor
//! User-based collaborative filtering over a dense user × movie matrix:
//! - Top-k users by cosine similarity of rating rows
//! - Similarity-weighted mean of their ratings for each unseen movie
//!
//! Every engine returns a ranked `Vec<Recommendation>`. "Nothing qualified"
//! (unknown user, unknown title, empty filters) is an empty vector, not an
//! error.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use recommenders::{ContentSimilarityEngine, NeighborhoodPredictor, PopularityRanker, DEFAULT_K};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_dir("data/raw".as_ref())?);
//!
//! let popular = PopularityRanker::new(catalog.clone()).recommend(Some("Comedy"), 50, 10);
//! let similar = ContentSimilarityEngine::new(catalog.clone()).recommend("Toy Story", 10);
//! let predicted = NeighborhoodPredictor::new(catalog.clone()).recommend(1, 10, DEFAULT_K);
//! ```
//!
//! All engines are `Send + Sync` and can be shared across threads behind an
//! `Arc` once built.

pub mod collaborative;
pub mod content;
pub mod matrix;
pub mod popularity;
pub mod similarity;
pub mod types;

pub use collaborative::{DEFAULT_K, NeighborhoodPredictor};
pub use content::ContentSimilarityEngine;
pub use matrix::UserMovieMatrix;
pub use popularity::PopularityRanker;
pub use similarity::cosine_similarity;
pub use types::{Recommendation, RecommendationSource, assign_ranks};
