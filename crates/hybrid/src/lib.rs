//! Hybrid crate for the MyNextMovie recommendation engine.
//!
//! [`HybridBlender`] owns one instance of each engine over a shared catalog.
//! It blends collaborative and popularity results with flat per-source
//! weights, and it dispatches a named strategy after checking that the
//! strategy's parameters are present.
//!
//! ```ignore
//! let blender = HybridBlender::new(catalog);
//! let blended = blender.combine(42, 10, HybridWeights::default());
//!
//! let params = RecommendParams {
//!     movie_title: Some("Heat".into()),
//!     limit: Some(10),
//!     ..Default::default()
//! };
//! let similar = blender.recommend("content", &params)?;
//! ```

pub mod blender;
pub mod error;
pub mod request;

pub use blender::{
    HYBRID_MIN_REVIEWS, HYBRID_POPULARITY_GENRE, HybridBlender, HybridWeights, blend,
};
pub use error::{InvalidRequestError, Result};
pub use request::{RecommendParams, Strategy};
