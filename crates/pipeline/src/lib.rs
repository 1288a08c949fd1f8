//! Pipeline for filtering catalog entries before ranking.
//!
//! This crate provides:
//! - Filter trait and implementations for catalog filtering
//! - FilterPipeline for composing filters
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenreSubstringFilter::new("Action"))
//!     .add_filter(MinimumReviewsFilter::new(50));
//!
//! let survivors = pipeline.apply(catalog.entries().collect());
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
