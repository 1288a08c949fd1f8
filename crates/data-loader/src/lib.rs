//! # Data Loader Crate
//!
//! This crate loads the movies and ratings tables and indexes them into an
//! in-memory [`Catalog`].
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, MovieStats, Catalog)
//! - **parser**: Parse CSV files into Rust structs, normalizing headers
//! - **index**: Build indices, statistics, validation and summary
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_dir(Path::new("data/raw"))?;
//!
//! let movie = catalog.get_movie(1).unwrap();
//! let stats = catalog.get_movie_stats(1);
//! println!("{} ({:?}): {:.2} over {} ratings",
//!     movie.title, movie.year, stats.avg_rating, stats.rating_count);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod types;

pub use error::{DataLoadError, Result};
pub use index::{DataSummary, ValidationReport, ValidationWarning};
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Catalog,
    CatalogEntry,
    Movie,
    MovieStats,
    Rating,
    // Helpers
    split_title_and_year,
};
