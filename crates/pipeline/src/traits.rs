//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to catalog entries.

use data_loader::CatalogEntry;

/// Core trait for filtering catalog entries.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by engines used from several threads
/// - Filters take ownership of the Vec and return the survivors in their
///   original relative order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of entries.
    ///
    /// Filtering never fails: an empty output means nothing qualified.
    fn apply<'a>(&self, entries: Vec<CatalogEntry<'a>>) -> Vec<CatalogEntry<'a>>;
}
