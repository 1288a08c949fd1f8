//! Filter to keep only movies whose genre string mentions a token.
//!
//! Matching is a case-insensitive substring test on the raw pipe-delimited
//! genre string, not membership in the parsed genre set: "com" keeps
//! "Comedy", and "Sci" keeps "Sci-Fi".

use crate::traits::Filter;
use data_loader::CatalogEntry;

/// Keeps entries whose raw genre string contains the query, ignoring case.
///
/// An empty query keeps everything.
pub struct GenreSubstringFilter {
    needle: String,
}

impl GenreSubstringFilter {
    /// Create a new GenreSubstringFilter for `genre`.
    pub fn new(genre: &str) -> Self {
        Self {
            needle: genre.to_lowercase(),
        }
    }
}

impl Filter for GenreSubstringFilter {
    fn name(&self) -> &str {
        "GenreSubstringFilter"
    }

    fn apply<'a>(&self, entries: Vec<CatalogEntry<'a>>) -> Vec<CatalogEntry<'a>> {
        if self.needle.is_empty() {
            return entries;
        }

        entries
            .into_iter()
            .filter(|entry| entry.movie.genres.to_lowercase().contains(&self.needle))
            .collect()
    }
}
