//! Content Similarity Engine - "more like this movie"
//!
//! Every movie is encoded once, at construction, as a binary vector over the
//! sorted genre vocabulary. A query title is resolved to one catalog movie
//! and every other movie is ranked by cosine similarity to it.
//!
//! ## Title resolution
//! 1. Drop a trailing `(YYYY)` from the query and trim it
//! 2. Exact case-insensitive match on display titles
//! 3. Otherwise case-insensitive substring match
//! 4. First match in storage order wins; no match is an empty result

use crate::similarity::cosine_similarity;
use crate::types::{Recommendation, RecommendationSource, assign_ranks, descending};
use data_loader::{Catalog, CatalogEntry, Movie, MovieId, split_title_and_year};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ranks movies by genre overlap with a query movie
pub struct ContentSimilarityEngine {
    catalog: Arc<Catalog>,

    /// Sorted distinct genre tokens; position i is feature i
    vocabulary: Vec<String>,

    /// One feature vector per movie, aligned with `catalog.movies()`
    features: Vec<Vec<f32>>,

    /// Lowercased display titles, aligned with `catalog.movies()`
    lowered_titles: Vec<String>,
}

impl ContentSimilarityEngine {
    /// Build the vocabulary and feature vectors for every catalog movie
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let vocabulary = catalog.genre_vocabulary();
        let positions: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(idx, genre)| (genre.as_str(), idx))
            .collect();

        let features = catalog
            .movies()
            .iter()
            .map(|movie| encode_genres(movie, &positions, vocabulary.len()))
            .collect();
        let lowered_titles = catalog
            .movies()
            .iter()
            .map(|movie| movie.title.to_lowercase())
            .collect();

        debug!(
            "Built {} feature vectors over {} genres",
            catalog.movies().len(),
            vocabulary.len()
        );

        Self {
            catalog,
            vocabulary,
            features,
            lowered_titles,
        }
    }

    /// Genre tokens backing each feature position
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Feature vector of a movie, if it is in the catalog
    pub fn feature_vector(&self, movie_id: MovieId) -> Option<&[f32]> {
        let pos = self.catalog.movies().iter().position(|m| m.id == movie_id)?;
        Some(&self.features[pos])
    }

    /// Resolve a free-text title to a catalog movie
    pub fn resolve_title(&self, query_title: &str) -> Option<&Movie> {
        self.resolve_position(query_title)
            .map(|pos| &self.catalog.movies()[pos])
    }

    fn resolve_position(&self, query_title: &str) -> Option<usize> {
        let (name, _) = split_title_and_year(query_title.trim());
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.lowered_titles
            .iter()
            .position(|title| *title == needle)
            .or_else(|| {
                self.lowered_titles
                    .iter()
                    .position(|title| title.contains(&needle))
            })
    }

    /// Top `limit` movies most similar in genre to `query_title`.
    ///
    /// The resolved movie itself never appears. Ties keep storage order.
    #[instrument(skip(self))]
    pub fn recommend(&self, query_title: &str, limit: usize) -> Vec<Recommendation> {
        let Some(query_pos) = self.resolve_position(query_title) else {
            info!("Movie not found for query '{}'", query_title);
            return Vec::new();
        };

        let movies = self.catalog.movies();
        let query_id = movies[query_pos].id;
        let query_vector = &self.features[query_pos];
        debug!("Resolved '{}' to movie {}", query_title, query_id);

        let mut scored: Vec<(usize, f32)> = self
            .features
            .iter()
            .enumerate()
            .filter(|&(pos, _)| movies[pos].id != query_id)
            .map(|(pos, vector)| (pos, cosine_similarity(query_vector, vector)))
            .collect();
        scored.sort_by(|a, b| descending(a.1, b.1));

        let mut recommendations: Vec<Recommendation> = scored
            .into_iter()
            .take(limit)
            .map(|(pos, similarity)| {
                let movie = &movies[pos];
                let entry = CatalogEntry {
                    movie,
                    stats: self.catalog.get_movie_stats(movie.id),
                };
                Recommendation::from_entry(entry, similarity, RecommendationSource::Content)
            })
            .collect();
        assign_ranks(&mut recommendations);

        debug!("Generated {} content recommendations", recommendations.len());
        recommendations
    }
}

/// Binary genre membership vector
fn encode_genres(movie: &Movie, positions: &HashMap<&str, usize>, width: usize) -> Vec<f32> {
    let mut vector = vec![0.0; width];
    for token in movie.genre_tokens() {
        if let Some(&idx) = positions.get(token) {
            vector[idx] = 1.0;
        }
    }
    vector
}
