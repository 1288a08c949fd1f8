//! Result types shared by every recommender.

use data_loader::{CatalogEntry, MovieId};
use serde::Serialize;
use std::cmp::Ordering;

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Ranked by mean rating and review count
    Popularity,
    /// Ranked by genre similarity to a query movie
    Content,
    /// Ranked by rating predicted from similar users
    Collaborative,
}

/// One row of a ranked result table.
///
/// `score` depends on the source: mean rating for popularity, cosine
/// similarity for content, predicted rating for collaborative. The hybrid
/// blender overwrites it with the source weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the result
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub year: Option<u16>,
    pub genres: String,
    pub avg_rating: f32,
    pub rating_count: u32,
    pub score: f32,
    pub source: RecommendationSource,
}

impl Recommendation {
    /// Build an unranked row from a catalog entry.
    pub fn from_entry(entry: CatalogEntry<'_>, score: f32, source: RecommendationSource) -> Self {
        Self {
            rank: 0,
            movie_id: entry.movie.id,
            title: entry.movie.title.clone(),
            year: entry.movie.year,
            genres: entry.movie.genres.clone(),
            avg_rating: entry.stats.avg_rating,
            rating_count: entry.stats.rating_count,
            score,
            source,
        }
    }
}

/// Number rows 1..=n in their current order.
pub fn assign_ranks(recommendations: &mut [Recommendation]) {
    for (idx, rec) in recommendations.iter_mut().enumerate() {
        rec.rank = idx + 1;
    }
}

/// Descending comparison for scores; use with a stable sort so equal
/// scores keep their input order.
pub(crate) fn descending(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}
