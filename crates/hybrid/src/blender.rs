//! # Hybrid Blender
//!
//! Merges collaborative and popularity results for one user:
//! 1. Ask each side for `2 × limit` results (in parallel)
//! 2. Give every collaborative row the collaborative weight as its score and
//!    every popularity row the popularity weight
//! 3. Concatenate collaborative first, drop repeated titles (first wins)
//! 4. Stable sort by score descending, keep `limit`
//!
//! The popularity side always uses the "Drama" genre with a floor of 20
//! ratings, whatever the user's own taste.

use crate::error::{InvalidRequestError, Result};
use crate::request::{RecommendParams, Strategy};
use data_loader::{Catalog, UserId};
use recommenders::{
    ContentSimilarityEngine, DEFAULT_K, NeighborhoodPredictor, PopularityRanker, Recommendation,
    assign_ranks,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Genre used for the popularity side of a hybrid request
pub const HYBRID_POPULARITY_GENRE: &str = "Drama";

/// Review floor used for the popularity side of a hybrid request
pub const HYBRID_MIN_REVIEWS: u32 = 20;

/// Flat score given to each row of a source when blending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub collaborative: f32,
    pub popularity: f32,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            collaborative: 0.6,
            popularity: 0.4,
        }
    }
}

/// Owns one instance of every engine over a shared catalog and exposes
/// the blended and dispatched entry points.
pub struct HybridBlender {
    catalog: Arc<Catalog>,
    popularity: PopularityRanker,
    content: ContentSimilarityEngine,
    collaborative: NeighborhoodPredictor,

    /// Neighborhood size for the collaborative side of `combine`
    k_neighbors: usize,
}

impl HybridBlender {
    /// Build every engine over `catalog`
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let start = Instant::now();
        let popularity = PopularityRanker::new(catalog.clone());
        let content = ContentSimilarityEngine::new(catalog.clone());
        let collaborative = NeighborhoodPredictor::new(catalog.clone());
        info!("Built recommendation engines in {:.2?}", start.elapsed());

        Self {
            catalog,
            popularity,
            content,
            collaborative,
            k_neighbors: DEFAULT_K,
        }
    }

    /// Configure the neighborhood size used by `combine` (default: 100)
    pub fn with_k_neighbors(mut self, k: usize) -> Self {
        self.k_neighbors = k;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn popularity(&self) -> &PopularityRanker {
        &self.popularity
    }

    pub fn content(&self) -> &ContentSimilarityEngine {
        &self.content
    }

    pub fn collaborative(&self) -> &NeighborhoodPredictor {
        &self.collaborative
    }

    /// Blend collaborative and popularity results for `user_id`.
    ///
    /// An unknown user contributes no collaborative rows, so the result is
    /// popularity-only.
    #[instrument(skip(self))]
    pub fn combine(
        &self,
        user_id: UserId,
        limit: usize,
        weights: HybridWeights,
    ) -> Vec<Recommendation> {
        let fetch = limit.saturating_mul(2);

        let (collaborative, popularity) = rayon::join(
            || self.collaborative.recommend(user_id, fetch, self.k_neighbors),
            || {
                self.popularity
                    .recommend(Some(HYBRID_POPULARITY_GENRE), HYBRID_MIN_REVIEWS, fetch)
            },
        );
        debug!(
            "Hybrid sources: collaborative={}, popularity={}",
            collaborative.len(),
            popularity.len()
        );

        let blended = blend(collaborative, popularity, weights, limit);
        info!(
            "Blended {} hybrid recommendations for user {}",
            blended.len(),
            user_id
        );
        blended
    }

    /// Run one named strategy after checking its parameters.
    ///
    /// Fails with [`InvalidRequestError`] for an unknown method, missing
    /// parameters, or a zero `limit`/`k`. Otherwise returns the engine's
    /// result unchanged, including an empty one.
    pub fn recommend(&self, method: &str, params: &RecommendParams) -> Result<Vec<Recommendation>> {
        let strategy: Strategy = method.parse()?;
        self.recommend_with(strategy, params)
    }

    /// Same as [`HybridBlender::recommend`] with an already-parsed strategy
    #[instrument(skip(self, params))]
    pub fn recommend_with(
        &self,
        strategy: Strategy,
        params: &RecommendParams,
    ) -> Result<Vec<Recommendation>> {
        let missing = params.missing_for(strategy);
        if !missing.is_empty() {
            return Err(InvalidRequestError::MissingParameters {
                method: strategy.as_str(),
                missing,
            });
        }

        let limit = ensure_positive("limit", params.limit.unwrap_or_default())?;
        let recommendations = match strategy {
            Strategy::Popularity => self.popularity.recommend(
                params.genre.as_deref(),
                params.min_reviews.unwrap_or_default(),
                limit,
            ),
            Strategy::Content => self
                .content
                .recommend(params.movie_title.as_deref().unwrap_or_default(), limit),
            Strategy::Collaborative => {
                let k = ensure_positive("k", params.k.unwrap_or(DEFAULT_K))?;
                let user_id = params.user_id.unwrap_or_default();
                self.collaborative.recommend(user_id, limit, k)
            }
        };

        debug!(
            "{} returned {} recommendations",
            strategy.as_str(),
            recommendations.len()
        );
        Ok(recommendations)
    }
}

fn ensure_positive(name: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(InvalidRequestError::InvalidParameter {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

/// Merge two ranked lists under flat per-source scores
pub fn blend(
    collaborative: Vec<Recommendation>,
    popularity: Vec<Recommendation>,
    weights: HybridWeights,
    limit: usize,
) -> Vec<Recommendation> {
    let tagged = collaborative
        .into_iter()
        .map(|rec| (rec, weights.collaborative))
        .chain(popularity.into_iter().map(|rec| (rec, weights.popularity)));

    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut merged: Vec<Recommendation> = tagged
        .filter(|(rec, _)| seen_titles.insert(rec.title.clone()))
        .map(|(mut rec, weight)| {
            rec.score = weight;
            rec
        })
        .collect();

    // Stable: equal weights keep collaborative-then-popularity order
    merged.sort_by(|a, b| b.score.total_cmp(&a.score));
    merged.truncate(limit);
    assign_ranks(&mut merged);
    merged
}
