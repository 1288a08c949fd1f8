//! Named strategies and their parameters for single-entry dispatch.

use crate::error::InvalidRequestError;
use data_loader::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategies reachable through [`crate::HybridBlender::recommend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Popularity,
    Content,
    Collaborative,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Popularity => "popularity",
            Strategy::Content => "content",
            Strategy::Collaborative => "collaborative",
        }
    }

    /// Parameter names that must be present for this strategy
    pub fn required_parameters(&self) -> &'static [&'static str] {
        match self {
            Strategy::Popularity => &["genre", "min_reviews", "limit"],
            Strategy::Content => &["movie_title", "limit"],
            Strategy::Collaborative => &["user_id", "limit"],
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = InvalidRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" => Ok(Strategy::Popularity),
            "content" => Ok(Strategy::Content),
            "collaborative" => Ok(Strategy::Collaborative),
            _ => Err(InvalidRequestError::UnknownMethod(s.to_string())),
        }
    }
}

/// Every parameter any strategy accepts; each strategy reads its own subset.
///
/// `genre: Some("")` is present and means "all genres".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendParams {
    pub genre: Option<String>,
    pub min_reviews: Option<u32>,
    pub movie_title: Option<String>,
    pub user_id: Option<UserId>,
    pub limit: Option<usize>,
    /// Neighborhood size for collaborative; 100 when absent
    pub k: Option<usize>,
}

impl RecommendParams {
    fn is_present(&self, name: &str) -> bool {
        match name {
            "genre" => self.genre.is_some(),
            "min_reviews" => self.min_reviews.is_some(),
            "movie_title" => self.movie_title.is_some(),
            "user_id" => self.user_id.is_some(),
            "limit" => self.limit.is_some(),
            "k" => self.k.is_some(),
            _ => false,
        }
    }

    /// Required parameters of `strategy` that are absent, in declaration order
    pub fn missing_for(&self, strategy: Strategy) -> Vec<&'static str> {
        strategy
            .required_parameters()
            .iter()
            .copied()
            .filter(|name| !self.is_present(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        assert_eq!("popularity".parse::<Strategy>().unwrap(), Strategy::Popularity);
        assert_eq!(" Content ".parse::<Strategy>().unwrap(), Strategy::Content);
        assert_eq!(
            "COLLABORATIVE".parse::<Strategy>().unwrap(),
            Strategy::Collaborative
        );
        assert_eq!(
            "hybrid".parse::<Strategy>().unwrap_err(),
            InvalidRequestError::UnknownMethod("hybrid".to_string())
        );
    }

    #[test]
    fn test_missing_for() {
        let params = RecommendParams::default();
        assert_eq!(params.missing_for(Strategy::Content), vec!["movie_title", "limit"]);

        let params = RecommendParams {
            user_id: Some(4),
            limit: Some(10),
            ..Default::default()
        };
        assert!(params.missing_for(Strategy::Collaborative).is_empty());
        assert_eq!(
            params.missing_for(Strategy::Popularity),
            vec!["genre", "min_reviews"]
        );
    }

    #[test]
    fn test_empty_genre_counts_as_present() {
        let params = RecommendParams {
            genre: Some(String::new()),
            min_reviews: Some(0),
            limit: Some(5),
            ..Default::default()
        };
        assert!(params.missing_for(Strategy::Popularity).is_empty());
    }
}
