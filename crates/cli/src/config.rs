use serde::Deserialize;
use std::path::PathBuf;

/// Prefix for every environment variable read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "MYNEXTMOVIE_";

/// Runtime configuration loaded from `MYNEXTMOVIE_*` environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding movies.csv and ratings.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Neighborhood size for collaborative filtering
    #[serde(default = "default_k_neighbors")]
    pub k_neighbors: usize,

    /// Hybrid score given to collaborative rows
    #[serde(default = "default_collaborative_weight")]
    pub collaborative_weight: f32,

    /// Hybrid score given to popularity rows
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f32,

    /// Tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_k_neighbors() -> usize {
    100
}

fn default_collaborative_weight() -> f32 {
    0.6
}

fn default_popularity_weight() -> f32 {
    0.4
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            k_neighbors: default_k_neighbors(),
            collaborative_weight: default_collaborative_weight(),
            popularity_weight: default_popularity_weight(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
