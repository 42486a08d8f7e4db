use serde::Deserialize;

use crate::services::recommender::EngineSettings;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding `ratings.json` and `movies.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of candidates each sub-model contributes before blending
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,

    /// Number of blended recommendations returned when the request omits `top_k`
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Minimum number of ratings an item needs to enter the popularity ranking
    #[serde(default = "default_min_ratings")]
    pub min_ratings: usize,

    /// Similarity a user must exceed to count as a neighbor
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Explainability bias used when the request omits `bias`
    #[serde(default = "default_bias")]
    pub default_bias: f64,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_candidate_pool() -> usize {
    10
}

fn default_top_k() -> usize {
    5
}

fn default_min_ratings() -> usize {
    50
}

fn default_min_similarity() -> f64 {
    0.3
}

fn default_bias() -> f64 {
    0.5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine knobs derived from this configuration
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            candidate_pool: self.candidate_pool,
            default_top_k: self.default_top_k,
            min_ratings: self.min_ratings,
            min_similarity: self.min_similarity,
            default_bias: self.default_bias,
        }
    }
}
