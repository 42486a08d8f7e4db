use serde::{Deserialize, Serialize};

pub mod recommendation;

pub use recommendation::{
    CandidateItem, Dominant, ExplainedRecommendation, Explanation, ExplanationReason,
    RecommendationMetrics, RecommendationReport, Recommendation, WeightPair,
};

/// Identifier of a user in the interaction dataset
pub type UserId = u64;

/// Identifier of a movie in the interaction dataset
pub type MovieId = u64;

/// A single rating event joined with its movie title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionRecord {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f64,
    pub title: String,
}

// ============================================================================
// Dataset File Types
// ============================================================================

/// Row of `ratings.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRow {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Integer ratings deserialize into `f64` as well
    pub rating: f64,
}

/// Row of `movies.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRow {
    pub movie_id: MovieId,
    pub title: String,
}
