use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::UserId;

/// An item proposed by one sub-model, before blending
///
/// Scores are not comparable across models: popularity scores are mean
/// ratings, collaborative scores are similarity-weighted sums.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateItem {
    pub title: String,
    pub score: f64,
}

impl CandidateItem {
    pub fn new(title: impl Into<String>, score: f64) -> Self {
        Self {
            title: title.into(),
            score,
        }
    }
}

/// Blend weights for the two sub-models; always sums to 1.0
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightPair {
    pub popularity: f64,
    pub user_cf: f64,
}

/// A blended recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub final_score: f64,
}

/// Rationale category for a batch of recommendations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExplanationReason {
    #[serde(rename = "Cold-start fallback")]
    ColdStartFallback,
    #[serde(rename = "Strong collaborative signal")]
    StrongCollaborativeSignal,
    #[serde(rename = "Global popularity")]
    GlobalPopularity,
    #[serde(rename = "Balanced recommendation")]
    Balanced,
}

impl Display for ExplanationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExplanationReason::ColdStartFallback => "Cold-start fallback",
            ExplanationReason::StrongCollaborativeSignal => "Strong collaborative signal",
            ExplanationReason::GlobalPopularity => "Global popularity",
            ExplanationReason::Balanced => "Balanced recommendation",
        };
        write!(f, "{}", label)
    }
}

/// Sub-model that dominated the decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Dominant {
    Popularity,
    #[serde(rename = "User-based CF")]
    UserCf,
    Hybrid,
}

/// Human-readable justification shared by every item in a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Explanation {
    pub reason: ExplanationReason,
    pub detail: String,
    pub dominant: Dominant,
}

// ============================================================================
// Report Types
// ============================================================================

/// A recommendation together with the explanation attached to it
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedRecommendation {
    pub title: String,
    pub final_score: f64,
    pub explanation: Explanation,
}

/// Offline quality indicators for one batch
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RecommendationMetrics {
    pub precision: f64,
    pub diversity: f64,
    pub explainability: f64,
}

/// Everything produced for one (user, bias) request
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub user_id: UserId,
    pub explainability_bias: f64,
    pub weights: WeightPair,
    /// False when the collaborative model had nothing to offer
    pub cf_available: bool,
    pub recommendations: Vec<ExplainedRecommendation>,
    pub metrics: RecommendationMetrics,
    /// Set when the result fell back to popularity only
    pub notice: Option<String>,
    pub generated_at: DateTime<Utc>,
}
