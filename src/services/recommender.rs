use chrono::Utc;
use std::time::Instant;

use crate::{
    models::{Recommendation, RecommendationMetrics, RecommendationReport, UserId, WeightPair},
    store::InteractionStore,
};

use super::{
    blending::{self, DEFAULT_TOP_K},
    explanations, metrics,
    popularity::DEFAULT_MIN_RATINGS,
    similarity::DEFAULT_MIN_SIMILARITY,
    weighting, CandidateSource, PopularityModel, UserSimilarityModel,
};

const COLD_START_NOTICE: &str = "User-based recommendations are unavailable due to limited user \
history. The system is relying more on popularity-based recommendations.";

/// Tunable knobs of the recommendation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Candidates requested from each sub-model
    pub candidate_pool: usize,
    pub default_top_k: usize,
    pub min_ratings: usize,
    pub min_similarity: f64,
    pub default_bias: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            candidate_pool: 10,
            default_top_k: DEFAULT_TOP_K,
            min_ratings: DEFAULT_MIN_RATINGS,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            default_bias: 0.5,
        }
    }
}

/// Hybrid recommendation pipeline
///
/// Runs both candidate sources, weights them for the user, blends the lists
/// and attaches the explanation and offline metrics.
pub struct Recommender {
    popularity: Box<dyn CandidateSource>,
    user_cf: Box<dyn CandidateSource>,
    settings: EngineSettings,
}

impl Recommender {
    /// Creates a pipeline backed by the popularity and user-similarity models
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_sources(
            Box::new(PopularityModel::new(settings.min_ratings)),
            Box::new(UserSimilarityModel::new(settings.min_similarity)),
            settings,
        )
    }

    /// Creates a pipeline over arbitrary candidate sources
    pub fn with_sources(
        popularity: Box<dyn CandidateSource>,
        user_cf: Box<dyn CandidateSource>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            popularity,
            user_cf,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Weights for a user, falling back to the configured bias
    pub fn weights(
        &self,
        store: &InteractionStore,
        user_id: UserId,
        explainability_bias: Option<f64>,
    ) -> WeightPair {
        let bias = explainability_bias.unwrap_or(self.settings.default_bias);
        weighting::weights_for_user(store, user_id, bias)
    }

    /// Produces the full report for one user
    pub fn recommend(
        &self,
        store: &InteractionStore,
        user_id: UserId,
        explainability_bias: Option<f64>,
        top_k: Option<usize>,
    ) -> RecommendationReport {
        let start = Instant::now();
        let bias = explainability_bias.unwrap_or(self.settings.default_bias);
        let top_k = top_k.unwrap_or(self.settings.default_top_k);
        let pool = self.settings.candidate_pool;

        let popular = self.popularity.candidates(store, user_id, pool);
        let personal = self.user_cf.candidates(store, user_id, pool);
        let cf_available = !personal.is_empty();

        tracing::info!(
            user_id,
            bias,
            popularity_source = self.popularity.name(),
            popularity_candidates = popular.len(),
            cf_source = self.user_cf.name(),
            cf_candidates = personal.len(),
            "Candidates generated"
        );

        let weights = weighting::weights_for_user(store, user_id, bias);
        let blended = blending::blend(&popular, &personal, weights, top_k);

        let explanation = explanations::explain(weights, cf_available);
        let metrics = evaluate(store, user_id, &blended_titles(&blended), &weights);
        let recommendations = explanations::attach(blended, &explanation);

        let notice = if cf_available {
            None
        } else {
            tracing::info!(user_id, "Collaborative candidates unavailable, using popularity");
            Some(COLD_START_NOTICE.to_string())
        };

        tracing::info!(
            user_id,
            returned = recommendations.len(),
            reason = %explanation.reason,
            processing_time_us = start.elapsed().as_micros() as u64,
            "Recommendations produced"
        );

        RecommendationReport {
            user_id,
            explainability_bias: bias,
            weights,
            cf_available,
            recommendations,
            metrics,
            notice,
            generated_at: Utc::now(),
        }
    }
}

fn blended_titles(recommendations: &[Recommendation]) -> Vec<String> {
    recommendations.iter().map(|r| r.title.clone()).collect()
}

/// Scores a batch against the user's own history
///
/// The recommended ids are every movie carrying a recommended title, and the
/// user's rated movies serve as ground truth.
fn evaluate(
    store: &InteractionStore,
    user_id: UserId,
    titles: &[String],
    weights: &WeightPair,
) -> RecommendationMetrics {
    let recommended_ids = store.movie_ids_for_titles(titles);
    let history = store.user_history(user_id);

    RecommendationMetrics {
        precision: metrics::precision_at_k(&recommended_ids, &history, recommended_ids.len()),
        diversity: metrics::diversity_score(titles),
        explainability: metrics::explainability_score(weights),
    }
}
