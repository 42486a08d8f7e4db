use crate::models::{
    Dominant, ExplainedRecommendation, Explanation, ExplanationReason, Recommendation, WeightPair,
};

/// Weight above which a sub-model is considered dominant
const DOMINANCE_THRESHOLD: f64 = 0.6;

/// Classifies the decision regime behind a batch of recommendations
///
/// The result depends only on the weights and on whether the collaborative
/// model produced anything, never on individual items.
pub fn explain(weights: WeightPair, cf_available: bool) -> Explanation {
    let (reason, detail, dominant) = if !cf_available {
        (
            ExplanationReason::ColdStartFallback,
            "Limited user history → system relied on globally popular items.",
            Dominant::Popularity,
        )
    } else if weights.user_cf > DOMINANCE_THRESHOLD {
        (
            ExplanationReason::StrongCollaborativeSignal,
            "Users with similar taste rated this highly.",
            Dominant::UserCf,
        )
    } else if weights.popularity > DOMINANCE_THRESHOLD {
        (
            ExplanationReason::GlobalPopularity,
            "Consistently high ratings across many users.",
            Dominant::Popularity,
        )
    } else {
        (
            ExplanationReason::Balanced,
            "Combination of personal similarity and overall popularity.",
            Dominant::Hybrid,
        )
    };

    Explanation {
        reason,
        detail: detail.to_string(),
        dominant,
    }
}

/// Attaches the same explanation to every recommendation
pub fn attach(
    recommendations: Vec<Recommendation>,
    explanation: &Explanation,
) -> Vec<ExplainedRecommendation> {
    recommendations
        .into_iter()
        .map(|rec| ExplainedRecommendation {
            title: rec.title,
            final_score: rec.final_score,
            explanation: explanation.clone(),
        })
        .collect()
}
