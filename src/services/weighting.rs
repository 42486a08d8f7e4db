use crate::{
    models::{UserId, WeightPair},
    store::InteractionStore,
};

/// Users with fewer interactions than this are treated as cold-start
pub const COLD_START_THRESHOLD: usize = 10;

/// Maximum weight moved from the CF model to popularity at bias 1.0
const BIAS_SHIFT: f64 = 0.2;

const COLD_START_BASE: WeightPair = WeightPair {
    popularity: 0.8,
    user_cf: 0.2,
};

const ACTIVE_BASE: WeightPair = WeightPair {
    popularity: 0.3,
    user_cf: 0.7,
};

/// Computes the popularity / CF split for a user
///
/// `explainability_bias` runs from 0.0 (favor personalization) to 1.0
/// (favor explainability). Values outside that range are clamped, and a NaN
/// bias counts as 0.0. The returned pair always sums to 1.0.
pub fn compute_weights(activity: usize, explainability_bias: f64) -> WeightPair {
    let bias = clamp_bias(explainability_bias);

    let base = if activity < COLD_START_THRESHOLD {
        COLD_START_BASE
    } else {
        ACTIVE_BASE
    };

    let popularity = base.popularity + bias * BIAS_SHIFT;
    let user_cf = base.user_cf - bias * BIAS_SHIFT;

    let total = popularity + user_cf;
    WeightPair {
        popularity: popularity / total,
        user_cf: user_cf / total,
    }
}

/// Computes weights from the user's activity in the store
pub fn weights_for_user(
    store: &InteractionStore,
    user_id: UserId,
    explainability_bias: f64,
) -> WeightPair {
    let activity = store.user_activity(user_id);
    let weights = compute_weights(activity, explainability_bias);

    tracing::debug!(
        user_id,
        activity,
        cold_start = activity < COLD_START_THRESHOLD,
        popularity = weights.popularity,
        user_cf = weights.user_cf,
        "Adaptive weights computed"
    );

    weights
}

fn clamp_bias(bias: f64) -> f64 {
    if bias.is_nan() {
        tracing::warn!("Explainability bias is NaN, using 0.0");
        return 0.0;
    }

    if !(0.0..=1.0).contains(&bias) {
        tracing::warn!(bias, "Explainability bias outside [0, 1], clamping");
    }

    bias.clamp(0.0, 1.0)
}
