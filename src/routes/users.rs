use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::{UserId, WeightPair},
    routes::{recommendations::validate_bias, AppState},
    services::weighting::COLD_START_THRESHOLD,
    store::UserActivity,
};

#[derive(Debug, Deserialize)]
pub struct WeightsQuery {
    pub bias: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub user_id: UserId,
    pub activity: usize,
    pub cold_start: bool,
    pub weights: WeightPair,
}

/// Lists every user in the dataset with their activity
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserActivity>> {
    Json(state.store.users())
}

/// Shows the blend weights a user would receive
pub async fn user_weights(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Query(query): Query<WeightsQuery>,
) -> AppResult<Json<WeightsResponse>> {
    let bias = validate_bias(query.bias)?;
    let activity = state.store.user_activity(user_id);
    let weights = state.recommender.weights(&state.store, user_id, bias);

    Ok(Json(WeightsResponse {
        user_id,
        activity,
        cold_start: activity < COLD_START_THRESHOLD,
        weights,
    }))
}
