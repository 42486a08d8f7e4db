use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{RecommendationReport, UserId},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub bias: Option<f64>,
    pub top_k: Option<usize>,
}

/// Rejects biases that cannot be clamped into [0, 1]
pub(crate) fn validate_bias(bias: Option<f64>) -> AppResult<Option<f64>> {
    match bias {
        Some(value) if !value.is_finite() => Err(AppError::InvalidInput(
            "bias must be a finite number".to_string(),
        )),
        other => Ok(other),
    }
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationReport>> {
    let bias = validate_bias(query.bias)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        bias = ?bias,
        top_k = ?query.top_k,
        "Processing recommendation request"
    );

    // Similarity is quadratic in the number of users; keep it off the async workers
    let report = tokio::task::spawn_blocking(move || {
        state
            .recommender
            .recommend(&state.store, user_id, bias, query.top_k)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        returned = report.recommendations.len(),
        cf_available = report.cf_available,
        "Recommendation request completed"
    );

    Ok(Json(report))
}
