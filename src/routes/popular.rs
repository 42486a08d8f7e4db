use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    routes::AppState,
    services::popularity::{rank_popular, PopularItem},
};

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub top_k: Option<usize>,
}

/// Handler for the global popularity ranking
pub async fn popular_items(
    State(state): State<AppState>,
    Query(query): Query<PopularQuery>,
) -> Json<Vec<PopularItem>> {
    let settings = state.recommender.settings();
    let top_k = query.top_k.unwrap_or(settings.candidate_pool);

    Json(rank_popular(&state.store, top_k, settings.min_ratings))
}
