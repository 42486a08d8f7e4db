use axum::{
    http::{Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::Recommender,
    store::InteractionStore,
};

pub mod popular;
pub mod recommendations;
pub mod users;

/// Shared application state
///
/// The dataset never changes after start-up, so handlers share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InteractionStore>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(store: InteractionStore, recommender: Recommender) -> Self {
        Self {
            store: Arc::new(store),
            recommender: Arc::new(recommender),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/:user_id/weights", get(users::user_weights))
        .route(
            "/users/:user_id/recommendations",
            get(recommendations::recommend),
        )
        .route("/popular", get(popular::popular_items))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
