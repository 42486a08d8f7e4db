use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use adaptive_recommender::{
    create_router,
    models::InteractionRecord,
    services::{EngineSettings, Recommender},
    store::InteractionStore,
    AppState,
};

fn record(user_id: u64, movie_id: u64, rating: f64, title: &str) -> InteractionRecord {
    InteractionRecord {
        user_id,
        movie_id,
        rating,
        title: title.to_string(),
    }
}

/// Twelve users rate the same two films; user 2 also rated "Hidden Gem" and
/// user 1 has ten extra ratings so that it is not a cold-start user.
fn sample_store() -> InteractionStore {
    let mut records = Vec::new();
    for user in 1..=12u64 {
        records.push(record(user, 1, 5.0, "Classic"));
        records.push(record(user, 2, 3.0, "Filler"));
    }
    records.push(record(2, 3, 4.0, "Hidden Gem"));
    for movie in 100..110u64 {
        records.push(record(1, movie, 3.5, &format!("Archive {}", movie)));
    }
    InteractionStore::new(records)
}

fn create_test_server() -> TestServer {
    let settings = EngineSettings {
        min_ratings: 10,
        ..EngineSettings::default()
    };
    let state = AppState::new(sample_store(), Recommender::new(settings));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c2a70-3f0e-4d55-9a43-2f5f3a8e9b10";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_list_users() {
    let server = create_test_server();
    let response = server.get("/api/v1/users").await;
    response.assert_status_ok();

    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 12);
    assert_eq!(users[0]["user_id"], 1);
    assert_eq!(users[0]["activity"], 12);
    assert_eq!(users[1]["activity"], 3);
}

#[tokio::test]
async fn test_weights_for_active_user() {
    let server = create_test_server();
    let response = server.get("/api/v1/users/1/weights?bias=1.0").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["cold_start"], false);
    let popularity = body["weights"]["popularity"].as_f64().unwrap();
    let user_cf = body["weights"]["user_cf"].as_f64().unwrap();
    assert!((popularity - 0.5).abs() < 1e-9);
    assert!((user_cf - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_weights_reject_non_finite_bias() {
    let server = create_test_server();
    let response = server.get("/api/v1/users/1/weights?bias=NaN").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("bias"));
}

#[tokio::test]
async fn test_recommendations_for_active_user() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/users/1/recommendations?bias=0&top_k=3")
        .await;
    response.assert_status_ok();

    let report: Value = response.json();
    assert_eq!(report["user_id"], 1);
    assert_eq!(report["cf_available"], true);
    assert!(report["notice"].is_null());

    let recommendations = report["recommendations"].as_array().unwrap();
    assert!(!recommendations.is_empty());
    assert!(recommendations.len() <= 3);
    assert!(recommendations
        .iter()
        .any(|r| r["title"] == "Hidden Gem"));

    // Everyone in the batch shares the same explanation
    let first = &recommendations[0]["explanation"];
    assert!(recommendations.iter().all(|r| &r["explanation"] == first));
    assert_eq!(first["reason"], "Strong collaborative signal");
    assert_eq!(first["dominant"], "User-based CF");

    let explainability = report["metrics"]["explainability"].as_f64().unwrap();
    assert!((explainability - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_user_gets_cold_start_fallback() {
    let server = create_test_server();
    let response = server.get("/api/v1/users/999/recommendations?bias=0").await;
    response.assert_status_ok();

    let report: Value = response.json();
    assert_eq!(report["cf_available"], false);
    assert!(report["notice"].is_string());

    let recommendations = report["recommendations"].as_array().unwrap();
    let titles: Vec<&str> = recommendations
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Classic", "Filler"]);

    let top = recommendations[0]["final_score"].as_f64().unwrap();
    assert!((top - 4.0).abs() < 1e-9);
    assert_eq!(
        recommendations[0]["explanation"]["reason"],
        "Cold-start fallback"
    );
}

#[tokio::test]
async fn test_out_of_range_bias_is_clamped() {
    let server = create_test_server();
    let clamped: Value = server
        .get("/api/v1/users/1/weights?bias=7")
        .await
        .json();
    let full: Value = server
        .get("/api/v1/users/1/weights?bias=1")
        .await
        .json();
    assert_eq!(clamped["weights"], full["weights"]);
}

#[tokio::test]
async fn test_popular_items() {
    let server = create_test_server();
    let response = server.get("/api/v1/popular?top_k=1").await;
    response.assert_status_ok();

    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Classic");
    assert_eq!(items[0]["rating_count"], 12);
    assert_eq!(items[0]["mean_rating"], 5.0);
}

#[tokio::test]
async fn test_invalid_user_id_is_rejected() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/users/not-a-number/recommendations")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
