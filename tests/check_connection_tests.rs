//! Integration tests for the connectivity check suite.
//!
//! The suite runs against a scripted axum backend so stage ordering,
//! continuation after failures, and envelope validation are verified over
//! the real HTTP path.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use rahalah_client::{CheckConnectionUseCase, CheckResult, HttpChatBackend};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server stopped");
    });
    format!("http://{addr}")
}

/// Healthy backend: every mode answers with a complete envelope and
/// mode-appropriate search results.
async fn scripted_chat(Json(body): Json<Value>) -> Json<Value> {
    let mode = body.get("mode").and_then(Value::as_str).unwrap_or("trip");
    let search_results = match mode {
        "flight" => json!({"flight": [{"airline": "Saudia"}]}),
        "hotel" => json!({"hotel": [{"title": "Desert Rose Hotel"}, {"title": "Corniche View"}]}),
        _ => json!({}),
    };
    Json(json!({
        "response": "Handled",
        "session_id": "check-1",
        "mode": mode,
        "search_results": search_results,
    }))
}

async fn healthy() -> Json<Value> {
    Json(json!({"status": "Rahalah API is running"}))
}

async fn maintenance() -> (StatusCode, Json<Value>) {
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"detail": "maintenance"})))
}

fn suite(base_url: String) -> CheckConnectionUseCase {
    CheckConnectionUseCase::new(Arc::new(HttpChatBackend::new(base_url)))
}

#[tokio::test]
async fn test_full_suite_passes_against_healthy_backend() {
    let router = Router::new()
        .route("/", get(healthy))
        .route("/api/chat", post(scripted_chat));
    let base_url = serve(router).await;

    let results = suite(base_url).execute().await;

    let names: Vec<&str> = results.iter().map(CheckResult::name).collect();
    assert_eq!(names, ["Health Check", "Flight Mode", "Hotel Mode", "Trip Mode"]);
    assert!(results.iter().all(CheckResult::passed));
    assert_eq!(results[1].detail(), "1 flight results");
    assert_eq!(results[2].detail(), "2 hotel results");
    assert_eq!(results[3].detail(), "envelope complete");
}

#[tokio::test]
async fn test_unhealthy_backend_fails_only_the_health_stage() {
    let router = Router::new()
        .route("/", get(maintenance))
        .route("/api/chat", post(scripted_chat));
    let base_url = serve(router).await;

    let results = suite(base_url).execute().await;

    assert!(!results[0].passed());
    assert_eq!(results[0].detail(), "maintenance");
    assert!(results[1..].iter().all(CheckResult::passed));
}

#[tokio::test]
async fn test_incomplete_envelope_is_reported_per_stage() {
    let router = Router::new()
        .route("/", get(healthy))
        .route(
            "/api/chat",
            post(|| async { Json(json!({"response": "Hi there"})) }),
        );
    let base_url = serve(router).await;

    let results = suite(base_url).execute().await;

    assert!(results[0].passed());
    for result in &results[1..] {
        assert!(!result.passed());
        assert_eq!(
            result.detail(),
            "missing 'session_id' field in the response envelope"
        );
    }
}

#[tokio::test]
async fn test_unreachable_backend_fails_every_stage() {
    let results = suite("http://127.0.0.1:1".to_string()).execute().await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| !r.passed()));
    assert_eq!(
        results[0].detail(),
        "No response received from the server. Check that the backend is running and reachable."
    );
}
