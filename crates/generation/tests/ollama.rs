use std::time::Duration;

use axum::{Json, Router, http::StatusCode, routing::post};
use mealweek_generation::{GenerationClient, GenerationError, OllamaClient};
use serde_json::{Value, json};

/// Starts a throw-away generation endpoint and returns its base url.
async fn spawn_endpoint() -> String {
    async fn generate(Json(body): Json<Value>) -> Json<Value> {
        // Echo the request so tests can assert on what was sent.
        Json(json!({
            "model": body["model"],
            "response": body.to_string(),
            "done": true
        }))
    }

    async fn broken() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
    }

    async fn no_response_field() -> Json<Value> {
        Json(json!({ "done": true }))
    }

    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(json!({ "response": "{}" }))
    }

    let app = Router::new()
        .route("/api/generate", post(generate))
        .route("/broken", post(broken))
        .route("/empty", post(no_response_field))
        .route("/slow", post(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_generate_sends_json_mode_request() {
    let base = spawn_endpoint().await;
    let client = OllamaClient::new(
        format!("{base}/api/generate"),
        "llama3.2",
        Duration::from_secs(5),
    )
    .unwrap();

    let raw = client.generate("suggest a dinner").await.unwrap();
    let sent: Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(sent["model"], "llama3.2");
    assert_eq!(sent["prompt"], "suggest a dinner");
    assert_eq!(sent["stream"], false);
    assert_eq!(sent["format"], "json");
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let base = spawn_endpoint().await;
    let client =
        OllamaClient::new(format!("{base}/broken"), "llama3.2", Duration::from_secs(5)).unwrap();

    let err = client.generate("anything").await.unwrap_err();

    match err {
        GenerationError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_response_field_is_unexpected() {
    let base = spawn_endpoint().await;
    let client =
        OllamaClient::new(format!("{base}/empty"), "llama3.2", Duration::from_secs(5)).unwrap();

    let err = client.generate("anything").await.unwrap_err();

    assert!(matches!(err, GenerationError::Unexpected(_)));
    assert_eq!(err.label(), "Unexpected error");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connect_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = OllamaClient::new(
        format!("http://{addr}/api/generate"),
        "llama3.2",
        Duration::from_secs(2),
    )
    .unwrap();

    let err = client.generate("anything").await.unwrap_err();

    assert!(matches!(err, GenerationError::Connect(_)), "{err:?}");
}

#[tokio::test]
async fn test_timeout_is_connect_error() {
    let base = spawn_endpoint().await;
    let client =
        OllamaClient::new(format!("{base}/slow"), "llama3.2", Duration::from_millis(200)).unwrap();

    let err = client.generate("anything").await.unwrap_err();

    assert!(matches!(err, GenerationError::Connect(_)), "{err:?}");
}
