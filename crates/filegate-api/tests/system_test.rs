//! Service information, health and routing integration tests.
//!
//! Run with: `cargo test -p filegate-api --test system_test`

mod helpers;

use axum::http::StatusCode;
use filegate_gateway::test_helpers::MockProvider;
use serde_json::Value;

use helpers::{setup_test_server, setup_test_server_with};

#[tokio::test]
async fn test_root_lists_routes() {
    let server = setup_test_server();
    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "filegate");
    assert!(body["version"].is_string());
    let files = body["endpoints"]["files"].as_array().unwrap();
    assert!(files.iter().any(|r| r == "/files/upload/multiple"));
}

#[tokio::test]
async fn test_version() {
    let server = setup_test_server();
    let body: Value = server.get("/version").await.json();

    assert_eq!(body["api_version"], "v1");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    let features = body["features"].as_array().unwrap();
    assert!(features.iter().any(|f| f == "file_validation"));
    assert!(features.iter().any(|f| f == "chat"));
}

#[tokio::test]
async fn test_health_without_key() {
    let server = setup_test_server();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["services"]["api"], "operational");
    assert_eq!(body["services"]["file_processing"], "operational");
    assert_eq!(body["services"]["generative_ai"], "unavailable");
}

#[tokio::test]
async fn test_health_with_gateway() {
    let (server, _) = setup_test_server_with(MockProvider::default());
    let body: Value = server.get("/health").await.json();
    assert_eq!(body["services"]["generative_ai"], "operational");
}

#[tokio::test]
async fn test_unknown_path_uses_error_shape() {
    let server = setup_test_server();
    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "NotFound");
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = setup_test_server();

    let response = server.get("/health").await;
    let generated = response.header("x-request-id");
    assert!(!generated.is_empty());

    let response = server
        .get("/health")
        .add_header("X-Request-ID", "trace-123")
        .await;
    assert_eq!(response.header("x-request-id"), "trace-123");

    let response = server.get("/missing").await;
    assert!(!response.header("x-request-id").is_empty());
}

#[tokio::test]
async fn test_openapi_document_and_viewer() {
    let server = setup_test_server();

    let spec: Value = server.get("/api/openapi.json").await.json();
    assert!(spec["paths"]["/files/upload/{category}"].is_object());
    assert!(spec["paths"]["/ai/analyze-text"].is_object());

    let docs = server.get("/docs").await;
    assert_eq!(docs.status_code(), StatusCode::OK);
    assert!(docs.text().contains("rapi-doc"));
}
