//! Route configuration and setup.
//!
//! Route groups are assembled here; the health check lives in [health](health).

mod health;

use crate::api_doc;
use crate::error::HttpAppError;
use crate::handlers::{ai, combined, files, info};
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, Method, Uri},
    routing::{get, post},
    Json, Router,
};
use filegate_core::{AppError, Config};
use filegate_infra::{get_request_id, request_id_middleware};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = get_request_id(request).unwrap_or_default();
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let max_concurrent_requests = config.max_concurrent_requests().max(1);
    let max_request_body_bytes = config.max_request_body_bytes();
    tracing::info!(
        max_concurrent_requests,
        max_request_body_bytes,
        "HTTP concurrency and body limits enabled"
    );

    let app = Router::new()
        .merge(system_routes())
        .merge(file_routes())
        .merge(ai_routes())
        .merge(RapiDoc::new("/api/openapi.json").path("/docs"))
        .fallback(not_found)
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(RequestBodyLimitLayer::new(max_request_body_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid origin in CORS_ORIGINS")?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

async fn not_found(uri: Uri) -> HttpAppError {
    HttpAppError(AppError::NotFound(format!("No route for {}", uri.path())))
}

fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(info::root))
        .route("/version", get(info::version))
        .route("/health", get(health::health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
}

fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/files/upload/multiple", post(files::upload_multiple))
        .route("/files/upload/{category}", post(files::upload_file))
        .route("/files/info", get(files::files_info))
}

fn ai_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/analyze-text", post(ai::analyze_text))
        .route("/ai/chat", post(ai::chat))
        .route(
            "/ai/chat/history",
            get(ai::chat_history).delete(ai::clear_chat_history),
        )
        .route("/ai/analyze-image", post(ai::analyze_image))
        .route("/ai/compare-images", post(ai::compare_images))
        .route("/ai/analyze-document", post(ai::analyze_document))
        .route(
            "/ai/extract-structured-data",
            post(ai::extract_structured_data),
        )
        .route("/ai/analyze-csv", post(ai::analyze_csv))
        .route("/ai/sentiment", post(ai::sentiment))
        .route("/ai/translate", post(ai::translate))
        .route("/ai/summarize", post(ai::summarize))
        .route("/ai/grammar-check", post(ai::grammar_check))
        .route("/ai/generate-content", post(ai::generate_content))
        .route("/ai/embeddings", post(ai::embeddings))
        .route(
            "/ai/combined/image-analysis",
            post(combined::image_analysis),
        )
        .route(
            "/ai/combined/document-analysis",
            post(combined::document_analysis),
        )
        .route("/ai/models", get(ai::models))
        .route("/ai/status", get(ai::status))
}
