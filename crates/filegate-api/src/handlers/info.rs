//! Service information routes

use axum::Json;
use serde::Serialize;

use crate::constants::{API_VERSION, SERVICE_NAME, VERSION};
use crate::handlers::ai::AI_FEATURES;

#[derive(Debug, Serialize)]
pub struct RouteListing {
    pub files: Vec<&'static str>,
    pub ai: Vec<&'static str>,
    pub combined: Vec<&'static str>,
    pub system: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: RouteListing,
    pub documentation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub api_version: &'static str,
    pub features: Vec<&'static str>,
}

/// Service name, version and route listing
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, description = "Service information", body = serde_json::Value))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: VERSION,
        description: "File upload validation and generative AI gateway",
        endpoints: RouteListing {
            files: vec![
                "/files/upload/{category}",
                "/files/upload/multiple",
                "/files/info",
            ],
            ai: vec![
                "/ai/analyze-text",
                "/ai/chat",
                "/ai/chat/history",
                "/ai/analyze-image",
                "/ai/compare-images",
                "/ai/analyze-document",
                "/ai/extract-structured-data",
                "/ai/analyze-csv",
                "/ai/sentiment",
                "/ai/translate",
                "/ai/summarize",
                "/ai/grammar-check",
                "/ai/generate-content",
                "/ai/embeddings",
                "/ai/models",
                "/ai/status",
            ],
            combined: vec![
                "/ai/combined/image-analysis",
                "/ai/combined/document-analysis",
            ],
            system: vec!["/", "/health", "/version", "/docs", "/api/openapi.json"],
        },
        documentation: "/docs",
    })
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "system",
    responses((status = 200, description = "Version and feature list", body = serde_json::Value))
)]
pub async fn version() -> Json<VersionInfo> {
    let mut features = vec!["file_validation", "batch_upload"];
    features.extend(AI_FEATURES);
    Json(VersionInfo {
        version: VERSION,
        api_version: API_VERSION,
        features,
    })
}
