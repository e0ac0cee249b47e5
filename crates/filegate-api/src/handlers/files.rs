//! File upload validation and introspection handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use filegate_core::{AppError, FileCategory};
use filegate_processing::{BatchItemResult, FileDescriptor, ValidationError};
use serde::Serialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::utils::upload::{extract_batch_uploads, extract_multipart_file};

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub results: Vec<BatchItemResult>,
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Debug, Serialize)]
pub struct SupportedType {
    pub extensions: Vec<String>,
    pub max_size_mb: f64,
}

#[derive(Debug, Serialize)]
pub struct SupportedTypes {
    pub supported_types: BTreeMap<FileCategory, SupportedType>,
}

/// Run CPU-bound inspection off the async runtime.
async fn run_blocking<T, F>(task: F) -> Result<T, HttpAppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ValidationError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(format!("Inspection task failed: {}", e)))?
        .map_err(HttpAppError::from)
}

/// Validate and inspect a single upload
///
/// The extension is checked first, then the size, then the payload is
/// decoded by the category's inspector.
#[utoipa::path(
    post,
    path = "/files/upload/{category}",
    tag = "files",
    params(
        ("category" = String, Path, description = "One of image, video, zip, pdf, excel, csv, word, audio, json, xml")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File accepted and described", body = serde_json::Value),
        (status = 400, description = "Extension not allowed or payload malformed", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 413, description = "File exceeds the category limit", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<FileDescriptor>>, HttpAppError> {
    let category: FileCategory = category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory(category.clone()))?;

    let upload = extract_multipart_file(multipart?).await?;
    tracing::debug!(
        filename = %upload.filename,
        size_bytes = upload.size_bytes(),
        category = %category,
        "Processing upload"
    );

    let pipeline = state.pipeline.clone();
    let descriptor = run_blocking(move || pipeline.process(category, &upload)).await?;

    tracing::info!(
        filename = %descriptor.summary().filename,
        category = %category,
        "Upload accepted"
    );

    Ok(Json(ApiResponse::ok(
        format!("{} uploaded successfully", category.label()),
        descriptor,
    )))
}

/// Validate up to ten files in one request
///
/// Each file is classified by its extension and checked against that
/// category's size limit. Failures are reported per file.
#[utoipa::path(
    post,
    path = "/files/upload/multiple",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-file results", body = serde_json::Value),
        (status = 400, description = "No files, or more than ten", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_multiple"))]
pub async fn upload_multiple(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<BatchSummary>>, HttpAppError> {
    let uploads = extract_batch_uploads(multipart?).await?;

    let pipeline = state.pipeline.clone();
    let results = run_blocking(move || pipeline.process_batch(&uploads)).await?;

    let successful = results.iter().filter(|r| r.is_success()).count();
    let summary = BatchSummary {
        total_files: results.len(),
        failed: results.len() - successful,
        successful,
        results,
    };
    tracing::info!(
        total_files = summary.total_files,
        successful = summary.successful,
        failed = summary.failed,
        "Batch processed"
    );

    Ok(Json(ApiResponse::ok(
        format!(
            "Processed {} files: {} accepted, {} rejected",
            summary.total_files, summary.successful, summary.failed
        ),
        summary,
    )))
}

/// Accepted extensions and size limit per category
#[utoipa::path(
    get,
    path = "/files/info",
    tag = "files",
    responses(
        (status = 200, description = "Supported file types", body = serde_json::Value)
    )
)]
pub async fn files_info(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SupportedTypes>> {
    let supported_types = state
        .pipeline
        .registry()
        .specs()
        .map(|spec| {
            (
                spec.category,
                SupportedType {
                    extensions: spec.dotted_extensions(),
                    max_size_mb: spec.max_size_mb(),
                },
            )
        })
        .collect();

    Json(ApiResponse::ok(
        "Supported file types",
        SupportedTypes { supported_types },
    ))
}
