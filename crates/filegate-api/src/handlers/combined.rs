//! Upload-and-analyze routes: local file facts plus one generative call

use axum::Json;
use chrono::{DateTime, Utc};
use filegate_core::AppError;
use filegate_gateway::responses::{DocumentAnalysis, ImageAnalysis};
use filegate_gateway::Envelope;
use filegate_processing::{bytes_to_mb, describe_image};
use serde::Serialize;

use crate::constants::DEFAULT_COMBINED_IMAGE_PROMPT;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::{AvailableGateway, FormFields};
use crate::handlers::ai::{require_image, utf8_text};

#[derive(Debug, Serialize)]
pub struct CombinedAnalysis<F, A> {
    pub success: bool,
    pub file_info: F,
    pub ai_analysis: Envelope<A>,
    pub timestamp: DateTime<Utc>,
}

impl<F, A> CombinedAnalysis<F, A> {
    fn new(file_info: F, ai_analysis: Envelope<A>) -> Self {
        Self {
            success: true,
            file_info,
            ai_analysis,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageFileInfo {
    pub filename: String,
    pub format: String,
    /// `"{width}x{height}"`
    pub size: String,
    pub size_mb: f64,
}

#[derive(Debug, Serialize)]
pub struct DocumentFileInfo {
    pub filename: String,
    pub size_bytes: usize,
    pub character_count: usize,
    pub word_count: usize,
}

#[utoipa::path(
    post,
    path = "/ai/combined/image-analysis",
    tag = "combined",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image facts and vision analysis", body = serde_json::Value),
        (status = 400, description = "Missing file, not an image or undecodable", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "combined_image_analysis"))]
pub async fn image_analysis(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> Result<Json<CombinedAnalysis<ImageFileInfo, ImageAnalysis>>, HttpAppError> {
    let upload = form.take_file("file")?;
    require_image(&upload)?;

    let data = upload.data.clone();
    let image_info = tokio::task::spawn_blocking(move || describe_image(&data))
        .await
        .map_err(|e| AppError::Internal(format!("Image decoding task failed: {}", e)))??;

    let file_info = ImageFileInfo {
        filename: upload.filename.clone(),
        format: image_info.format.clone(),
        size: format!("{}x{}", image_info.width, image_info.height),
        size_mb: bytes_to_mb(upload.size_bytes()),
    };

    let prompt = form.text_or("prompt", DEFAULT_COMBINED_IMAGE_PROMPT);
    let ai_analysis = gateway
        .analyze_decoded_image(upload.data, image_info, prompt)
        .await;

    Ok(Json(CombinedAnalysis::new(file_info, ai_analysis)))
}

#[utoipa::path(
    post,
    path = "/ai/combined/document-analysis",
    tag = "combined",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document facts and analysis", body = serde_json::Value),
        (status = 400, description = "Missing file or not UTF-8", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "combined_document_analysis"))]
pub async fn document_analysis(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> Result<Json<CombinedAnalysis<DocumentFileInfo, DocumentAnalysis>>, HttpAppError> {
    let upload = form.take_file("file")?;
    let text = utf8_text(&upload)?;

    let file_info = DocumentFileInfo {
        filename: upload.filename.clone(),
        size_bytes: upload.size_bytes(),
        character_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
    };

    let analysis_type = form.text_or("analysis_type", "summary");
    let ai_analysis = gateway.analyze_document(&text, analysis_type).await;

    Ok(Json(CombinedAnalysis::new(file_info, ai_analysis)))
}
