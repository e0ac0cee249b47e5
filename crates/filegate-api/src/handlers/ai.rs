//! Generative AI handlers
//!
//! Request fields arrive as form fields (multipart or urlencoded). Gateway
//! outcomes, including upstream failures, are returned as 200 envelopes;
//! only request validation and a missing credential map to error statuses.

use std::sync::Arc;

use axum::{extract::State, Json};
use filegate_core::AppError;
use filegate_gateway::responses::*;
use filegate_gateway::{Envelope, ExtractionSchema, ModelTier};
use filegate_processing::Upload;
use serde::Serialize;

use crate::constants::*;
use crate::error::{ErrorResponse, HttpAppError};
use crate::extractors::{AvailableGateway, FormFields};
use crate::state::AppState;

type EnvelopeResult<T> = Result<Json<Envelope<T>>, HttpAppError>;

/// Strict UTF-8 decoding for text uploads.
pub(crate) fn utf8_text(upload: &Upload) -> Result<String, HttpAppError> {
    String::from_utf8(upload.data.to_vec()).map_err(|e| {
        HttpAppError(AppError::EncodingError(format!(
            "Could not decode '{}': file must be UTF-8 encoded (invalid byte at offset {})",
            upload.filename,
            e.utf8_error().valid_up_to()
        )))
    })
}

/// Reject uploads whose declared content type is not `image/*`.
pub(crate) fn require_image(upload: &Upload) -> Result<(), HttpAppError> {
    let is_image = upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_lowercase().starts_with("image/"));
    if is_image {
        return Ok(());
    }
    Err(HttpAppError(AppError::InvalidInput(format!(
        "File '{}' must be an image",
        upload.filename
    ))))
}

#[utoipa::path(
    post,
    path = "/ai/analyze-text",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Generation envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "analyze_text"))]
pub async fn analyze_text(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<TextAnalysis> {
    let text = form.required_text("text")?;
    let model = form.text_or("model", DEFAULT_MODEL);
    let temperature = form.number("temperature", 0.7)?;
    Ok(Json(gateway.analyze_text(text, model, temperature).await))
}

#[utoipa::path(
    post,
    path = "/ai/chat",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Chat reply envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "chat"))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<ChatReply> {
    let message = form.required_text("message")?;
    let model = form.text_or("model", DEFAULT_MODEL);
    let clear_history = form.flag("clear_history", false)?;
    Ok(Json(
        gateway
            .chat(&state.chat_session, message, model, clear_history)
            .await,
    ))
}

#[utoipa::path(
    get,
    path = "/ai/chat/history",
    tag = "ai",
    responses(
        (status = 200, description = "Conversation transcript", body = serde_json::Value),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
pub async fn chat_history(
    State(state): State<Arc<AppState>>,
    AvailableGateway(gateway): AvailableGateway,
) -> Json<Envelope<ChatHistory>> {
    Json(gateway.chat_history(&state.chat_session))
}

#[utoipa::path(
    delete,
    path = "/ai/chat/history",
    tag = "ai",
    responses(
        (status = 200, description = "Transcript cleared", body = serde_json::Value),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
pub async fn clear_chat_history(
    State(state): State<Arc<AppState>>,
    AvailableGateway(gateway): AvailableGateway,
) -> Json<Envelope<HistoryCleared>> {
    Json(gateway.clear_history(&state.chat_session))
}

#[utoipa::path(
    post,
    path = "/ai/analyze-image",
    tag = "ai",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Vision analysis envelope", body = serde_json::Value),
        (status = 400, description = "Missing file or not an image", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "analyze_image"))]
pub async fn analyze_image(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> EnvelopeResult<ImageAnalysis> {
    let upload = form.take_file("file")?;
    require_image(&upload)?;
    let prompt = form.text_or("prompt", DEFAULT_IMAGE_PROMPT);
    Ok(Json(gateway.analyze_image(upload.data, prompt).await))
}

#[utoipa::path(
    post,
    path = "/ai/compare-images",
    tag = "ai",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Comparison envelope", body = serde_json::Value),
        (status = 400, description = "Missing file or not an image", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "compare_images"))]
pub async fn compare_images(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> EnvelopeResult<ImageComparison> {
    let first = form.take_file("file1")?;
    let second = form.take_file("file2")?;
    require_image(&first)?;
    require_image(&second)?;
    let prompt = form.text_or("prompt", DEFAULT_COMPARISON_PROMPT);
    Ok(Json(
        gateway.compare_images(first.data, second.data, prompt).await,
    ))
}

#[utoipa::path(
    post,
    path = "/ai/analyze-document",
    tag = "ai",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document analysis envelope", body = serde_json::Value),
        (status = 400, description = "Missing file or not UTF-8", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "analyze_document"))]
pub async fn analyze_document(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> EnvelopeResult<DocumentAnalysis> {
    let upload = form.take_file("file")?;
    let text = utf8_text(&upload)?;
    let analysis_type = form.text_or("analysis_type", "summary");
    Ok(Json(gateway.analyze_document(&text, analysis_type).await))
}

/// Extract schema fields from `text`, or from an uploaded UTF-8 `file`
#[utoipa::path(
    post,
    path = "/ai/extract-structured-data",
    tag = "ai",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extraction envelope; extracted_data is parsed JSON or {raw_response}", body = serde_json::Value),
        (status = 400, description = "Invalid schema or missing text", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "extract_structured_data"))]
pub async fn extract_structured_data(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> EnvelopeResult<StructuredData> {
    let schema = ExtractionSchema::parse(form.required_text("schema")?)
        .map_err(|e| HttpAppError(AppError::SchemaError(e)))?;

    let text = match form.text("text") {
        Some(text) => text.to_string(),
        None => utf8_text(&form.take_file("file").map_err(|_| {
            HttpAppError(AppError::InvalidInput(
                "Provide the source as a 'text' field or a 'file' upload".to_string(),
            ))
        })?)?,
    };

    Ok(Json(gateway.extract_structured_data(&text, &schema).await))
}

#[utoipa::path(
    post,
    path = "/ai/analyze-csv",
    tag = "ai",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Tabular analysis envelope", body = serde_json::Value),
        (status = 400, description = "Missing file, not .csv or not UTF-8", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "analyze_csv"))]
pub async fn analyze_csv(
    AvailableGateway(gateway): AvailableGateway,
    mut form: FormFields,
) -> EnvelopeResult<TabularAnalysis> {
    let upload = form.take_file("file")?;
    if upload.extension().as_deref() != Some("csv") {
        return Err(HttpAppError(AppError::UnsupportedExtension(format!(
            "File '{}' must be a .csv file",
            upload.filename
        ))));
    }
    let data = utf8_text(&upload)?;
    let question = form.text_or("question", DEFAULT_TABULAR_QUESTION);
    Ok(Json(gateway.analyze_tabular(&data, question).await))
}

#[utoipa::path(
    post,
    path = "/ai/sentiment",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Sentiment envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "sentiment"))]
pub async fn sentiment(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<SentimentAnalysis> {
    let text = form.required_text("text")?;
    let detailed = form.flag("detailed", false)?;
    Ok(Json(gateway.analyze_sentiment(text, detailed).await))
}

#[utoipa::path(
    post,
    path = "/ai/translate",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Translation envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "translate"))]
pub async fn translate(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<Translation> {
    let text = form.required_text("text")?;
    let target = form.required_text("target_language")?;
    let source = form.text_or("source_language", "auto");
    Ok(Json(gateway.translate(text, target, source).await))
}

#[utoipa::path(
    post,
    path = "/ai/summarize",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Summary envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "summarize"))]
pub async fn summarize(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<Summary> {
    let text = form.required_text("text")?;
    let length = form.text_or("summary_length", "medium");
    let bullet_points = form.flag("bullet_points", false)?;
    Ok(Json(gateway.summarize(text, length, bullet_points).await))
}

#[utoipa::path(
    post,
    path = "/ai/grammar-check",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Grammar review envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "grammar_check"))]
pub async fn grammar_check(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<GrammarCheck> {
    let text = form.required_text("text")?;
    let language = form.text_or("language", DEFAULT_GRAMMAR_LANGUAGE);
    Ok(Json(gateway.check_grammar(text, language).await))
}

#[utoipa::path(
    post,
    path = "/ai/generate-content",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Generated content envelope", body = serde_json::Value),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "generate_content"))]
pub async fn generate_content(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<GeneratedContent> {
    let prompt = form.required_text("prompt")?;
    let content_type = form.text_or("content_type", "general");
    let temperature = form.number("temperature", DEFAULT_CONTENT_TEMPERATURE)?;
    Ok(Json(
        gateway
            .generate_content(prompt, content_type, temperature)
            .await,
    ))
}

#[utoipa::path(
    post,
    path = "/ai/embeddings",
    tag = "ai",
    request_body(content = inline(Object), content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Embeddings envelope", body = serde_json::Value),
        (status = 400, description = "No texts supplied", body = ErrorResponse),
        (status = 503, description = "GOOGLE_API_KEY not configured", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "embeddings"))]
pub async fn embeddings(
    AvailableGateway(gateway): AvailableGateway,
    form: FormFields,
) -> EnvelopeResult<EmbeddingBatch> {
    let texts = form.texts("texts");
    if texts.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "At least one 'texts' field is required".to_string(),
        )));
    }
    let task_type = form.text_or("task_type", DEFAULT_EMBEDDING_TASK);
    Ok(Json(gateway.generate_embeddings(texts, task_type).await))
}

#[derive(Debug, Serialize)]
pub struct ModelCatalog {
    pub pro: String,
    pub flash: String,
    pub vision: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub success: bool,
    pub models: ModelCatalog,
    pub default_model: &'static str,
}

/// Concrete model identifiers behind each tier
#[utoipa::path(
    get,
    path = "/ai/models",
    tag = "ai",
    responses((status = 200, description = "Model catalog", body = serde_json::Value))
)]
pub async fn models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    let gateway = state.config.gateway();
    Json(ModelsResponse {
        success: true,
        models: ModelCatalog {
            pro: gateway.pro_model.clone(),
            flash: gateway.flash_model.clone(),
            vision: gateway.pro_model.clone(),
        },
        default_model: DEFAULT_MODEL,
    })
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub gemini_configured: bool,
    pub service: &'static str,
    pub available_models: Vec<&'static str>,
    pub features: Vec<&'static str>,
}

pub(crate) const AI_FEATURES: [&str; 10] = [
    "text_analysis",
    "chat",
    "image_analysis",
    "document_analysis",
    "structured_extraction",
    "sentiment_analysis",
    "translation",
    "summarization",
    "grammar_check",
    "embeddings",
];

/// Whether the generative service is configured
#[utoipa::path(
    get,
    path = "/ai/status",
    tag = "ai",
    responses((status = 200, description = "Gateway status", body = serde_json::Value))
)]
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        gemini_configured: state.gateway_available(),
        service: "Google Gemini",
        available_models: vec![ModelTier::Pro.as_str(), ModelTier::Flash.as_str()],
        features: AI_FEATURES.to_vec(),
    })
}
