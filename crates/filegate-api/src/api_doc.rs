//! OpenAPI documentation.
//! Served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::constants::VERSION;
use crate::error;
use crate::handlers;

/// Returns the OpenAPI document with the running crate version.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    spec.info.version = VERSION.to_string();
    spec
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Filegate API",
        description = "Upload validation and introspection for ten file categories, plus a gateway to Google Gemini for text, vision, document and embedding tasks. Generative routes answer 503 when GOOGLE_API_KEY is not configured."
    ),
    paths(
        // System
        handlers::info::root,
        handlers::info::version,
        // Files
        handlers::files::upload_file,
        handlers::files::upload_multiple,
        handlers::files::files_info,
        // Generative AI
        handlers::ai::analyze_text,
        handlers::ai::chat,
        handlers::ai::chat_history,
        handlers::ai::clear_chat_history,
        handlers::ai::analyze_image,
        handlers::ai::compare_images,
        handlers::ai::analyze_document,
        handlers::ai::extract_structured_data,
        handlers::ai::analyze_csv,
        handlers::ai::sentiment,
        handlers::ai::translate,
        handlers::ai::summarize,
        handlers::ai::grammar_check,
        handlers::ai::generate_content,
        handlers::ai::embeddings,
        handlers::ai::models,
        handlers::ai::status,
        // Combined
        handlers::combined::image_analysis,
        handlers::combined::document_analysis,
    ),
    components(
        schemas(
            filegate_core::FileCategory,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Upload validation and file introspection"),
        (name = "ai", description = "Google Gemini text, vision, document and embedding operations"),
        (name = "combined", description = "Upload a file and analyze it in one request"),
        (name = "system", description = "Service information")
    )
)]
pub struct ApiDoc;
