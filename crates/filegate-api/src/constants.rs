//! API constants

/// Service name reported by `/` and the tracing setup
pub const SERVICE_NAME: &str = "filegate";

/// Crate version, reported by `/version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the HTTP contract
pub const API_VERSION: &str = "v1";

/// Tier used when a request does not pick one
pub const DEFAULT_MODEL: &str = "flash";

pub const DEFAULT_IMAGE_PROMPT: &str = "Describe this image in detail";
pub const DEFAULT_COMPARISON_PROMPT: &str = "Compare these two images";
pub const DEFAULT_COMBINED_IMAGE_PROMPT: &str =
    "Analyze this image and provide detailed insights";
pub const DEFAULT_TABULAR_QUESTION: &str = "Analyze this data and provide insights";
pub const DEFAULT_GRAMMAR_LANGUAGE: &str = "English";
pub const DEFAULT_EMBEDDING_TASK: &str = "retrieval_document";
pub const DEFAULT_CONTENT_TEMPERATURE: f32 = 0.9;
