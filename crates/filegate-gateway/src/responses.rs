//! Payloads carried inside successful [`Envelope`](crate::Envelope)s

use serde::Serialize;

use filegate_processing::ImageInfo;

use crate::extraction::StructuredExtraction;
use crate::session::ChatMessage;

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub response: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub model: String,
    pub history_length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatHistory {
    pub history: Vec<ChatMessage>,
    pub total_messages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryCleared {
    pub messages_cleared: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    pub analysis: String,
    pub image_info: ImageInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageComparison {
    pub comparison: String,
    pub images_info: [ImageInfo; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub analysis: String,
    pub analysis_type: String,
    /// In characters.
    pub document_length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuredData {
    pub extracted_data: StructuredExtraction,
    pub extraction_mode: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabularAnalysis {
    pub analysis: String,
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentAnalysis {
    pub sentiment_analysis: String,
    pub detailed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    /// `summary_length / original_length`, 0 for empty input.
    pub compression_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrammarCheck {
    pub corrections: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextEmbedding {
    /// Preview of the embedded text.
    pub text: String,
    pub embedding: Vec<f32>,
    pub dimensions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingBatch {
    pub embeddings: Vec<TextEmbedding>,
    pub total_embeddings: usize,
}
