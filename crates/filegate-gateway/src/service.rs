//! Gateway service
//!
//! Every operation resolves to an [`Envelope`]. Remote and decoding errors
//! are reported in-band as failure envelopes, never as `Err`.

use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;

use filegate_processing::{describe_image, round2, ImageInfo};

use crate::envelope::Envelope;
use crate::extraction::{ExtractionSchema, StructuredExtraction};
use crate::prompts::{self, AnalysisType, ContentKind, SummaryLength};
use crate::provider::{
    Content, GenerateRequest, GenerativeProvider, ModelTier, Part, Role, DEFAULT_TEMPERATURE,
};
use crate::responses::*;
use crate::session::{ChatMessage, ConversationSession};

const EMBEDDING_PREVIEW_CHARS: usize = 100;

pub struct Gateway {
    provider: Arc<dyn GenerativeProvider>,
}

impl Gateway {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self { provider }
    }

    pub fn model_name(&self, tier: ModelTier) -> String {
        self.provider.model_name(tier)
    }

    async fn complete(&self, model: ModelTier, prompt: String, temperature: f32) -> Result<String> {
        let request = GenerateRequest::prompt(model, prompt).with_temperature(temperature);
        Ok(self.provider.generate(request).await?.text)
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn analyze_text(
        &self,
        text: &str,
        model: &str,
        temperature: f32,
    ) -> Envelope<TextAnalysis> {
        let result: Result<TextAnalysis> = async {
            let tier: ModelTier = model.parse()?;
            let request = GenerateRequest::prompt(tier, text).with_temperature(temperature);
            let generation = self.provider.generate(request).await?;
            Ok(TextAnalysis {
                response: generation.text,
                model: self.provider.model_name(tier),
                prompt_tokens: generation.usage.map(|u| u.prompt_tokens),
                completion_tokens: generation.usage.map(|u| u.completion_tokens),
            })
        }
        .await;
        result.into()
    }

    /// Send `message` with the session's prior turns as context.
    ///
    /// The exchange is recorded only once the model has replied.
    #[tracing::instrument(skip(self, session, message))]
    pub async fn chat(
        &self,
        session: &ConversationSession,
        message: &str,
        model: &str,
        clear_history: bool,
    ) -> Envelope<ChatReply> {
        let result: Result<ChatReply> = async {
            let tier: ModelTier = model.parse()?;
            if clear_history {
                session.clear();
            }

            let mut contents = session.contents();
            contents.push(Content::user_text(message));
            let request = GenerateRequest {
                model: tier,
                contents,
                temperature: DEFAULT_TEMPERATURE,
            };
            let generation = self.provider.generate(request).await?;

            session.append(ChatMessage::new(Role::User, message));
            session.append(ChatMessage::new(Role::Model, generation.text.clone()));

            Ok(ChatReply {
                response: generation.text,
                model: self.provider.model_name(tier),
                history_length: session.len(),
            })
        }
        .await;
        result.into()
    }

    pub fn chat_history(&self, session: &ConversationSession) -> Envelope<ChatHistory> {
        let history = session.snapshot();
        Envelope::ok(ChatHistory {
            total_messages: history.len(),
            history,
        })
    }

    pub fn clear_history(&self, session: &ConversationSession) -> Envelope<HistoryCleared> {
        let messages_cleared = session.clear();
        tracing::info!(messages_cleared, "Chat history cleared");
        Envelope::ok(HistoryCleared { messages_cleared })
    }

    #[tracing::instrument(skip(self, data, prompt), fields(size = data.len()))]
    pub async fn analyze_image(&self, data: Bytes, prompt: &str) -> Envelope<ImageAnalysis> {
        match decode_image(data.clone()).await {
            Ok(image_info) => self.analyze_decoded_image(data, image_info, prompt).await,
            Err(e) => Envelope::from(Err::<ImageAnalysis, _>(e)),
        }
    }

    /// Like [`Gateway::analyze_image`], for callers that already decoded the image.
    #[tracing::instrument(skip(self, data, prompt), fields(size = data.len()))]
    pub async fn analyze_decoded_image(
        &self,
        data: Bytes,
        image_info: ImageInfo,
        prompt: &str,
    ) -> Envelope<ImageAnalysis> {
        let result: Result<ImageAnalysis> = async {
            let request = GenerateRequest {
                model: ModelTier::Pro,
                contents: vec![Content {
                    role: Role::User,
                    parts: vec![Part::Text(prompt.to_string()), inline_image(&image_info, data)],
                }],
                temperature: DEFAULT_TEMPERATURE,
            };
            let generation = self.provider.generate(request).await?;
            Ok(ImageAnalysis {
                analysis: generation.text,
                image_info,
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip_all, fields(first = first.len(), second = second.len()))]
    pub async fn compare_images(
        &self,
        first: Bytes,
        second: Bytes,
        prompt: &str,
    ) -> Envelope<ImageComparison> {
        let result: Result<ImageComparison> = async {
            let first_info = decode_image(first.clone()).await?;
            let second_info = decode_image(second.clone()).await?;
            let request = GenerateRequest {
                model: ModelTier::Pro,
                contents: vec![Content {
                    role: Role::User,
                    parts: vec![
                        Part::Text(prompt.to_string()),
                        inline_image(&first_info, first),
                        inline_image(&second_info, second),
                    ],
                }],
                temperature: DEFAULT_TEMPERATURE,
            };
            let generation = self.provider.generate(request).await?;
            Ok(ImageComparison {
                comparison: generation.text,
                images_info: [first_info, second_info],
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn analyze_document(
        &self,
        text: &str,
        analysis_type: &str,
    ) -> Envelope<DocumentAnalysis> {
        let analysis = AnalysisType::parse_lenient(analysis_type);
        let result: Result<DocumentAnalysis> = async {
            let reply = self
                .complete(
                    ModelTier::Pro,
                    prompts::document_prompt(text, analysis),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            Ok(DocumentAnalysis {
                analysis: reply,
                analysis_type: analysis.to_string(),
                document_length: text.chars().count(),
            })
        }
        .await;
        result.into()
    }

    /// The schema is validated by the caller; see [`ExtractionSchema::parse`].
    #[tracing::instrument(skip_all, fields(fields = schema.fields().len()))]
    pub async fn extract_structured_data(
        &self,
        text: &str,
        schema: &ExtractionSchema,
    ) -> Envelope<StructuredData> {
        let result: Result<StructuredData> = async {
            let reply = self
                .complete(
                    ModelTier::Pro,
                    prompts::extraction_prompt(text, schema.fields()),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            let extracted = StructuredExtraction::from_reply(&reply);
            if let StructuredExtraction::RawTextFallback { .. } = extracted {
                tracing::debug!("Extraction reply was not valid JSON, returning raw text");
            }
            Ok(StructuredData {
                extraction_mode: extracted.mode().to_string(),
                extracted_data: extracted,
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, data), fields(data_len = data.len()))]
    pub async fn analyze_tabular(&self, data: &str, question: &str) -> Envelope<TabularAnalysis> {
        let result: Result<TabularAnalysis> = async {
            let reply = self
                .complete(
                    ModelTier::Pro,
                    prompts::tabular_prompt(data, question),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            Ok(TabularAnalysis {
                analysis: reply,
                question: question.to_string(),
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn analyze_sentiment(&self, text: &str, detailed: bool) -> Envelope<SentimentAnalysis> {
        let result: Result<SentimentAnalysis> = async {
            let reply = self
                .complete(
                    ModelTier::Flash,
                    prompts::sentiment_prompt(text, detailed),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            Ok(SentimentAnalysis {
                sentiment_analysis: reply,
                detailed,
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Envelope<Translation> {
        let result: Result<Translation> = async {
            let reply = self
                .complete(
                    ModelTier::Flash,
                    prompts::translation_prompt(text, target_language, source_language),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            Ok(Translation {
                original_text: text.to_string(),
                translated_text: reply,
                source_language: source_language.to_string(),
                target_language: target_language.to_string(),
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn summarize(
        &self,
        text: &str,
        length: &str,
        bullet_points: bool,
    ) -> Envelope<Summary> {
        let length = SummaryLength::parse_lenient(length);
        let result: Result<Summary> = async {
            let summary = self
                .complete(
                    ModelTier::Pro,
                    prompts::summary_prompt(text, length, bullet_points),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            let original_length = text.chars().count();
            let summary_length = summary.chars().count();
            Ok(Summary {
                compression_ratio: summary_ratio(summary_length, original_length),
                summary,
                original_length,
                summary_length,
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn check_grammar(&self, text: &str, language: &str) -> Envelope<GrammarCheck> {
        let result: Result<GrammarCheck> = async {
            let reply = self
                .complete(
                    ModelTier::Pro,
                    prompts::grammar_prompt(text, language),
                    DEFAULT_TEMPERATURE,
                )
                .await?;
            Ok(GrammarCheck {
                corrections: reply,
                language: language.to_string(),
            })
        }
        .await;
        result.into()
    }

    #[tracing::instrument(skip(self, prompt))]
    pub async fn generate_content(
        &self,
        prompt: &str,
        content_type: &str,
        temperature: f32,
    ) -> Envelope<GeneratedContent> {
        let kind = ContentKind::parse_lenient(content_type);
        let result: Result<GeneratedContent> = async {
            let content = self
                .complete(ModelTier::Pro, prompts::content_prompt(prompt, kind), temperature)
                .await?;
            Ok(GeneratedContent {
                content,
                content_type: kind.as_str().to_string(),
            })
        }
        .await;
        result.into()
    }

    /// One remote call per text, in order; the first failure fails the batch.
    #[tracing::instrument(skip(self, texts), fields(count = texts.len()))]
    pub async fn generate_embeddings(
        &self,
        texts: &[String],
        task_type: &str,
    ) -> Envelope<EmbeddingBatch> {
        let result: Result<EmbeddingBatch> = async {
            let mut embeddings = Vec::with_capacity(texts.len());
            for text in texts {
                let embedding = self.provider.embed(text, task_type).await?;
                embeddings.push(TextEmbedding {
                    text: preview(text),
                    dimensions: embedding.len(),
                    embedding,
                });
            }
            Ok(EmbeddingBatch {
                total_embeddings: embeddings.len(),
                embeddings,
            })
        }
        .await;
        result.into()
    }
}

async fn decode_image(data: Bytes) -> Result<ImageInfo> {
    let info = tokio::task::spawn_blocking(move || describe_image(&data))
        .await
        .context("Image decoding task failed")??;
    Ok(info)
}

fn inline_image(info: &ImageInfo, data: Bytes) -> Part {
    Part::InlineImage {
        mime_type: image_mime_type(&info.format).to_string(),
        data: data.to_vec(),
    }
}

fn image_mime_type(format: &str) -> &'static str {
    match format {
        "PNG" => "image/png",
        "GIF" => "image/gif",
        "WEBP" => "image/webp",
        "BMP" => "image/bmp",
        "TIFF" => "image/tiff",
        _ => "image/jpeg",
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > EMBEDDING_PREVIEW_CHARS {
        let head: String = text.chars().take(EMBEDDING_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn summary_ratio(summary_length: usize, original_length: usize) -> f64 {
    if original_length == 0 {
        return 0.0;
    }
    round2(summary_length as f64 / original_length as f64)
}
