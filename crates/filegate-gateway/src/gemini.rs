//! Gemini generative-language API client
//!
//! Speaks the `generateContent` and `embedContent` REST endpoints. The key is
//! sent in the `x-goog-api-key` header, never in the query string.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use filegate_core::GatewayConfig;

use crate::provider::{
    Content, GenerateRequest, Generation, GenerativeProvider, ModelTier, Part, Role, TokenUsage,
};

const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 8192;

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    api_base: String,
    pro_model: String,
    flash_model: String,
    embedding_model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<WireContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent {
    role: Role,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentBody<'a> {
    model: String,
    content: EmbedContent<'a>,
    task_type: String,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: [EmbedPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

impl From<Content> for WireContent {
    fn from(content: Content) -> Self {
        WireContent {
            role: content.role,
            parts: content
                .parts
                .into_iter()
                .map(|part| match part {
                    Part::Text(text) => WirePart::Text { text },
                    Part::InlineImage { mime_type, data } => WirePart::InlineData {
                        inline_data: InlineData {
                            mime_type,
                            data: STANDARD.encode(data),
                        },
                    },
                })
                .collect(),
        }
    }
}

impl GeminiClient {
    /// Build a client from gateway settings; fails when no API key is configured.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let api_key = config
            .google_api_key
            .clone()
            .context("GOOGLE_API_KEY is not configured")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for Gemini")?;

        Ok(Self {
            http_client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            pro_model: config.pro_model.clone(),
            flash_model: config.flash_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    async fn post<B: Serialize>(&self, url: String, body: &B) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Gemini API request failed: {} - {}", status, error_text);
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    fn model_name(&self, tier: ModelTier) -> String {
        match tier {
            ModelTier::Pro => self.pro_model.clone(),
            ModelTier::Flash => self.flash_model.clone(),
        }
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Generation> {
        let model = self.model_name(request.model);
        let body = GenerateContentBody {
            contents: request.contents.into_iter().map(WireContent::from).collect(),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        tracing::debug!(model = %model, "Sending generateContent request");

        let parsed: GenerateContentResponse = self
            .post(
                format!("{}/models/{}:generateContent", self.api_base, model),
                &body,
            )
            .await?
            .json()
            .await
            .context("Failed to parse Gemini generateContent response")?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .context("Gemini response contained no candidates")?;

        Ok(Generation {
            text,
            usage: parsed.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
            }),
        })
    }

    async fn embed(&self, text: &str, task_type: &str) -> Result<Vec<f32>> {
        let body = EmbedContentBody {
            model: format!("models/{}", self.embedding_model),
            content: EmbedContent {
                parts: [EmbedPart { text }],
            },
            task_type: task_type.to_uppercase(),
        };

        let parsed: EmbedContentResponse = self
            .post(
                format!(
                    "{}/models/{}:embedContent",
                    self.api_base, self.embedding_model
                ),
                &body,
            )
            .await?
            .json()
            .await
            .context("Failed to parse Gemini embedContent response")?;

        Ok(parsed.embedding.values)
    }
}
