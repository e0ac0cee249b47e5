//! Provider abstraction for the remote generation service
//!
//! The [`Gateway`](crate::Gateway) only talks to a [`GenerativeProvider`], so
//! the HTTP client can be swapped for an in-memory double in tests.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Model tier selector accepted by the text operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Pro,
    Flash,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Pro => "pro",
            ModelTier::Flash => "flash",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pro" => Ok(ModelTier::Pro),
            "flash" => Ok(ModelTier::Flash),
            other => anyhow::bail!("Unknown model '{}'; expected 'pro' or 'flash'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineImage { mime_type: String, data: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.into())],
        }
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.into())],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: ModelTier,
    pub contents: Vec<Content>,
    pub temperature: f32,
}

impl GenerateRequest {
    /// Single user turn with default sampling.
    pub fn prompt(model: ModelTier, text: impl Into<String>) -> Self {
        Self {
            model,
            contents: vec![Content::user_text(text)],
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Concrete model identifier behind a tier, reported back to callers.
    fn model_name(&self, tier: ModelTier) -> String;

    async fn generate(&self, request: GenerateRequest) -> Result<Generation>;

    async fn embed(&self, text: &str, task_type: &str) -> Result<Vec<f32>>;
}
