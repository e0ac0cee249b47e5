//! Test doubles for the generative provider
//!
//! [`MockProvider`] answers from a scripted queue and records every request,
//! so gateway behavior can be asserted without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::provider::{GenerateRequest, Generation, GenerativeProvider, ModelTier, TokenUsage};

pub const MOCK_EMBEDDING: [f32; 3] = [0.1, 0.2, 0.3];

#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<String>>,
    failure: Option<String>,
    requests: Mutex<Vec<GenerateRequest>>,
    embedded: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Answer generation calls with `replies`, in order.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Fail every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn embedded(&self) -> Vec<String> {
        self.embedded.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeProvider for MockProvider {
    fn model_name(&self, tier: ModelTier) -> String {
        format!("mock-{}", tier)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Generation> {
        self.requests.lock().unwrap().push(request);
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        let text = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("MockProvider has no scripted reply left"))?;
        Ok(Generation {
            text,
            usage: Some(TokenUsage {
                prompt_tokens: 4,
                completion_tokens: 2,
            }),
        })
    }

    async fn embed(&self, text: &str, _task_type: &str) -> Result<Vec<f32>> {
        self.embedded.lock().unwrap().push(text.to_string());
        if let Some(message) = &self.failure {
            anyhow::bail!("{}", message);
        }
        Ok(MOCK_EMBEDDING.to_vec())
    }
}
