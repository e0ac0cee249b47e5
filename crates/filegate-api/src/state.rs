//! Application state shared by all handlers.

use std::sync::Arc;

use anyhow::Result;
use filegate_core::Config;
use filegate_gateway::{ConversationSession, Gateway, GeminiClient, GenerativeProvider};
use filegate_processing::{TypeRegistry, UploadPipeline};

pub struct AppState {
    pub config: Config,
    pub pipeline: UploadPipeline,
    /// `None` when no API key is configured; `/ai/*` then answers 503.
    pub gateway: Option<Arc<Gateway>>,
    /// Transcript shared by every `/ai/chat` caller.
    pub chat_session: ConversationSession,
}

impl AppState {
    /// Build the state, connecting the Gemini client when a key is configured.
    pub fn from_config(config: Config) -> Result<Self> {
        let provider: Option<Arc<dyn GenerativeProvider>> = if config.gateway_configured() {
            Some(Arc::new(GeminiClient::new(config.gateway())?))
        } else {
            tracing::warn!("GOOGLE_API_KEY not set; generative AI routes will answer 503");
            None
        };
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: Config, provider: Option<Arc<dyn GenerativeProvider>>) -> Self {
        let registry = TypeRegistry::from_config(&config);
        Self {
            pipeline: UploadPipeline::new(Arc::new(registry)),
            gateway: provider.map(|p| Arc::new(Gateway::new(p))),
            chat_session: ConversationSession::new(),
            config,
        }
    }

    pub fn gateway_available(&self) -> bool {
        self.gateway.is_some()
    }
}
