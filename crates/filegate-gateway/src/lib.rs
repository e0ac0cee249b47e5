//! filegate gateway
//!
//! Wrapper around the Gemini generative-language API: a provider seam, the
//! HTTP client, prompt templates, the shared chat session and the gateway
//! service that reports every outcome as an [`Envelope`].

pub mod envelope;
pub mod extraction;
pub mod gemini;
pub mod prompts;
pub mod provider;
pub mod responses;
pub mod service;
pub mod session;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use envelope::Envelope;
pub use extraction::{ExtractionSchema, StructuredExtraction};
pub use gemini::GeminiClient;
pub use provider::{GenerativeProvider, ModelTier};
pub use service::Gateway;
pub use session::{ChatMessage, ConversationSession};
