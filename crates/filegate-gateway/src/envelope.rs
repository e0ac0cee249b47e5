use chrono::{DateTime, Utc};
use filegate_core::error::{AppError, ErrorMetadata};
use serde::Serialize;

/// Uniform result of a gateway operation.
///
/// Success serializes as `{success: true, <payload fields>, timestamp}`,
/// failure as `{success: false, error, timestamp}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(error.to_string()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The upstream failure carried by an unsuccessful envelope.
    pub fn failure(&self) -> Option<AppError> {
        self.error
            .as_ref()
            .map(|message| AppError::UpstreamFailure(message.clone()))
    }
}

impl<T> From<anyhow::Result<T>> for Envelope<T> {
    fn from(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(payload) => Envelope::ok(payload),
            Err(e) => {
                let envelope = Envelope::failed(format!("{:#}", e));
                if let Some(failure) = envelope.failure() {
                    tracing::warn!(
                        error = %failure,
                        error_code = failure.error_code(),
                        recoverable = failure.is_recoverable(),
                        "Generative call failed"
                    );
                }
                envelope
            }
        }
    }
}
