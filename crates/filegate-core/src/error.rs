//! Error types module
//!
//! This module provides the core error types used throughout filegate.
//! Upload validation, generative gateway and infrastructure failures are all
//! unified under the `AppError` enum, which self-describes how it should be
//! presented over HTTP through the `ErrorMetadata` trait.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like an unconfigured gateway
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "PAYLOAD_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported extension: {0}")]
    UnsupportedExtension(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Invalid schema: {0}")]
    SchemaError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedExtension(_) => (
            400,
            "UNSUPPORTED_EXTENSION",
            false,
            Some("Upload a file with one of the accepted extensions"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size below the category limit"),
            false,
            LogLevel::Debug,
        ),
        AppError::CorruptPayload(_) => (
            400,
            "CORRUPT_PAYLOAD",
            false,
            Some("Check file integrity and try a different file"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidFormat(_) => (
            400,
            "INVALID_FORMAT",
            false,
            Some("Check that the file content matches its extension"),
            false,
            LogLevel::Debug,
        ),
        AppError::MalformedDocument(_) => (
            400,
            "MALFORMED_DOCUMENT",
            false,
            Some("Fix the document syntax at the reported position"),
            false,
            LogLevel::Debug,
        ),
        AppError::EncodingError(_) => (
            400,
            "ENCODING_ERROR",
            false,
            Some("Re-encode the file as UTF-8"),
            false,
            LogLevel::Debug,
        ),
        AppError::SchemaError(_) => (
            400,
            "SCHEMA_ERROR",
            false,
            Some("Send the schema as a JSON object of field names to descriptions"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Check the request path"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnknownCategory(_) => (
            404,
            "UNKNOWN_CATEGORY",
            false,
            Some("Use one of the categories listed by /files/info"),
            false,
            LogLevel::Debug,
        ),
        AppError::ServiceUnavailable(_) => (
            503,
            "SERVICE_UNAVAILABLE",
            true,
            Some("Configure GOOGLE_API_KEY and restart the service"),
            false,
            LogLevel::Warn,
        ),
        AppError::UpstreamFailure(_) => (
            502,
            "UPSTREAM_FAILURE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Warn,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::UnsupportedExtension(_) => "UnsupportedExtension",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::CorruptPayload(_) => "CorruptPayload",
            AppError::InvalidFormat(_) => "InvalidFormat",
            AppError::MalformedDocument(_) => "MalformedDocument",
            AppError::EncodingError(_) => "EncodingError",
            AppError::SchemaError(_) => "SchemaError",
            AppError::NotFound(_) => "NotFound",
            AppError::UnknownCategory(_) => "UnknownCategory",
            AppError::ServiceUnavailable(_) => "ServiceUnavailable",
            AppError::UpstreamFailure(_) => "UpstreamFailure",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg)
            | AppError::UnsupportedExtension(ref msg)
            | AppError::PayloadTooLarge(ref msg)
            | AppError::CorruptPayload(ref msg)
            | AppError::InvalidFormat(ref msg)
            | AppError::MalformedDocument(ref msg)
            | AppError::EncodingError(ref msg)
            | AppError::SchemaError(ref msg)
            | AppError::NotFound(ref msg)
            | AppError::UnknownCategory(ref msg)
            | AppError::ServiceUnavailable(ref msg) => msg.clone(),
            AppError::UpstreamFailure(_) => "Generative service call failed".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge("File size 11 MB exceeds 10 MB".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "File size 11 MB exceeds 10 MB");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_service_unavailable() {
        let err = AppError::ServiceUnavailable("Generative AI service is not configured".into());
        assert_eq!(err.http_status_code(), 503);
        assert_eq!(err.error_code(), "SERVICE_UNAVAILABLE");
        assert!(err.is_recoverable());
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_format_failures_are_client_errors() {
        let errors = [
            AppError::UnsupportedExtension("x".into()),
            AppError::CorruptPayload("x".into()),
            AppError::InvalidFormat("x".into()),
            AppError::MalformedDocument("x".into()),
            AppError::EncodingError("x".into()),
            AppError::SchemaError("x".into()),
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 400, "{}", err.error_type());
            assert!(!err.is_sensitive());
        }
    }

    #[test]
    fn test_internal_error_hides_message() {
        let err = AppError::Internal("inspector thread panicked".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("connection reset").context("request to upstream failed");
        let err = AppError::from(source);
        let details = err.detailed_message();
        assert!(details.contains("Caused by"));
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = AppError::UnknownCategory("spreadsheets".to_string());
        assert_eq!(
            err.suggested_action(),
            Some("Use one of the categories listed by /files/info")
        );

        let err = AppError::InvalidInput("test".to_string());
        assert_eq!(
            err.suggested_action(),
            Some("Check request parameters and try again")
        );
    }
}
