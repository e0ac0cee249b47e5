//! Success envelope for the file routes

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{success: true, message, timestamp, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: Utc::now(),
            data,
        }
    }
}
