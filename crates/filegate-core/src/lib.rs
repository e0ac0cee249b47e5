//! filegate core library
//!
//! This crate provides the error taxonomy, configuration and the file category
//! model shared across all filegate components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, FilegateConfig, GatewayConfig, MAX_BATCH_FILES};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{FileCategory, UnknownCategoryError};
