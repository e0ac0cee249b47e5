use std::path::Path;

use crate::registry::FileTypeSpec;
use crate::upload::bytes_to_mb;

/// Validation and inspection failures for uploaded files
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unknown file category: {0}")]
    UnknownCategory(String),

    #[error("File extension '{extension}' is not allowed (allowed: {})", .allowed.join(", "))]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error(
        "File too large: {:.2} MB exceeds the {:.2} MB limit",
        mb(.size),
        mb(.max)
    )]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Could not decode file: {0}")]
    CorruptPayload(String),

    #[error("Invalid ZIP archive: {0}")]
    CorruptArchive(String),

    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    EncodingError(String),

    #[error("Malformed document at line {line}, column {column}: {message}")]
    MalformedDocument {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Maximum {max} files allowed per request")]
    TooManyFiles { max: usize },
}

fn mb(bytes: &usize) -> f64 {
    bytes_to_mb(*bytes)
}

/// Lower-cased suffix of `filename`, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
}

/// True iff the filename's suffix is accepted by `spec`.
pub fn validate_extension(filename: &str, spec: &FileTypeSpec) -> bool {
    file_extension(filename).is_some_and(|ext| spec.accepts_extension(&ext))
}

/// True iff `size` does not exceed the category ceiling.
pub fn validate_size(size: usize, spec: &FileTypeSpec) -> bool {
    size <= spec.max_bytes
}

pub fn check_extension(filename: &str, spec: &FileTypeSpec) -> Result<(), ValidationError> {
    if validate_extension(filename, spec) {
        return Ok(());
    }
    Err(ValidationError::UnsupportedExtension {
        extension: file_extension(filename).unwrap_or_default(),
        allowed: spec.dotted_extensions(),
    })
}

pub fn check_size(size: usize, spec: &FileTypeSpec) -> Result<(), ValidationError> {
    if validate_size(size, spec) {
        return Ok(());
    }
    Err(ValidationError::PayloadTooLarge {
        size,
        max: spec.max_bytes,
    })
}
