//! Batch upload orchestration
//!
//! Files are checked independently (extension lookup, then size); a failing
//! item is reported in place and never aborts the batch.

use filegate_core::{FileCategory, MAX_BATCH_FILES};
use serde::Serialize;

use crate::registry::TypeRegistry;
use crate::upload::{bytes_to_mb, Upload};
use crate::validator::{check_size, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchItemResult {
    Accepted {
        filename: String,
        success: bool,
        category: FileCategory,
        size_mb: f64,
    },
    Rejected {
        filename: String,
        success: bool,
        error: String,
    },
}

impl BatchItemResult {
    fn accepted(upload: &Upload, category: FileCategory) -> Self {
        BatchItemResult::Accepted {
            filename: upload.filename.clone(),
            success: true,
            category,
            size_mb: bytes_to_mb(upload.size_bytes()),
        }
    }

    fn rejected(upload: &Upload, error: &ValidationError) -> Self {
        BatchItemResult::Rejected {
            filename: upload.filename.clone(),
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchItemResult::Accepted { .. })
    }
}

/// Reject batches over the cap before any item is looked at.
pub fn check_batch_len(count: usize) -> Result<(), ValidationError> {
    if count > MAX_BATCH_FILES {
        return Err(ValidationError::TooManyFiles {
            max: MAX_BATCH_FILES,
        });
    }
    Ok(())
}

pub fn process_batch(
    registry: &TypeRegistry,
    uploads: &[Upload],
) -> Result<Vec<BatchItemResult>, ValidationError> {
    check_batch_len(uploads.len())?;

    let results = uploads
        .iter()
        .map(|upload| {
            let outcome = registry
                .resolve_by_extension(&upload.filename)
                .and_then(|spec| check_size(upload.size_bytes(), spec).map(|_| spec.category));
            match outcome {
                Ok(category) => BatchItemResult::accepted(upload, category),
                Err(err) => {
                    tracing::debug!(filename = %upload.filename, error = %err, "Batch item rejected");
                    BatchItemResult::rejected(upload, &err)
                }
            }
        })
        .collect();

    Ok(results)
}
