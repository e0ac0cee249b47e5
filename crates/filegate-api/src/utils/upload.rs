//! Multipart helpers for the file upload handlers

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use filegate_core::{AppError, MAX_BATCH_FILES};
use filegate_processing::{Upload, ValidationError};

use crate::error::HttpAppError;

/// Field name carrying the single upload.
pub const FILE_FIELD: &str = "file";

/// Field name repeated once per file in a batch upload.
pub const BATCH_FIELD: &str = "files";

const UNKNOWN_FILENAME: &str = "unknown";

/// Buffer one multipart field into an [`Upload`].
pub async fn read_upload(field: Field<'_>) -> Result<Upload, HttpAppError> {
    let filename = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_FILENAME.to_string());
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await?;
    Ok(Upload::new(filename, content_type, data))
}

/// Extract the `file` field. Only one is accepted; other fields are ignored.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<Upload, HttpAppError> {
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            )
            .into());
        }
        upload = Some(read_upload(field).await?);
    }

    upload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()).into())
}

/// Extract every `files` field, refusing the request as soon as one more
/// than [`MAX_BATCH_FILES`] arrives, before its bytes are read.
pub async fn extract_batch_uploads(mut multipart: Multipart) -> Result<Vec<Upload>, HttpAppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(BATCH_FIELD) {
            continue;
        }
        if uploads.len() == MAX_BATCH_FILES {
            return Err(ValidationError::TooManyFiles {
                max: MAX_BATCH_FILES,
            }
            .into());
        }
        uploads.push(read_upload(field).await?);
    }

    if uploads.is_empty() {
        return Err(AppError::InvalidInput("No files provided".to_string()).into());
    }
    Ok(uploads)
}
