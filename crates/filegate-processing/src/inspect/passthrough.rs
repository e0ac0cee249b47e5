use super::Inspector;
use crate::metadata::{BasicDescriptor, FileDescriptor, FileSummary};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Categories whose content is not parsed: spreadsheets, word documents,
/// audio and video. The descriptor carries size plus the requested
/// extension and declared content type.
pub struct PassthroughInspector {
    report_extension: bool,
    report_content_type: bool,
}

impl PassthroughInspector {
    pub fn with_extension() -> Self {
        Self {
            report_extension: true,
            report_content_type: false,
        }
    }

    pub fn with_content_type() -> Self {
        Self {
            report_extension: false,
            report_content_type: true,
        }
    }

    pub fn with_extension_and_content_type() -> Self {
        Self {
            report_extension: true,
            report_content_type: true,
        }
    }
}

impl Inspector for PassthroughInspector {
    type Decoded = ();

    fn decode(&self, _upload: &Upload) -> Result<(), ValidationError> {
        Ok(())
    }

    fn summarize(&self, upload: &Upload, _: ()) -> FileDescriptor {
        let extension = self
            .report_extension
            .then(|| upload.extension().map(|ext| format!(".{}", ext)))
            .flatten();
        let content_type = if self.report_content_type {
            Some(
                upload
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
            )
        } else {
            None
        };

        FileDescriptor::Basic(BasicDescriptor {
            summary: FileSummary::of(upload),
            extension,
            content_type,
        })
    }
}
