use super::Inspector;
use crate::metadata::{FileDescriptor, FileSummary, PdfDescriptor};
use crate::upload::Upload;
use crate::validator::ValidationError;

pub const PDF_SIGNATURE: &[u8; 4] = b"%PDF";

/// Shallow check: a payload starting with `%PDF` is reported valid, nothing
/// past the signature is parsed.
pub struct PdfInspector;

impl Inspector for PdfInspector {
    type Decoded = ();

    fn decode(&self, upload: &Upload) -> Result<(), ValidationError> {
        if upload.data.starts_with(PDF_SIGNATURE) {
            Ok(())
        } else {
            Err(ValidationError::InvalidFormat(
                "File is not a valid PDF: missing %PDF signature".to_string(),
            ))
        }
    }

    fn summarize(&self, upload: &Upload, _: ()) -> FileDescriptor {
        FileDescriptor::Pdf(PdfDescriptor {
            summary: FileSummary::of(upload),
            is_valid: true,
        })
    }
}
