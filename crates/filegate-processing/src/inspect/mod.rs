//! Per-category inspectors
//!
//! Each inspector decodes the (already validated) payload and summarizes it
//! into a [`FileDescriptor`]. Decoding failures are returned as typed
//! [`ValidationError`]s; a descriptor is never partially filled.

mod archive;
mod json;
mod passthrough;
mod pdf;
mod raster;
mod tabular;
mod xml;

pub use archive::ArchiveInspector;
pub use json::{json_shape, JsonInspector};
pub use passthrough::PassthroughInspector;
pub use pdf::{PdfInspector, PDF_SIGNATURE};
pub use raster::{describe_image, ImageInfo, ImageInspector};
pub use tabular::{TabularInspector, PREVIEW_ROWS};
pub use xml::{XmlInspector, XmlTree};

use filegate_core::FileCategory;

use crate::metadata::FileDescriptor;
use crate::upload::Upload;
use crate::validator::ValidationError;

pub trait Inspector {
    /// Intermediate, owned result of parsing the payload.
    type Decoded;

    fn decode(&self, upload: &Upload) -> Result<Self::Decoded, ValidationError>;

    fn summarize(&self, upload: &Upload, decoded: Self::Decoded) -> FileDescriptor;

    fn inspect(&self, upload: &Upload) -> Result<FileDescriptor, ValidationError> {
        let decoded = self.decode(upload)?;
        Ok(self.summarize(upload, decoded))
    }
}

/// Run the inspector registered for `category`.
pub fn inspect(category: FileCategory, upload: &Upload) -> Result<FileDescriptor, ValidationError> {
    match category {
        FileCategory::Image => ImageInspector.inspect(upload),
        FileCategory::Archive => ArchiveInspector.inspect(upload),
        FileCategory::Pdf => PdfInspector.inspect(upload),
        FileCategory::Tabular => TabularInspector.inspect(upload),
        FileCategory::Json => JsonInspector.inspect(upload),
        FileCategory::Xml => XmlInspector.inspect(upload),
        FileCategory::Spreadsheet | FileCategory::WordDocument => {
            PassthroughInspector::with_extension().inspect(upload)
        }
        FileCategory::Video => PassthroughInspector::with_content_type().inspect(upload),
        FileCategory::Audio => PassthroughInspector::with_extension_and_content_type().inspect(upload),
    }
}

/// Strict UTF-8 view of the payload for the text-based formats.
pub(crate) fn decode_utf8<'a>(upload: &'a Upload, kind: &str) -> Result<&'a str, ValidationError> {
    std::str::from_utf8(&upload.data).map_err(|e| {
        ValidationError::EncodingError(format!(
            "{} file must be UTF-8 encoded: invalid byte at offset {}",
            kind,
            e.valid_up_to()
        ))
    })
}
