//! Descriptor types produced by the inspectors.
//!
//! Every descriptor flattens a [`FileSummary`] so the wire shape is one flat
//! object per file.


use serde::Serialize;
use serde_json::{Map, Value};

use crate::upload::{bytes_to_mb, round2, Upload};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub filename: String,
    pub size_bytes: usize,
    pub size_mb: f64,
}

impl FileSummary {
    pub fn of(upload: &Upload) -> Self {
        Self {
            filename: upload.filename.clone(),
            size_bytes: upload.size_bytes(),
            size_mb: bytes_to_mb(upload.size_bytes()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    pub format: String,
    pub mode: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub compressed_size: u64,
    /// Space saved, as a percentage rounded to two decimals.
    pub compression_ratio: f64,
}

impl ArchiveEntry {
    pub fn new(filename: impl Into<String>, size_bytes: u64, compressed_size: u64) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
            compressed_size,
            compression_ratio: compression_ratio(size_bytes, compressed_size),
        }
    }
}

/// `(1 - compressed / uncompressed) * 100`, and exactly 0 for empty entries.
pub fn compression_ratio(uncompressed: u64, compressed: u64) -> f64 {
    if uncompressed == 0 {
        return 0.0;
    }
    round2((1.0 - compressed as f64 / uncompressed as f64) * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    pub total_files: usize,
    pub files: Vec<ArchiveEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    /// Record count, header included.
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<String>,
    pub preview_rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
    Null,
}

/// Top-level shape of a JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "data_type")]
pub enum JsonShape {
    #[serde(rename = "object")]
    Mapping { keys: Vec<String>, key_count: usize },
    #[serde(rename = "array")]
    Sequence { array_length: usize },
    #[serde(rename = "scalar")]
    Scalar { scalar_type: ScalarKind },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    #[serde(flatten)]
    pub shape: JsonShape,
    pub is_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    pub root_tag: String,
    /// Root plus every descendant element.
    pub total_elements: usize,
    /// Attribute values in document order.
    pub root_attributes: Map<String, Value>,
    pub is_valid: bool,
}

/// Descriptor for categories that are not parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicDescriptor {
    #[serde(flatten)]
    pub summary: FileSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileDescriptor {
    Image(ImageDescriptor),
    Archive(ArchiveDescriptor),
    Pdf(PdfDescriptor),
    Tabular(TabularDescriptor),
    Json(JsonDescriptor),
    Xml(XmlDescriptor),
    Basic(BasicDescriptor),
}

impl FileDescriptor {
    pub fn summary(&self) -> &FileSummary {
        match self {
            FileDescriptor::Image(d) => &d.summary,
            FileDescriptor::Archive(d) => &d.summary,
            FileDescriptor::Pdf(d) => &d.summary,
            FileDescriptor::Tabular(d) => &d.summary,
            FileDescriptor::Json(d) => &d.summary,
            FileDescriptor::Xml(d) => &d.summary,
            FileDescriptor::Basic(d) => &d.summary,
        }
    }
}
