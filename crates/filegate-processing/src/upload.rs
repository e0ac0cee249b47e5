//! Types for a received upload.

use bytes::Bytes;

use crate::validator::file_extension;

/// One file as decoded from a multipart field, fully buffered.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Upload {
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.filename)
    }
}

/// Size in MB (1024 * 1024 bytes) rounded to two decimals.
pub fn bytes_to_mb(bytes: usize) -> f64 {
    round2(bytes as f64 / (1024.0 * 1024.0))
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_mb_rounds_to_two_decimals() {
        assert_eq!(bytes_to_mb(0), 0.0);
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(1_500_000), 1.43);
    }

    #[test]
    fn test_upload_extension() {
        let upload = Upload::new("Data.CSV", None, b"a,b\n".to_vec());
        assert_eq!(upload.extension().as_deref(), Some("csv"));
        assert_eq!(upload.size_bytes(), 4);
    }
}
