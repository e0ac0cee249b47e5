use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The ten upload categories understood by the gateway.
///
/// Serialized (and routed) by its short key: `zip`, `excel`, `csv` and `word`
/// stand for archive, spreadsheet, tabular and word-document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    #[serde(rename = "zip")]
    Archive,
    Pdf,
    #[serde(rename = "excel")]
    Spreadsheet,
    #[serde(rename = "csv")]
    Tabular,
    #[serde(rename = "word")]
    WordDocument,
    Audio,
    Json,
    Xml,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file category '{0}'")]
pub struct UnknownCategoryError(pub String);

impl FileCategory {
    /// Registry order.
    pub const ALL: [FileCategory; 10] = [
        FileCategory::Image,
        FileCategory::Video,
        FileCategory::Archive,
        FileCategory::Pdf,
        FileCategory::Spreadsheet,
        FileCategory::Tabular,
        FileCategory::WordDocument,
        FileCategory::Audio,
        FileCategory::Json,
        FileCategory::Xml,
    ];

    /// Route key used in `/files/upload/{category}` and in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Archive => "zip",
            FileCategory::Pdf => "pdf",
            FileCategory::Spreadsheet => "excel",
            FileCategory::Tabular => "csv",
            FileCategory::WordDocument => "word",
            FileCategory::Audio => "audio",
            FileCategory::Json => "json",
            FileCategory::Xml => "xml",
        }
    }

    fn long_name(&self) -> &'static str {
        match self {
            FileCategory::Archive => "archive",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Tabular => "tabular",
            FileCategory::WordDocument => "word-document",
            other => other.as_str(),
        }
    }

    /// Human label used in upload success messages.
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Archive => "ZIP archive",
            FileCategory::Pdf => "PDF",
            FileCategory::Spreadsheet => "Excel file",
            FileCategory::Tabular => "CSV file",
            FileCategory::WordDocument => "Word document",
            FileCategory::Audio => "Audio file",
            FileCategory::Json => "JSON file",
            FileCategory::Xml => "XML file",
        }
    }

    /// Accepted extensions, lower case and without the leading dot.
    pub fn default_extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Image => &["jpg", "jpeg", "png", "gif"],
            FileCategory::Video => &["mp4", "avi", "mov", "mkv"],
            FileCategory::Archive => &["zip"],
            FileCategory::Pdf => &["pdf"],
            FileCategory::Spreadsheet => &["xlsx", "xls"],
            FileCategory::Tabular => &["csv"],
            FileCategory::WordDocument => &["docx", "doc"],
            FileCategory::Audio => &["mp3", "wav", "ogg"],
            FileCategory::Json => &["json"],
            FileCategory::Xml => &["xml"],
        }
    }

    /// Default size ceiling in MB (1 MB = 1024 * 1024 bytes).
    pub fn default_max_size_mb(&self) -> usize {
        match self {
            FileCategory::Image => 10,
            FileCategory::Video => 100,
            FileCategory::Archive => 50,
            FileCategory::Pdf => 20,
            FileCategory::Spreadsheet => 15,
            FileCategory::Tabular => 10,
            FileCategory::WordDocument => 15,
            FileCategory::Audio => 30,
            FileCategory::Json => 5,
            FileCategory::Xml => 5,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        FileCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == key || c.long_name() == key)
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_keys_and_long_names() {
        assert_eq!("zip".parse::<FileCategory>(), Ok(FileCategory::Archive));
        assert_eq!("archive".parse::<FileCategory>(), Ok(FileCategory::Archive));
        assert_eq!("Excel".parse::<FileCategory>(), Ok(FileCategory::Spreadsheet));
        assert_eq!(
            "word-document".parse::<FileCategory>(),
            Ok(FileCategory::WordDocument)
        );
        assert_eq!("csv".parse::<FileCategory>(), Ok(FileCategory::Tabular));
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "spreadsheets".parse::<FileCategory>().unwrap_err();
        assert_eq!(err, UnknownCategoryError("spreadsheets".to_string()));
    }

    #[test]
    fn test_serializes_as_route_key() {
        let json = serde_json::to_string(&FileCategory::WordDocument).unwrap();
        assert_eq!(json, "\"word\"");
        for category in FileCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
        }
    }
}
