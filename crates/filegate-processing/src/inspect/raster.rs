//! Image inspector - decode and report format, color mode and dimensions

use std::io::Cursor;

use image::{ColorType, GenericImageView, ImageReader};
use serde::Serialize;

use super::Inspector;
use crate::metadata::{FileDescriptor, FileSummary, ImageDescriptor};
use crate::upload::Upload;
use crate::validator::ValidationError;

/// Decoded raster properties, also reported alongside vision analyses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub mode: String,
}

/// Decode `data` fully and read its properties.
pub fn describe_image(data: &[u8]) -> Result<ImageInfo, ValidationError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ValidationError::CorruptPayload(e.to_string()))?;
    let format = reader
        .format()
        .map(|f| format!("{:?}", f).to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    let img = reader
        .decode()
        .map_err(|e| ValidationError::CorruptPayload(e.to_string()))?;

    let (width, height) = img.dimensions();
    Ok(ImageInfo {
        width,
        height,
        format,
        mode: color_mode(img.color()),
    })
}

/// Conventional mode names (`L`, `RGB`, `RGBA`, ...).
fn color_mode(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        ColorType::La16 => "LA;16".to_string(),
        ColorType::Rgb16 => "RGB;16".to_string(),
        ColorType::Rgba16 => "RGBA;16".to_string(),
        ColorType::Rgb32F => "RGB;F".to_string(),
        ColorType::Rgba32F => "RGBA;F".to_string(),
        other => format!("{:?}", other),
    }
}

pub struct ImageInspector;

impl Inspector for ImageInspector {
    type Decoded = ImageInfo;

    fn decode(&self, upload: &Upload) -> Result<ImageInfo, ValidationError> {
        describe_image(&upload.data)
    }

    fn summarize(&self, upload: &Upload, info: ImageInfo) -> FileDescriptor {
        FileDescriptor::Image(ImageDescriptor {
            summary: FileSummary::of(upload),
            format: info.format,
            mode: info.mode,
            width: info.width,
            height: info.height,
        })
    }
}
