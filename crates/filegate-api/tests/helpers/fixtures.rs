//! Test fixtures: small valid payloads per category and multipart builders.

use std::io::{Cursor, Write};

use axum_test::multipart::{MultipartForm, Part};
use image::{ImageFormat, RgbImage};

/// PNG of the given dimensions, encoded with the `image` crate.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

/// Minimal PDF; only the signature is checked.
pub fn create_test_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF".to_vec()
}

/// Zip with one stored and one deflated entry.
pub fn create_test_zip() -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let stored = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    let deflated = zip::write::FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    writer.start_file("readme.txt", stored).expect("start_file");
    writer.write_all(b"hello archive").expect("write");
    writer.start_file("data/repeat.txt", deflated).expect("start_file");
    writer.write_all(&[b'a'; 4096]).expect("write");

    writer.finish().expect("finish zip").into_inner()
}

pub fn create_test_csv() -> Vec<u8> {
    b"name,age,city\nAna,31,Madrid\nLuis,45,Sevilla\n".to_vec()
}

pub fn create_test_json() -> Vec<u8> {
    br#"{"name": "filegate", "version": 1, "tags": ["a", "b"]}"#.to_vec()
}

pub fn create_test_xml() -> Vec<u8> {
    br#"<?xml version="1.0"?><catalog version="2"><book id="1"/><book id="2"><title>Rust</title></book></catalog>"#
        .to_vec()
}

/// Opaque bytes for categories whose content is not parsed.
pub fn opaque_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn file_part(data: Vec<u8>, filename: &str, mime_type: &str) -> Part {
    Part::bytes(data).file_name(filename).mime_type(mime_type)
}

/// Multipart form with a single `file` field.
pub fn single_file_form(data: Vec<u8>, filename: &str, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(data, filename, mime_type))
}
