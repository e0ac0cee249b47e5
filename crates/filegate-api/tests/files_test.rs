//! Upload validation integration tests.
//!
//! Run with: `cargo test -p filegate-api --test files_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::Value;

use helpers::fixtures::{self, file_part, single_file_form};
use helpers::{setup_test_server, TEST_JSON_LIMIT_BYTES};

async fn upload(category: &str, form: MultipartForm) -> (StatusCode, Value) {
    let server = setup_test_server();
    let response = server
        .post(&format!("/files/upload/{}", category))
        .multipart(form)
        .await;
    (response.status_code(), response.json())
}

#[tokio::test]
async fn test_upload_image() {
    let form = single_file_form(fixtures::create_test_png(4, 3), "photo.png", "image/png");
    let (status, body) = upload("image", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["data"]["filename"], "photo.png");
    assert_eq!(body["data"]["format"], "PNG");
    assert_eq!(body["data"]["mode"], "RGB");
    assert_eq!(body["data"]["width"], 4);
    assert_eq!(body["data"]["height"], 3);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_upload_zip_lists_entries() {
    let form = single_file_form(fixtures::create_test_zip(), "bundle.zip", "application/zip");
    let (status, body) = upload("zip", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_files"], 2);
    let files = body["data"]["files"].as_array().unwrap();
    assert_eq!(files[0]["filename"], "readme.txt");
    assert_eq!(files[0]["compression_ratio"], 0.0);
    assert_eq!(files[1]["filename"], "data/repeat.txt");
    assert!(files[1]["compression_ratio"].as_f64().unwrap() > 90.0);
}

#[tokio::test]
async fn test_upload_pdf() {
    let form = single_file_form(fixtures::create_test_pdf(), "doc.pdf", "application/pdf");
    let (status, body) = upload("pdf", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_valid"], true);
}

#[tokio::test]
async fn test_upload_pdf_without_signature() {
    let form = single_file_form(b"not a pdf".to_vec(), "doc.pdf", "application/pdf");
    let (status, body) = upload("pdf", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "InvalidFormat");
}

#[tokio::test]
async fn test_upload_csv_reports_columns_and_preview() {
    let form = single_file_form(fixtures::create_test_csv(), "people.csv", "text/csv");
    let (status, body) = upload("csv", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "CSV file uploaded successfully");
    assert_eq!(body["data"]["total_rows"], 3);
    assert_eq!(body["data"]["total_columns"], 3);
    assert_eq!(
        body["data"]["columns"],
        serde_json::json!(["name", "age", "city"])
    );
    assert_eq!(body["data"]["preview_rows"][0][0], "Ana");
}

#[tokio::test]
async fn test_upload_json_object() {
    let form = single_file_form(fixtures::create_test_json(), "data.json", "application/json");
    let (status, body) = upload("json", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data_type"], "object");
    assert_eq!(body["data"]["key_count"], 3);
    assert_eq!(body["data"]["is_valid"], true);
}

#[tokio::test]
async fn test_upload_malformed_json() {
    let form = single_file_form(b"{\"a\": ".to_vec(), "data.json", "application/json");
    let (status, body) = upload("json", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "MalformedDocument");
}

#[tokio::test]
async fn test_upload_xml() {
    let form = single_file_form(fixtures::create_test_xml(), "catalog.xml", "application/xml");
    let (status, body) = upload("xml", form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["root_tag"], "catalog");
    assert_eq!(body["data"]["total_elements"], 4);
    assert_eq!(body["data"]["root_attributes"]["version"], "2");
}

#[tokio::test]
async fn test_upload_passthrough_categories() {
    let cases = [
        ("video", "clip.mp4", "video/mp4"),
        ("excel", "sheet.xlsx", "application/octet-stream"),
        ("word", "letter.docx", "application/octet-stream"),
        ("audio", "song.mp3", "audio/mpeg"),
    ];
    for (category, filename, mime) in cases {
        let form = single_file_form(fixtures::opaque_bytes(64), filename, mime);
        let (status, body) = upload(category, form).await;
        assert_eq!(status, StatusCode::OK, "{} upload failed: {}", category, body);
        assert_eq!(body["data"]["size_bytes"], 64);
    }

    let form = single_file_form(fixtures::opaque_bytes(8), "clip.mp4", "video/mp4");
    let (_, body) = upload("video", form).await;
    assert_eq!(body["data"]["content_type"], "video/mp4");
    assert!(body["data"].get("extension").is_none());

    let form = single_file_form(fixtures::opaque_bytes(8), "song.mp3", "audio/mpeg");
    let (_, body) = upload("audio", form).await;
    assert_eq!(body["data"]["extension"], ".mp3");
    assert_eq!(body["data"]["content_type"], "audio/mpeg");
}

#[tokio::test]
async fn test_upload_wrong_extension() {
    let form = single_file_form(fixtures::create_test_png(2, 2), "photo.bmp", "image/bmp");
    let (status, body) = upload("image", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "UnsupportedExtension");
    assert!(body["error"].as_str().unwrap().contains(".png"));
}

#[tokio::test]
async fn test_upload_too_large() {
    let mut data = b"[".to_vec();
    data.extend(std::iter::repeat(b' ').take(TEST_JSON_LIMIT_BYTES));
    data.push(b']');
    let form = single_file_form(data, "big.json", "application/json");
    let (status, body) = upload("json", form).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error_type"], "PayloadTooLarge");
}

#[tokio::test]
async fn test_upload_corrupt_image() {
    let form = single_file_form(fixtures::opaque_bytes(32), "broken.png", "image/png");
    let (status, body) = upload("image", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "CorruptPayload");
}

#[tokio::test]
async fn test_upload_unknown_category() {
    let form = single_file_form(fixtures::create_test_png(2, 2), "photo.png", "image/png");
    let (status, body) = upload("gif", form).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "UnknownCategory");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let form = MultipartForm::new().add_text("note", "no file here");
    let (status, body) = upload("image", form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "InvalidInput");
}

#[tokio::test]
async fn test_batch_reports_each_file() {
    let server = setup_test_server();
    let form = MultipartForm::new()
        .add_part("files", file_part(fixtures::create_test_png(2, 2), "a.png", "image/png"))
        .add_part(
            "files",
            file_part(fixtures::opaque_bytes(16), "tool.exe", "application/octet-stream"),
        )
        .add_part("files", file_part(fixtures::create_test_csv(), "b.csv", "text/csv"));

    let response = server.post("/files/upload/multiple").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["total_files"], 3);
    assert_eq!(data["successful"], 2);
    assert_eq!(data["failed"], 1);

    let results = data["results"].as_array().unwrap();
    assert_eq!(results[0]["filename"], "a.png");
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["category"], "image");
    assert_eq!(results[1]["filename"], "tool.exe");
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].is_string());
    assert_eq!(results[2]["category"], "csv");
}

#[tokio::test]
async fn test_batch_rejects_more_than_ten_files() {
    let server = setup_test_server();
    let form = (0..11).fold(MultipartForm::new(), |form, i| {
        form.add_part(
            "files",
            file_part(fixtures::create_test_csv(), &format!("f{}.csv", i), "text/csv"),
        )
    });

    let response = server.post("/files/upload/multiple").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("10"));
}

#[tokio::test]
async fn test_batch_of_exactly_ten_files() {
    let server = setup_test_server();
    let form = (0..10).fold(MultipartForm::new(), |form, i| {
        form.add_part(
            "files",
            file_part(fixtures::create_test_json(), &format!("f{}.json", i), "application/json"),
        )
    });

    let response = server.post("/files/upload/multiple").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["successful"], 10);
}

#[tokio::test]
async fn test_files_info_lists_every_category() {
    let server = setup_test_server();
    let response = server.get("/files/info").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let types = body["data"]["supported_types"].as_object().unwrap();
    assert_eq!(types.len(), 10);
    assert_eq!(
        types["image"]["extensions"],
        serde_json::json!([".jpg", ".jpeg", ".png", ".gif"])
    );
    assert_eq!(types["image"]["max_size_mb"], 10.0);
    assert_eq!(types["video"]["max_size_mb"], 100.0);
    assert!(types.contains_key("excel"));
    assert!(types.contains_key("word"));
}
