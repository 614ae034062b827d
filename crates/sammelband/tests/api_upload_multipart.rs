#![cfg(feature = "api")]
//! Integration tests for the upload endpoints using multipart requests.

use std::io::Cursor;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use image::{ImageFormat, Rgb, RgbImage};
use lopdf::Document;
use sammelband::api::{ApiSizeLimits, create_router_with_limits};
use sammelband::pdf::assemble_images;
use sammelband::ServiceConfig;
use tower::ServiceExt;

const BOUNDARY: &str = "X-BOUNDARY";

/// One multipart part: field name, optional filename, content type, bytes.
type Part<'a> = (&'a str, Option<&'a str>, &'a str, &'a [u8]);

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n").as_bytes(),
            ),
            None => {
                body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes())
            }
        }
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .header("content-length", body.len())
        .body(Body::from(body))
        .expect("build request")
}

/// Router over a fresh temp directory; the `TempDir` guard must be kept
/// alive for the duration of the test.
fn test_router(base: &tempfile::TempDir) -> (Router, ServiceConfig) {
    let config = ServiceConfig::with_base_dir(base.path());
    config.ensure_dirs().expect("ensure dirs");
    let router = create_router_with_limits(config.clone(), ApiSizeLimits::from_mb(5, 5));
    (router, config)
}

fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([20, 120, 220]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("encode jpeg fixture");
    bytes
}

fn pdf_fixture() -> Vec<u8> {
    assemble_images(&[jpeg_fixture(400, 800)])
        .expect("assemble")
        .expect("one image yields a document")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

#[tokio::test]
async fn test_combine_missing_file_field_is_400() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let body = multipart_body(&[("note", None, "text/plain", b"not a file")]);
    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"No file part");
}

#[tokio::test]
async fn test_combine_empty_selection_is_400() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    // An empty file input submits one part with an empty filename.
    let body = multipart_body(&[("file", Some(""), "application/octet-stream", b"")]);
    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"No selected files");
}

#[tokio::test]
async fn test_combine_pdf_and_jpeg_yields_two_pages() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let pdf = pdf_fixture();
    let photo = jpeg_fixture(800, 400);
    let body = multipart_body(&[
        ("file", Some("report.pdf"), "application/pdf", &pdf),
        ("file", Some("photo.jpg"), "image/jpeg", &photo),
    ]);

    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").expect("content type"),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get("content-disposition").expect("disposition"),
        "attachment; filename=\"combined_output.pdf\""
    );

    let merged = body_bytes(response).await;
    let doc = Document::load_mem(&merged).expect("merged output parses");
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_combine_drops_unrecognized_extensions() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let photo = jpeg_fixture(640, 480);
    let body = multipart_body(&[
        ("file", Some("malware.exe"), "application/octet-stream", b"MZ..."),
        ("file", Some("photo.jpg"), "image/jpeg", &photo),
    ]);

    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let merged = body_bytes(response).await;
    let doc = Document::load_mem(&merged).expect("merged output parses");
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_combine_with_only_unrecognized_files_is_400() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let body = multipart_body(&[("file", Some("notes.txt"), "text/plain", b"hello")]);
    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    // Everything was dropped by classification, so there is nothing to
    // produce.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_combine_corrupt_pdf_is_500_with_generic_body() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let body = multipart_body(&[("file", Some("broken.pdf"), "application/pdf", b"%PDF-garbage")]);
    let response = router
        .oneshot(multipart_request("/upload_images_pdfs", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_bytes(response).await, b"Conversion failed");
}

#[tokio::test]
async fn test_rtf_missing_file_field_is_400() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let body = multipart_body(&[("other", None, "text/plain", b"x")]);
    let response = router
        .oneshot(multipart_request("/upload_rtf", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"No file part");
}

#[tokio::test]
async fn test_rtf_empty_filename_is_400() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let body = multipart_body(&[("file", Some(""), "application/rtf", b"")]);
    let response = router
        .oneshot(multipart_request("/upload_rtf", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"No selected file");
}

#[tokio::test]
async fn test_rtf_conversion_returns_attachment_and_writes_output() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, config) = test_router(&base);

    let body = multipart_body(&[("file", Some("notes.rtf"), "application/rtf", br"{\rtf1 Hello World}")]);
    let response = router
        .oneshot(multipart_request("/upload_rtf", body))
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get("content-disposition")
        .expect("disposition")
        .to_str()
        .expect("ascii")
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"notes_"));
    assert!(disposition.ends_with("_converted.txt\""));

    let text = String::from_utf8(body_bytes(response).await).expect("utf-8 output");
    assert!(text.starts_with("Converted from: notes.rtf\nDate-time: "));
    assert!(text.ends_with("\n\nHello World"));

    // The conversion is also persisted to the converted directory.
    let converted: Vec<_> = std::fs::read_dir(&config.converted_dir)
        .expect("read converted dir")
        .collect();
    assert_eq!(converted.len(), 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = tempfile::tempdir().expect("tempdir");
    let (router, _config) = test_router(&base);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build request");
    let response = router.oneshot(request).await.expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let value: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).expect("json");
    assert_eq!(value["status"], "healthy");
    assert!(value["version"].is_string());
}
