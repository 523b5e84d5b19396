#![cfg(feature = "api")]
//! HTTP API tests driven through the router with multipart uploads.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use heron::ClassifierConfig;
use heron::api::{ApiSizeLimits, ApiState, create_router, create_router_with_state};
use serde_json::Value;
use serial_test::serial;
use tower::ServiceExt;

const BOUNDARY: &str = "X-HERON-BOUNDARY";

/// `(field name, filename, content)` parts encoded as multipart/form-data.
fn multipart_body(parts: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
Content-Type: application/octet-stream\r\n\
\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content.as_bytes());
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
        .expect("Failed to build request")
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1_000_000)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn router() -> Router {
    create_router(ClassifierConfig::default()).expect("Default config should build a router")
}

#[tokio::test]
#[serial]
async fn test_classify_file_by_filename() {
    let router = router();
    let body = multipart_body(&[("file", "invoice_march.pdf", "anything")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["document_type"], "invoice");
    assert_eq!(value["classifier_name"], "FilenameClassifier");
    assert_eq!(value["filename"], "invoice_march.pdf");
    assert!(value["id"].as_str().is_some());
}

#[tokio::test]
#[serial]
async fn test_classify_file_by_content() {
    let router = router();
    let body = multipart_body(&[("file", "upload.txt", "Statement Period: March 2024")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["document_type"], "bank_statement");
    assert_eq!(value["classifier_name"], "RegexClassifier");
}

#[tokio::test]
#[serial]
async fn test_unrecognized_file_is_ok_and_unknown() {
    let router = router();
    let body = multipart_body(&[("file", "xyz123.pdf", "%PDF-1.4 nothing here")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["document_type"], "unknown");
    assert_eq!(value["classifier_name"], "CompositeClassifier");
}

#[tokio::test]
#[serial]
async fn test_stored_result_can_be_fetched() {
    let router = router();
    let body = multipart_body(&[("file", "bank_statement_q1.pdf", "anything")]);

    let (_, created) = send(&router, multipart_request("/classify_file", body)).await;
    let id = created["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri(format!("/classifications/{}", id))
        .body(Body::empty())
        .unwrap();
    let (status, fetched) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["filename"], "bank_statement_q1.pdf");
    assert_eq!(fetched["document_type"], "bank_statement");
    assert_eq!(fetched["classifier_name"], "FilenameClassifier");
}

#[tokio::test]
async fn test_unknown_classification_id_is_404() {
    let router = router();
    let request = Request::builder()
        .uri("/classifications/00000000-0000-0000-0000-000000000000")
        .body(Body::empty())
        .unwrap();

    let (status, value) = send(&router, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["error_type"], "NotFound");
    assert_eq!(value["status_code"], 404);
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let router = router();
    let body = multipart_body(&[("attachment", "invoice.pdf", "anything")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["message"], "No file or filename provided");
}

#[tokio::test]
async fn test_empty_filename_is_400() {
    let router = router();
    let body = multipart_body(&[("file", "", "anything")]);

    let (status, _) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disallowed_extension_is_400() {
    let router = router();
    let body = multipart_body(&[("file", "payload.exe", "MZ")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["message"].as_str().unwrap().starts_with("File type not allowed"));
}

#[tokio::test]
async fn test_empty_file_is_400() {
    let router = router();
    let body = multipart_body(&[("file", "invoice.pdf", "")]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["message"], "Empty file provided");
}

#[tokio::test]
async fn test_classify_files_rejects_empty_file() {
    let router = router();
    let body = multipart_body(&[("files", "invoice.pdf", "anything"), ("files", "bank_statement.pdf", "")]);

    let (status, value) = send(&router, multipart_request("/classify_files", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["message"], "Empty file provided");
}

#[tokio::test]
async fn test_oversized_file_is_400() {
    let mut config = ClassifierConfig::default();
    config.upload.max_file_size_mb = 1;
    let router = create_router_with_state(ApiState::new(config).unwrap(), ApiSizeLimits::from_mb(5));
    let content = "a".repeat(1024 * 1024 + 1);
    let body = multipart_body(&[("file", "upload.txt", content.as_str())]);

    let (status, value) = send(&router, multipart_request("/classify_file", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["message"], "File too large. Maximum size is 1MB");
}

#[tokio::test]
#[serial]
async fn test_classify_files_preserves_upload_order() {
    let router = router();
    let body = multipart_body(&[
        ("files", "upload.txt", "Amount Due: 40"),
        ("files", "xyz123.pdf", "%PDF-1.4"),
        ("files", "drivers_permit.jpg", "not an image"),
    ]);

    let (status, value) = send(&router, multipart_request("/classify_files", body)).await;

    assert_eq!(status, StatusCode::OK);
    let results = value.as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["filename"], "upload.txt");
    assert_eq!(results[0]["document_type"], "invoice");
    assert_eq!(results[0]["classifier_name"], "RegexClassifier");

    assert_eq!(results[1]["filename"], "xyz123.pdf");
    assert_eq!(results[1]["document_type"], "unknown");

    assert_eq!(results[2]["filename"], "drivers_permit.jpg");
    assert_eq!(results[2]["document_type"], "drivers_licence");
    assert_eq!(results[2]["classifier_name"], "FilenameClassifier");
}

#[tokio::test]
async fn test_classify_files_rejects_whole_batch_on_bad_file() {
    let router = router();
    let body = multipart_body(&[("files", "invoice.pdf", "anything"), ("files", "script.sh", "echo")]);

    let (status, _) = send(&router, multipart_request("/classify_files", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_classify_files_without_files_is_400() {
    let router = router();
    let body = multipart_body(&[]);

    let (status, value) = send(&router, multipart_request("/classify_files", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["message"], "No files provided for classification");
}

#[tokio::test]
async fn test_health() {
    let router = router();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, value) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}
