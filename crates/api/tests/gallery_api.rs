//! Integration tests for gallery listing and photo upload.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::{body_json, build_test_app, get_request, multipart_file_request, MockDataService};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_gallery_lists_empty() {
    let app = build_test_app(Arc::new(MockDataService::new()));

    let response = app.oneshot(get_request("/api/gallery")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["images"], serde_json::json!([]));
}

#[tokio::test]
async fn listing_failure_degrades_to_empty_200() {
    let mut data = MockDataService::new();
    data.fail_gallery_list = true;
    let app = build_test_app(Arc::new(data));

    let response = app.oneshot(get_request("/api/gallery")).await.unwrap();

    // Deliberately indistinguishable from an empty gallery.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["images"], serde_json::json!([]));
}

#[tokio::test]
async fn listing_maps_rows_newest_first() {
    let data = Arc::new(MockDataService::new());
    data.seed_gallery_image("https://storage.test/old.jpg", Some("Old photo"));
    data.seed_gallery_image("https://storage.test/new.jpg", None);
    let app = build_test_app(Arc::clone(&data));

    let response = app.oneshot(get_request("/api/gallery")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let images = body["images"].as_array().unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["src"], "https://storage.test/new.jpg");
    assert_eq!(images[0]["public_url"], "https://storage.test/new.jpg");
    // Missing alt text falls back to a fixed label.
    assert_eq!(images[0]["alt"], "Gallery photo");
    assert_eq!(images[1]["alt"], "Old photo");
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_jpeg_upload_succeeds_and_appears_in_listing() {
    let data = Arc::new(MockDataService::new());
    let app = build_test_app(Arc::clone(&data));

    let two_megabytes = vec![0xAB; 2 * 1024 * 1024];
    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "grandma.jpg",
        "image/jpeg",
        &two_megabytes,
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let url = body["url"].as_str().unwrap();
    assert!(!url.is_empty());
    assert!(body["path"].as_str().unwrap().ends_with(".jpg"));
    assert!(body["id"].is_string());

    // The record is visible on a subsequent listing.
    let listing = body_json(app.oneshot(get_request("/api/gallery")).await.unwrap()).await;
    let images = listing["images"].as_array().unwrap();
    assert!(images.iter().any(|img| img["public_url"] == url));
    assert!(images.iter().any(|img| img["alt"] == "grandma.jpg"));
}

#[tokio::test]
async fn anonymous_upload_keys_are_marked_anonymous() {
    let data = Arc::new(MockDataService::new());
    let app = build_test_app(Arc::clone(&data));

    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "photo.png",
        "image/png",
        &[1, 2, 3],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let paths = data.uploaded_paths.lock().unwrap();
    assert!(paths[0].starts_with("anonymous-"));
}

#[tokio::test]
async fn missing_file_field_returns_400() {
    let data = Arc::new(MockDataService::new());
    let app = build_test_app(Arc::clone(&data));

    let request = multipart_file_request(
        "/api/gallery/upload",
        "not_the_file",
        "photo.png",
        "image/png",
        &[1, 2, 3],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn unsupported_content_type_never_reaches_storage() {
    let data = Arc::new(MockDataService::new());
    let app = build_test_app(Arc::clone(&data));

    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "eulogy.pdf",
        "application/pdf",
        &[1, 2, 3],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(data.uploaded_paths.lock().unwrap().is_empty());
    assert!(data.gallery.lock().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_upload_never_reaches_storage() {
    let data = Arc::new(MockDataService::new());
    let app = build_test_app(Arc::clone(&data));

    let oversized = vec![0u8; 10 * 1024 * 1024 + 1];
    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "huge.jpg",
        "image/jpeg",
        &oversized,
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(data.uploaded_paths.lock().unwrap().is_empty());
}

#[tokio::test]
async fn record_insert_failure_still_reports_success() {
    let mut data = MockDataService::new();
    data.fail_gallery_insert = true;
    let data = Arc::new(data);
    let app = build_test_app(Arc::clone(&data));

    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "photo.webp",
        "image/webp",
        &[1, 2, 3],
    );
    let response = app.oneshot(request).await.unwrap();

    // The object is uploaded and stays uploaded; only the record is missing.
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["id"].is_null());
    assert_eq!(data.uploaded_paths.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn storage_failure_returns_500_with_stable_message() {
    let mut data = MockDataService::new();
    data.fail_uploads = true;
    let app = build_test_app(Arc::new(data));

    let request = multipart_file_request(
        "/api/gallery/upload",
        "file",
        "photo.jpg",
        "image/jpeg",
        &[1, 2, 3],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to upload file");
}
