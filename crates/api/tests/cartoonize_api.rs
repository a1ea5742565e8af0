//! Integration tests for `POST /cartoonize` with Replicate and Supabase
//! mocked by wiremock.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use cartoonizer_replicate::PollPolicy;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{body_json, post_json, post_raw};

const IMAGE: &str = "data:image/png;base64,aGVsbG8=";

async fn mount_prediction(server: &MockServer, final_status: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "p1", "status": "starting"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/predictions/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(final_status))
        .mount(server)
        .await;
}

async fn mount_artifact_and_upload(server: &MockServer, upload_status: u16) {
    Mock::given(method("GET"))
        .and(path("/out/y.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"cartoon".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/cartoonizer/cartoon-\d+\.png$"))
        .respond_with(ResponseTemplate::new(upload_status))
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn successful_cartoonize_returns_public_url() {
    let server = MockServer::start().await;
    mount_prediction(
        &server,
        json!({"id": "p1", "status": "succeeded", "output": [format!("{}/out/y.png", server.uri())]}),
    )
    .await;
    mount_artifact_and_upload(&server, 200).await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with(&format!(
        "{}/storage/v1/object/public/cartoonizer/cartoon-",
        server.uri()
    )));
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn image_url_is_accepted() {
    let server = MockServer::start().await;
    mount_prediction(
        &server,
        json!({"id": "p1", "status": "succeeded", "output": [format!("{}/out/y.png", server.uri())]}),
    )
    .await;
    mount_artifact_and_upload(&server, 200).await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(
        app,
        "/cartoonize",
        json!({"imageData": "https://example.com/cat.png"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let received = server.received_requests().await.unwrap_or_default();
    let create = received
        .iter()
        .find(|r| r.url.path() == "/predictions")
        .expect("prediction should be created");
    let body: serde_json::Value = serde_json::from_slice(&create.body).unwrap();
    assert_eq!(body["input"]["image"], "https://example.com/cat.png");
}

#[tokio::test]
async fn missing_image_returns_400_without_upstream_calls() {
    let server = MockServer::start().await;
    let app = || common::build_test_app(common::test_config(&server.uri()));

    for body in [json!({}), json!({"imageData": ""}), json!({"imageData": null})] {
        let response = post_json(app(), "/cartoonize", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json["error"], "No image data");
    }

    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn malformed_json_returns_400_envelope() {
    let server = MockServer::start().await;
    let app = common::build_test_app(common::test_config(&server.uri()));

    let response = post_raw(app, "/cartoonize", "application/json", "{not json".to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn failed_generation_returns_500() {
    let server = MockServer::start().await;
    mount_prediction(
        &server,
        json!({"id": "p1", "status": "failed", "error": "model crashed"}),
    )
    .await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "GENERATION_FAILED");
    assert_eq!(json["error"], "Image processing failed");
    assert!(json.get("url").is_none());
}

#[tokio::test]
async fn exhausted_poll_budget_returns_504() {
    let server = MockServer::start().await;
    mount_prediction(&server, json!({"id": "p1", "status": "processing"})).await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "TIMEOUT");
    // One create plus exactly three status reads.
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn empty_output_returns_500() {
    let server = MockServer::start().await;
    mount_prediction(&server, json!({"id": "p1", "status": "succeeded", "output": []})).await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "EMPTY_RESULT");
}

#[tokio::test]
async fn upload_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_prediction(
        &server,
        json!({"id": "p1", "status": "succeeded", "output": [format!("{}/out/y.png", server.uri())]}),
    )
    .await;
    mount_artifact_and_upload(&server, 500).await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UPLOAD_FAILED");
    assert!(json.get("url").is_none());
}

#[tokio::test]
async fn submission_rejected_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated"))
        .mount(&server)
        .await;

    let app = common::build_test_app(common::test_config(&server.uri()));
    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "SUBMISSION_FAILED");
}

#[tokio::test]
async fn request_deadline_returns_timeout_envelope() {
    let server = MockServer::start().await;
    mount_prediction(&server, json!({"id": "p1", "status": "processing"})).await;

    let mut config = common::test_config(&server.uri());
    config.poll_policy = PollPolicy::unbounded(Duration::from_millis(50));
    config.request_timeout_secs = 1;
    let app = common::build_test_app(config);

    let response = post_json(app, "/cartoonize", json!({"imageData": IMAGE})).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "TIMEOUT");
    assert_eq!(json["error"], "Image processing timed out");
}
