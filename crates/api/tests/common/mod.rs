#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cartoonizer_api::config::ServerConfig;
use cartoonizer_api::router::build_app_router;
use cartoonizer_api::state::AppState;
use cartoonizer_replicate::{PollPolicy, ReplicateConfig};
use cartoonizer_storage::StorageConfig;

/// Build a test `ServerConfig` pointing both Replicate and Supabase at
/// `upstream` (usually a wiremock server URI), with a fast poll policy.
pub fn test_config(upstream: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        replicate: ReplicateConfig {
            api_base: upstream.to_string(),
            api_token: "r8-test".to_string(),
            model_version: "test-version".to_string(),
        },
        poll_policy: PollPolicy::bounded(Duration::from_millis(5), 3),
        storage: StorageConfig {
            base_url: upstream.to_string(),
            api_key: "sb-test".to_string(),
            bucket: "cartoonizer".to_string(),
        },
        upload_input: false,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(config: ServerConfig) -> Router {
    let state = AppState::from_config(&config, reqwest::Client::new());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
