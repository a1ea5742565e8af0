//! Application router and middleware stack.
//!
//! The binary and the integration tests both go through
//! [`build_app_router`], so tests exercise the production layers.

use std::any::Any;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::response::ApiResponse;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body. Base64 images are big.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extra time the outer [`TimeoutLayer`] allows beyond the cartoonize
/// deadline enforced in the handler.
pub const TIMEOUT_LAYER_GRACE: Duration = Duration::from_secs(5);

/// Build the full application [`Router`].
///
/// Layers are added innermost first, so requests pass through CORS,
/// request id, tracing, request id echo, the outer timeout, panic recovery
/// and the body limit in that order.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let outer_deadline = config.request_timeout() + TIMEOUT_LAYER_GRACE;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            outer_deadline,
        ))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// Panics surface as the standard envelope with code `INTERNAL_ERROR`.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::failure(
            "INTERNAL_ERROR",
            "Internal server error".to_string(),
        )),
    )
        .into_response()
}

/// CORS for the configured origins.
///
/// `*` allows any origin without credentials; a list allows exactly those
/// origins with credentials. Origins are validated when the config loads,
/// so entries that fail to parse here are skipped.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if config.allows_any_origin() {
        return cors.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(origins).allow_credentials(true)
}
