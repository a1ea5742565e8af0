//! Root-level status endpoints used by load balancers and uptime checks.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

const BANNER: &str = "Cartoonizer API running";

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'static str>,
}

async fn banner() -> Json<StatusBody> {
    Json(StatusBody {
        status: BANNER,
        version: None,
    })
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody {
        status: "ok",
        version: Some(env!("CARGO_PKG_VERSION")),
    })
}

/// `GET /` and `GET /health`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}
