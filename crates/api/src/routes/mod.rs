pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the service route tree.
///
/// ```text
/// /cartoonize    POST   image in, public URL of the cartoonized image out
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/cartoonize", post(handlers::cartoonize::cartoonize))
}
