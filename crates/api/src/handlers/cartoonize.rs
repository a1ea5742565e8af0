//! Handler for the `/cartoonize` endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use cartoonizer_pipeline::CartoonizeRequest;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /cartoonize
///
/// Runs the whole flow synchronously and returns 200 with the public URL
/// of the stored result. Body rejections are folded into the standard
/// error envelope instead of axum's plain-text default. A run that outlives
/// the request deadline is dropped and reported as `TIMEOUT`.
pub async fn cartoonize(
    State(state): State<AppState>,
    body: Result<Json<CartoonizeRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse>> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let url = tokio::time::timeout(state.request_timeout, state.pipeline.run(&request))
        .await
        .map_err(|_| AppError::DeadlineExceeded(state.request_timeout))??;

    Ok(Json(ApiResponse::success(url)))
}
