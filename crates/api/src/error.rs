use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cartoonizer_core::error::CoreError;
use cartoonizer_pipeline::PipelineError;
use cartoonizer_replicate::ReplicateError;

use crate::response::ApiResponse;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`PipelineError`] for failures of the cartoonize flow and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce the
/// uniform `{ success: false, error, code }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The cartoonize run did not finish within the request deadline.
    #[error("Request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),

            AppError::DeadlineExceeded(deadline) => {
                tracing::warn!(deadline_secs = deadline.as_secs(), "Cartoonize deadline exceeded");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "Image processing timed out".to_string(),
                )
            }

            AppError::Pipeline(PipelineError::Core(CoreError::InvalidInput(msg)))
            | AppError::Pipeline(PipelineError::Replicate(ReplicateError::InvalidInput(msg))) => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
            }

            AppError::Pipeline(PipelineError::Replicate(err)) => {
                tracing::error!(error = %err, "Generation error");
                classify_replicate_error(err)
            }

            AppError::Pipeline(PipelineError::Storage(err)) => {
                tracing::error!(error = %err, "Storage error");
                if err.is_upload() {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_UPLOAD_FAILED",
                        "Failed to store processed image".to_string(),
                    )
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "ARTIFACT_DOWNLOAD_FAILED",
                        "Failed to fetch processed image".to_string(),
                    )
                }
            }
        };

        (status, axum::Json(ApiResponse::failure(code, message))).into_response()
    }
}

/// Map a generation error to an HTTP status, error code, and client-safe message.
///
/// - `Timeout` maps to 504 so callers can tell it apart and resubmit.
/// - Everything else maps to 500; service diagnostics stay in the log.
fn classify_replicate_error(err: &ReplicateError) -> (StatusCode, &'static str, String) {
    let processing_failed = "Image processing failed".to_string();
    match err {
        ReplicateError::Timeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "TIMEOUT",
            "Image processing timed out".to_string(),
        ),
        ReplicateError::SubmissionFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "SUBMISSION_FAILED",
            processing_failed,
        ),
        ReplicateError::EmptyResult { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "EMPTY_RESULT",
            processing_failed,
        ),
        ReplicateError::GenerationFailed { .. }
        | ReplicateError::Request(_)
        | ReplicateError::ApiError { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "GENERATION_FAILED",
            processing_failed,
        ),
        ReplicateError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
    }
}
