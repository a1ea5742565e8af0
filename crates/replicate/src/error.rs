/// Errors from submitting and awaiting a Replicate prediction.
#[derive(Debug, thiserror::Error)]
pub enum ReplicateError {
    /// The model input is unusable. Raised before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The creation call did not yield a usable prediction id.
    #[error("Prediction submission failed: {0}")]
    SubmissionFailed(String),

    /// The prediction reached the `failed` state.
    #[error("Prediction {id} failed: {}", message.as_deref().unwrap_or("no diagnostic provided"))]
    GenerationFailed {
        id: String,
        message: Option<String>,
    },

    /// The prediction succeeded but reported no output URL.
    #[error("Prediction {id} succeeded without producing an output")]
    EmptyResult { id: String },

    /// The poll budget ran out before a terminal state was observed.
    #[error("Prediction {id} still pending after {attempts} polls")]
    Timeout { id: String, attempts: u32 },

    /// A status request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Replicate returned a non-2xx status code.
    #[error("Replicate API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}
