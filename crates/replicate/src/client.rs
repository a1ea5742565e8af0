//! Prediction submission and completion tracking.
//!
//! [`ReplicateClient::submit`] creates a prediction and returns a
//! [`PredictionHandle`]. [`ReplicateClient::await_completion`] polls that
//! handle under a [`PollPolicy`] until the prediction succeeds, fails, or
//! the poll budget runs out. The client holds no per-job state, so one
//! instance can drive any number of predictions concurrently.

use crate::api::ReplicateApi;
use crate::error::ReplicateError;
use crate::poll::PollPolicy;
use crate::prediction::{Prediction, PredictionInput, PredictionState};

/// Connection settings for the Replicate API.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// Base URL, e.g. `https://api.replicate.com/v1`.
    pub api_base: String,
    /// Bearer token.
    pub api_token: String,
    /// Model version hash every prediction is created against.
    pub model_version: String,
}

/// A submitted prediction: its id plus the snapshot returned on creation.
#[derive(Debug, Clone)]
pub struct PredictionHandle {
    pub id: String,
    pub snapshot: Prediction,
}

/// Submits predictions and waits for their results.
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    api: ReplicateApi,
    model_version: String,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a client on top of an existing [`reqwest::Client`] so the
    /// connection pool can be shared with other outbound callers.
    pub fn with_client(client: reqwest::Client, config: ReplicateConfig) -> Self {
        Self {
            api: ReplicateApi::with_client(client, config.api_base, config.api_token),
            model_version: config.model_version,
        }
    }

    /// Create a prediction.
    ///
    /// An empty `image` is rejected with [`ReplicateError::InvalidInput`]
    /// before anything is sent. Any failure of the creation call, or a
    /// response without an id, is reported as
    /// [`ReplicateError::SubmissionFailed`]. Submission is never retried.
    pub async fn submit(&self, input: &PredictionInput) -> Result<PredictionHandle, ReplicateError> {
        if input.image.trim().is_empty() {
            return Err(ReplicateError::InvalidInput("No image data".into()));
        }

        let snapshot = self
            .api
            .create_prediction(&self.model_version, input)
            .await
            .map_err(|e| ReplicateError::SubmissionFailed(e.to_string()))?;

        let id = snapshot.id.trim().to_string();
        if id.is_empty() {
            return Err(ReplicateError::SubmissionFailed(
                "response did not contain a prediction id".into(),
            ));
        }

        tracing::info!(
            prediction_id = %id,
            status = %snapshot.status,
            "Prediction submitted",
        );

        Ok(PredictionHandle { id, snapshot })
    }

    /// Poll a prediction until it reaches a terminal state.
    ///
    /// Returns the first output URL on success. Each status read is
    /// preceded by `policy.interval`; with a bounded policy the call fails
    /// with [`ReplicateError::Timeout`] after exactly `max_attempts` reads
    /// that all came back non-terminal. A failed status read aborts the
    /// wait.
    pub async fn await_completion(
        &self,
        handle: PredictionHandle,
        policy: &PollPolicy,
    ) -> Result<String, ReplicateError> {
        let PredictionHandle { id, snapshot } = handle;
        let mut state = snapshot.state();
        let mut attempts = 0u32;

        loop {
            match state {
                PredictionState::Succeeded { output } => {
                    return first_output(id, output, attempts);
                }
                PredictionState::Failed { error } => {
                    tracing::warn!(
                        prediction_id = %id,
                        attempts,
                        error = error.as_deref().unwrap_or(""),
                        "Prediction failed",
                    );
                    return Err(ReplicateError::GenerationFailed { id, message: error });
                }
                PredictionState::Pending { status } => {
                    if !policy.allows(attempts) {
                        tracing::warn!(
                            prediction_id = %id,
                            attempts,
                            last_status = %status,
                            "Prediction poll budget exhausted",
                        );
                        return Err(ReplicateError::Timeout { id, attempts });
                    }
                }
            }

            tokio::time::sleep(policy.interval).await;
            attempts += 1;

            let snapshot = self.api.get_prediction(&id).await?;
            tracing::debug!(
                prediction_id = %id,
                attempt = attempts,
                status = %snapshot.status,
                "Polled prediction",
            );
            state = snapshot.state();
        }
    }

    /// Submit and wait in one call.
    pub async fn run(
        &self,
        input: &PredictionInput,
        policy: &PollPolicy,
    ) -> Result<String, ReplicateError> {
        let handle = self.submit(input).await?;
        self.await_completion(handle, policy).await
    }
}

fn first_output(id: String, output: Vec<String>, attempts: u32) -> Result<String, ReplicateError> {
    match output.into_iter().next() {
        Some(url) if !url.trim().is_empty() => {
            tracing::info!(prediction_id = %id, attempts, "Prediction succeeded");
            Ok(url)
        }
        _ => Err(ReplicateError::EmptyResult { id }),
    }
}
