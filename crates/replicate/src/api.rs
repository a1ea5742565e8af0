//! REST API client for the Replicate prediction endpoints.
//!
//! Thin wrapper over `POST /predictions` and `GET /predictions/{id}` using
//! [`reqwest`]. Every request carries the bearer token supplied at
//! construction. No retries happen at this layer.

use crate::error::ReplicateError;
use crate::prediction::{CreatePrediction, Prediction, PredictionInput};

/// Public Replicate API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

/// HTTP client for the Replicate API.
#[derive(Clone)]
pub struct ReplicateApi {
    client: reqwest::Client,
    api_base: String,
    api_token: String,
}

impl std::fmt::Debug for ReplicateApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicateApi")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl ReplicateApi {
    /// Create an API client on top of an existing [`reqwest::Client`].
    ///
    /// * `api_base`  - Base URL, e.g. `https://api.replicate.com/v1`.
    /// * `api_token` - Bearer token used on every request.
    pub fn with_client(client: reqwest::Client, api_base: String, api_token: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Create a prediction for the given model version.
    pub async fn create_prediction(
        &self,
        version: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateError> {
        let response = self
            .client
            .post(format!("{}/predictions", self.api_base))
            .bearer_auth(&self.api_token)
            .json(&CreatePrediction { version, input })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the latest snapshot of a prediction.
    pub async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateError> {
        let response = self
            .client
            .get(format!("{}/predictions/{}", self.api_base, id))
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ReplicateError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ReplicateError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
