use std::sync::Arc;
use std::time::Duration;

use cartoonizer_pipeline::CartoonizePipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup; cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Cartoonize flow with its Replicate and storage clients.
    pub pipeline: Arc<CartoonizePipeline>,
    /// Deadline for one cartoonize run, from `REQUEST_TIMEOUT_SECS`.
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire the outbound clients from configuration, sharing one HTTP
    /// connection pool between them.
    pub fn from_config(config: &ServerConfig, http: reqwest::Client) -> Self {
        let replicate = cartoonizer_replicate::ReplicateClient::with_client(
            http.clone(),
            config.replicate.clone(),
        );
        let storage = cartoonizer_storage::StorageClient::with_client(http, config.storage.clone());
        let options = cartoonizer_pipeline::PipelineOptions {
            poll_policy: config.poll_policy,
            upload_input: config.upload_input,
        };

        Self {
            pipeline: Arc::new(CartoonizePipeline::new(replicate, storage, options)),
            request_timeout: config.request_timeout(),
        }
    }
}
