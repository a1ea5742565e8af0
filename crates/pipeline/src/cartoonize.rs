use cartoonizer_core::naming::{timestamped_filename, INPUT_PREFIX, OUTPUT_PREFIX};
use cartoonizer_core::payload::ImagePayload;
use cartoonizer_replicate::{PollPolicy, PredictionInput, ReplicateClient};
use cartoonizer_storage::StorageClient;
use serde::Deserialize;

use crate::error::PipelineError;

/// Content type of stored artifacts.
pub const OUTPUT_CONTENT_TYPE: &str = "image/png";

/// Body of `POST /cartoonize`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartoonizeRequest {
    /// Base64 string, `data:` URI or `http(s)://` image URL. Optional on the wire so that a missing
    /// field is reported as invalid input rather than a JSON rejection.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Per-deployment knobs for the flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub poll_policy: PollPolicy,
    /// Upload the input image first and hand the model its public URL
    /// instead of an inline data URI.
    pub upload_input: bool,
}

/// Runs cartoonize requests. Cheap to share; holds no per-request state.
#[derive(Debug, Clone)]
pub struct CartoonizePipeline {
    replicate: ReplicateClient,
    storage: StorageClient,
    options: PipelineOptions,
}

impl CartoonizePipeline {
    pub fn new(replicate: ReplicateClient, storage: StorageClient, options: PipelineOptions) -> Self {
        Self {
            replicate,
            storage,
            options,
        }
    }

    /// Run one request end to end and return the stored artifact's public URL.
    pub async fn run(&self, request: &CartoonizeRequest) -> Result<String, PipelineError> {
        let payload = ImagePayload::parse(request.image_data.as_deref().unwrap_or_default())?;

        let image = match payload {
            ImagePayload::Url(url) => {
                tracing::info!(image_url = %url, "Received image URL");
                url
            }
            ImagePayload::Inline(inline) => {
                tracing::info!(
                    content_type = inline.content_type(),
                    size = inline.bytes().len(),
                    "Received image",
                );
                if self.options.upload_input {
                    let filename = timestamped_filename(INPUT_PREFIX, inline.extension());
                    self.storage
                        .upload(&filename, inline.bytes().to_vec(), inline.content_type())
                        .await?
                } else {
                    inline.to_data_uri()
                }
            }
        };

        let input = PredictionInput {
            image,
            style: non_empty(request.style.as_deref()),
            prompt: non_empty(request.prompt.as_deref()),
        };
        let output_url = self
            .replicate
            .run(&input, &self.options.poll_policy)
            .await?;

        let artifact = self.storage.download(&output_url).await?;
        let filename = timestamped_filename(OUTPUT_PREFIX, "png");
        let public_url = self
            .storage
            .upload(&filename, artifact, OUTPUT_CONTENT_TYPE)
            .await?;

        tracing::info!(%public_url, "Cartoonize complete");
        Ok(public_url)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
