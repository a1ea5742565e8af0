//! HTTP client for the Supabase Storage object API.

use crate::error::StorageError;

/// Bucket used when none is configured.
pub const DEFAULT_BUCKET: &str = "cartoonizer";

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Service key, sent both as bearer token and `apikey` header.
    pub api_key: String,
    pub bucket: String,
}

/// Uploads objects to one bucket and downloads artifacts by URL.
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("base_url", &self.base_url)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a storage client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: StorageConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            bucket: config.bucket,
        }
    }

    /// Public URL of an object in the configured bucket.
    ///
    /// Deterministic: `{base}/storage/v1/object/public/{bucket}/{filename}`.
    pub fn public_url(&self, filename: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, filename
        )
    }

    /// Upload `bytes` as `filename` and return the object's public URL.
    ///
    /// Existing objects are never overwritten (`x-upsert: false`).
    pub async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        let response = self
            .client
            .post(format!(
                "{}/storage/v1/object/{}/{}",
                self.base_url, self.bucket, filename
            ))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|source| StorageError::UploadRequest {
                filename: filename.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::UploadRejected {
                filename: filename.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(bucket = %self.bucket, filename, size, "Uploaded object");
        Ok(self.public_url(filename))
    }

    /// Fetch an artifact from an arbitrary URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let download_error = |reason: String| StorageError::Download {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_error(format!("HTTP {}", status.as_u16())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        tracing::debug!(url, size = bytes.len(), "Downloaded artifact");
        Ok(bytes.to_vec())
    }
}
