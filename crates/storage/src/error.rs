/// Errors from the object-store layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The upload request failed at the transport level.
    #[error("Storage upload of '{filename}' failed: {source}")]
    UploadRequest {
        filename: String,
        #[source]
        source: reqwest::Error,
    },

    /// Supabase rejected the upload.
    #[error("Storage upload of '{filename}' rejected ({status}): {body}")]
    UploadRejected {
        filename: String,
        status: u16,
        body: String,
    },

    /// The artifact could not be fetched from its source URL.
    #[error("Artifact download from {url} failed: {reason}")]
    Download { url: String, reason: String },
}

impl StorageError {
    /// Whether this error happened while writing to the bucket.
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            StorageError::UploadRequest { .. } | StorageError::UploadRejected { .. }
        )
    }
}
