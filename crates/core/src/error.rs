/// Domain errors raised before any external service is involved.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller supplied an unusable payload (empty, malformed base64, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
