//! Object-store file naming.
//!
//! Names follow `{prefix}-{unix_millis}.{ext}`. They are not content
//! addressed, so two uploads in the same millisecond with the same prefix
//! would collide.

/// Prefix for generated (cartoonized) artifacts.
pub const OUTPUT_PREFIX: &str = "cartoon";

/// Prefix for re-uploaded input images.
pub const INPUT_PREFIX: &str = "original";

/// Build an artifact file name from its parts.
pub fn artifact_filename(prefix: &str, extension: &str, timestamp_ms: i64) -> String {
    format!("{prefix}-{timestamp_ms}.{extension}")
}

/// Build an artifact file name stamped with the current UTC time.
pub fn timestamped_filename(prefix: &str, extension: &str) -> String {
    artifact_filename(prefix, extension, chrono::Utc::now().timestamp_millis())
}
