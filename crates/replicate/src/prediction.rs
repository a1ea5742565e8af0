//! Replicate prediction wire types.
//!
//! The API reports job progress as a loosely-typed JSON object with a
//! free-form `status` string. [`Prediction`] mirrors that shape and
//! [`Prediction::state`] folds it into the tagged [`PredictionState`] the
//! rest of the crate works with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status label for a successfully completed prediction.
pub const STATUS_SUCCEEDED: &str = "succeeded";

/// Status label for a failed prediction.
pub const STATUS_FAILED: &str = "failed";

/// Status label Replicate uses for predictions canceled on its side.
pub const STATUS_CANCELED: &str = "canceled";

/// Model input sent as the `input` object of a prediction.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PredictionInput {
    /// Image reference: a data URI or a public URL.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Body of `POST /predictions`.
#[derive(Debug, Serialize)]
pub struct CreatePrediction<'a> {
    pub version: &'a str,
    pub input: &'a PredictionInput,
}

/// Snapshot of a prediction as returned by create and get calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    /// A list of URLs for most models, a single URL for some.
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Typed view of a prediction's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionState {
    /// Any non-terminal label (`starting`, `processing`, ...).
    Pending { status: String },
    /// Completed; `output` holds the result URLs in service order.
    Succeeded { output: Vec<String> },
    /// Failed or canceled, with the service diagnostic when present.
    Failed { error: Option<String> },
}

impl PredictionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionState::Pending { .. })
    }
}

impl Prediction {
    /// Classify this snapshot.
    pub fn state(&self) -> PredictionState {
        let status = self.status.trim();
        if status.eq_ignore_ascii_case(STATUS_SUCCEEDED) {
            PredictionState::Succeeded {
                output: output_urls(self.output.as_ref()),
            }
        } else if status.eq_ignore_ascii_case(STATUS_FAILED) {
            PredictionState::Failed {
                error: error_message(self.error.as_ref()),
            }
        } else if status.eq_ignore_ascii_case(STATUS_CANCELED) {
            PredictionState::Failed {
                error: error_message(self.error.as_ref())
                    .or_else(|| Some("Prediction was canceled".to_string())),
            }
        } else {
            PredictionState::Pending {
                status: status.to_string(),
            }
        }
    }
}

fn output_urls(output: Option<&Value>) -> Vec<String> {
    match output {
        Some(Value::String(url)) => vec![url.clone()],
        // Positions are kept; a non-string entry becomes an empty slot.
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

fn error_message(error: Option<&Value>) -> Option<String> {
    match error {
        None | Some(Value::Null) => None,
        Some(Value::String(msg)) if msg.trim().is_empty() => None,
        Some(Value::String(msg)) => Some(msg.clone()),
        Some(other) => Some(other.to_string()),
    }
}
