//! Response envelope shared by every cartoonize outcome.
//!
//! Success: `{ "success": true, "url": ... }`.
//! Failure: `{ "success": false, "error": ..., "code": ... }`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl ApiResponse {
    pub fn success(url: String) -> Self {
        Self {
            success: true,
            url: Some(url),
            error: None,
            code: None,
        }
    }

    pub fn failure(code: &'static str, error: String) -> Self {
        Self {
            success: false,
            url: None,
            error: Some(error),
            code: Some(code),
        }
    }
}
