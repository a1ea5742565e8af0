//! Inbound image payload normalization.
//!
//! Clients send a bare base64 string, a full `data:<mime>;base64,<data>`
//! URI, or an `http(s)://` URL of an image hosted elsewhere. Inline images
//! are decoded into an [`InlineImage`] that can be rendered back as a data
//! URI (what the generation model receives) or as raw bytes (what the
//! object store receives). URLs are passed through untouched.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;

/// Content type assumed for bare base64 payloads.
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// A validated inbound image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Image bytes carried in the request body.
    Inline(InlineImage),
    /// Image referenced by an `http://` or `https://` URL.
    Url(String),
}

impl ImagePayload {
    /// Parse a raw payload string.
    ///
    /// Fails with [`CoreError::InvalidInput`] if the payload is empty, the
    /// URL has no host part, the data URI is malformed, or the body is not
    /// valid base64.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::InvalidInput("No image data".into()));
        }

        match strip_http_scheme(raw) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Err(
                CoreError::InvalidInput(format!("Image URL '{raw}' has no host")),
            ),
            Some(_) if raw.chars().any(char::is_whitespace) => Err(CoreError::InvalidInput(
                "Image URL must not contain whitespace".into(),
            )),
            Some(_) => Ok(Self::Url(raw.to_string())),
            None => InlineImage::parse(raw).map(Self::Inline),
        }
    }
}

fn strip_http_scheme(raw: &str) -> Option<&str> {
    ["https://", "http://"].iter().find_map(|scheme| {
        raw.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| &raw[scheme.len()..])
    })
}

/// A decoded, base64-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    content_type: String,
    base64: String,
    bytes: Vec<u8>,
}

impl InlineImage {
    /// Parse a trimmed, non-URL payload: a data URI or bare base64.
    fn parse(raw: &str) -> Result<Self, CoreError> {
        let (content_type, body) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, body) = rest.split_once(',').ok_or_else(|| {
                    CoreError::InvalidInput("Data URI is missing its ',' separator".into())
                })?;
                let content_type = header.strip_suffix(";base64").ok_or_else(|| {
                    CoreError::InvalidInput("Only base64 data URIs are supported".into())
                })?;
                if !content_type.starts_with("image/") {
                    return Err(CoreError::InvalidInput(format!(
                        "Unsupported content type '{content_type}'"
                    )));
                }
                (content_type.to_string(), body.trim())
            }
            None => (DEFAULT_CONTENT_TYPE.to_string(), raw),
        };

        if body.is_empty() {
            return Err(CoreError::InvalidInput("No image data".into()));
        }

        let bytes = STANDARD
            .decode(body)
            .map_err(|e| CoreError::InvalidInput(format!("Image data is not valid base64: {e}")))?;

        Ok(Self {
            content_type,
            base64: body.to_string(),
            bytes,
        })
    }

    /// MIME type of the image, e.g. `image/png`.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// File extension matching the content type (`png` when unknown).
    pub fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Render as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.base64)
    }

    /// Decoded image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
