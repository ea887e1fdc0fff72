//! Decoded response payloads.

use crate::config::ResponseType;
use crate::error::FetchError;
use bytes::Bytes;

/// A response body after the configured decoding primitive has been applied.
///
/// [`ResponseType::Bytes`] and [`ResponseType::Blob`] both land in
/// [`FetchBody::Bytes`]; a blob has no richer in-memory form here.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    /// Raw bytes, untouched.
    Bytes(Bytes),
    /// UTF-8 text.
    Text(String),
    /// A JSON document.
    Json(serde_json::Value),
    /// URL-encoded form fields, in document order.
    Form(Vec<(String, String)>),
}

impl FetchBody {
    /// Decode a raw body with the primitive selected by `response_type`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decode`] when the body does not match the
    /// declared type (invalid UTF-8, malformed JSON, malformed form data).
    pub fn decode(raw: Bytes, response_type: ResponseType) -> Result<Self, FetchError> {
        match response_type {
            ResponseType::Bytes | ResponseType::Blob => Ok(Self::Bytes(raw)),
            ResponseType::Text => match String::from_utf8(raw.to_vec()) {
                Ok(text) => Ok(Self::Text(text)),
                Err(e) => Err(FetchError::Decode(e.to_string())),
            },
            ResponseType::Json => serde_json::from_slice(&raw)
                .map(Self::Json)
                .map_err(|e| FetchError::Decode(e.to_string())),
            ResponseType::FormData => serde_urlencoded::from_bytes(&raw)
                .map(Self::Form)
                .map_err(|e| FetchError::Decode(e.to_string())),
        }
    }

    /// The JSON document, if this body is [`FetchBody::Json`].
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The text, if this body is [`FetchBody::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this body is [`FetchBody::Bytes`].
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The form fields, if this body is [`FetchBody::Form`].
    #[must_use]
    pub fn as_form(&self) -> Option<&[(String, String)]> {
        match self {
            Self::Form(fields) => Some(fields),
            _ => None,
        }
    }
}
