//! Error types for Mowen API operations

use thiserror::Error;

/// Errors that can occur while talking to the Mowen OpenAPI.
///
/// Conversion itself never fails; every variant here originates from the
/// upload or note-creation endpoints. Upload errors are swallowed by the
/// converter's fallback policy and only surface in logs.
#[derive(Debug, Error)]
pub enum MowenError {
    /// The request never produced an HTTP response (DNS, TLS, connect, ...).
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    /// A success response did not carry the field we need.
    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },
    /// A success response body was not valid JSON.
    #[error("{endpoint} returned a non-JSON body")]
    InvalidBody {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The image source is not an absolute http(s) URL and cannot be
    /// uploaded by reference.
    #[error("unsupported image source url: {url}")]
    UnsupportedUrl { url: String },
}
