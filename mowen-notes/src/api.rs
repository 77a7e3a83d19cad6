//! Mowen OpenAPI client.
//!
//! Exactly two operations reach the platform: uploading an image by source
//! URL and creating a note from a composed atom document. Both POST JSON
//! with bearer authentication. No explicit timeout is configured; transport
//! defaults apply, and every transport fault surfaces as a [`MowenError`].

use crate::atoms::NoteAtom;
use crate::error::MowenError;
use crate::upload::ImageUploader;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

/// Public entry point of the Mowen OpenAPI.
pub const DEFAULT_BASE_URL: &str = "https://open.mowen.cn/api/open/api/v1";

/// `fileType` discriminator for image uploads.
const FILE_TYPE_IMAGE: u8 = 1;

const UPLOAD_ENDPOINT: &str = "/upload/url";
const NOTE_CREATE_ENDPOINT: &str = "/note/create";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadUrlRequest<'a> {
    file_type: u8,
    url: &'a str,
}

#[derive(Deserialize)]
struct UploadUrlResponse {
    file: Option<UploadedFile>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    file_id: Option<String>,
}

#[derive(Serialize)]
struct NoteCreateRequest<'a> {
    body: &'a NoteAtom,
    settings: &'a NoteSettings,
}

/// Publication settings sent alongside a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSettings {
    pub auto_publish: bool,
}

impl Default for NoteSettings {
    fn default() -> Self {
        Self { auto_publish: true }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Client for the Mowen OpenAPI.
///
/// Holds one `reqwest::Client` and the API key; cheap to clone. Also
/// implements [`ImageUploader`], so the converter can consume it directly.
#[derive(Clone)]
pub struct MowenClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MowenClient {
    /// Creates a client against the public endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint (self-hosted gateways,
    /// test servers).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Uploads an image by URL and returns the opaque platform file id.
    ///
    /// One attempt, no retry. A relative or non-http(s) source fails
    /// immediately without issuing a request.
    ///
    /// # Errors
    ///
    /// Returns [`MowenError`] if the source URL is unsupported, the request
    /// fails, the endpoint answers with a non-success status, or the
    /// response lacks a usable `file.fileId`.
    pub async fn upload_image_from_url(&self, image_url: &str) -> Result<String, MowenError> {
        if !is_http_url(image_url) {
            return Err(MowenError::UnsupportedUrl {
                url: image_url.to_string(),
            });
        }

        info!("[Mowen] Uploading image: {}", image_url);
        let response = self
            .http
            .post(format!("{}{}", self.base_url, UPLOAD_ENDPOINT))
            .bearer_auth(&self.api_key)
            .json(&UploadUrlRequest {
                file_type: FILE_TYPE_IMAGE,
                url: image_url,
            })
            .send()
            .await
            .map_err(|source| MowenError::Transport {
                endpoint: UPLOAD_ENDPOINT,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| MowenError::Transport {
                endpoint: UPLOAD_ENDPOINT,
                source,
            })?;

        if !status.is_success() {
            error!("[Mowen] Image upload failed: {} {}", status, body);
            return Err(MowenError::Api {
                endpoint: UPLOAD_ENDPOINT,
                status: status.as_u16(),
                body,
            });
        }

        let upload: UploadUrlResponse =
            serde_json::from_str(&body).map_err(|source| MowenError::InvalidBody {
                endpoint: UPLOAD_ENDPOINT,
                source,
            })?;

        upload
            .file
            .and_then(|file| file.file_id)
            .filter(|id| !id.is_empty())
            .ok_or(MowenError::MissingField {
                endpoint: UPLOAD_ENDPOINT,
                field: "file.fileId",
            })
    }

    /// Creates (and, by default settings, publishes) a note.
    ///
    /// Returns the platform's response passed through as parsed JSON; its
    /// schema is not modeled beyond being JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MowenError`] if the request fails, the endpoint answers
    /// with a non-success status, or the response body is not JSON.
    pub async fn create_note(
        &self,
        body: &NoteAtom,
        settings: &NoteSettings,
    ) -> Result<Value, MowenError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, NOTE_CREATE_ENDPOINT))
            .bearer_auth(&self.api_key)
            .json(&NoteCreateRequest { body, settings })
            .send()
            .await
            .map_err(|source| MowenError::Transport {
                endpoint: NOTE_CREATE_ENDPOINT,
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| MowenError::Transport {
                endpoint: NOTE_CREATE_ENDPOINT,
                source,
            })?;

        if !status.is_success() {
            error!("[Mowen] Note creation failed: {} {}", status, text);
            return Err(MowenError::Api {
                endpoint: NOTE_CREATE_ENDPOINT,
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| MowenError::InvalidBody {
            endpoint: NOTE_CREATE_ENDPOINT,
            source,
        })
    }
}

#[async_trait]
impl ImageUploader for MowenClient {
    async fn upload_image(&self, source_url: &str) -> Result<String, MowenError> {
        self.upload_image_from_url(source_url).await
    }
}

/// Only absolute http(s) URLs can be uploaded by reference.
fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
