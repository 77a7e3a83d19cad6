//! Image resolution seam between the converter and the platform client.

use crate::error::MowenError;
use async_trait::async_trait;

/// Uploads images by source URL while a document is being converted.
///
/// [`crate::api::MowenClient`] is the production implementation; tests
/// substitute deterministic stubs. Implementations make exactly one attempt
/// per call, with no retry and no deduplication of repeated URLs. The
/// converter treats every error as a signal to emit its link fallback, not
/// as something to propagate.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Uploads the image behind `source_url` and returns the opaque file id
    /// the platform uses to reference it.
    async fn upload_image(&self, source_url: &str) -> Result<String, MowenError>;
}
