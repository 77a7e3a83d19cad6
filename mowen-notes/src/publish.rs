//! High-level publishing pipeline.
//!
//! Converts a markdown source to an atom document and submits it as a note
//! in one call. The client doubles as the image uploader, so images resolve
//! in document order through the same credentials the note is created with.

use crate::api::{MowenClient, NoteSettings};
use crate::atoms::NoteAtom;
use crate::convert::markdown_to_atoms;
use crate::error::MowenError;
use serde_json::Value;
use tracing::info;

/// Specifies what to publish.
///
/// ```ignore
/// let spec = PublishSpec::new(markdown).with_auto_publish(false);
/// let result = publish(&client, spec).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PublishSpec<'a> {
    /// Markdown source to convert.
    pub markdown: &'a str,
    /// Platform-side publication settings.
    pub settings: NoteSettings,
}

impl<'a> PublishSpec<'a> {
    /// Creates a spec with default settings (auto-publish on).
    pub fn new(markdown: &'a str) -> Self {
        Self {
            markdown,
            settings: NoteSettings::default(),
        }
    }

    /// Overrides whether the platform publishes the note immediately.
    #[must_use]
    pub fn with_auto_publish(mut self, auto_publish: bool) -> Self {
        self.settings.auto_publish = auto_publish;
        self
    }

    /// Replaces the settings wholesale.
    #[must_use]
    pub fn with_settings(mut self, settings: NoteSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Outcome of a publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    /// The document that was submitted.
    pub document: NoteAtom,
    /// The platform's response, passed through as parsed JSON.
    pub response: Value,
}

/// Converts the markdown and submits it as a note.
///
/// Image upload failures do not fail the publish; the affected images
/// degrade to link-text paragraphs inside the document.
///
/// # Errors
///
/// Returns [`MowenError`] if note creation fails.
pub async fn publish(
    client: &MowenClient,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, MowenError> {
    let atoms = markdown_to_atoms(spec.markdown, client).await;
    info!("[Mowen] Sending {} atoms to Mowen API...", atoms.len());

    let document = NoteAtom::doc(atoms);
    let response = client.create_note(&document, &spec.settings).await?;
    info!("[Mowen] Note published successfully");

    Ok(PublishResult { document, response })
}
