//! Conversion tests over a complete markdown document.
//!
//! The fixture exercises every supported block type plus the degradation
//! paths (suppressed rules, failed uploads) in one pass.

use crate::support::{FailingUploader, RecordingUploader};
use mowen_notes::{markdown_to_atoms, NoteAtom};
use std::path::PathBuf;

fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn kind(atom: &NoteAtom) -> &'static str {
    match atom {
        NoteAtom::Doc { .. } => "doc",
        NoteAtom::Paragraph { .. } => "paragraph",
        NoteAtom::Heading { .. } => "heading",
        NoteAtom::Quote { .. } => "quote",
        NoteAtom::Image { .. } => "image",
        NoteAtom::Text { .. } => "text",
        NoteAtom::ListItem { .. } => "list_item",
        NoteAtom::OrderedList { .. } => "ordered_list",
        NoteAtom::BulletList { .. } => "bullet_list",
    }
}

fn items_of(atom: &NoteAtom) -> &[NoteAtom] {
    match atom {
        NoteAtom::OrderedList { content } | NoteAtom::BulletList { content } => content,
        other => panic!("Expected a list atom, got {other:?}"),
    }
}

#[tokio::test]
async fn article_converts_block_by_block() {
    let markdown = load_fixture("article.md");
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(&markdown, &uploader).await;

    let kinds: Vec<&str> = atoms.iter().map(kind).collect();
    assert_eq!(
        kinds,
        [
            "heading",
            "paragraph",
            "image",
            "quote",
            "heading",
            "ordered_list",
            "bullet_list",
            "paragraph"
        ],
        "horizontal rule is dropped, everything else keeps its slot"
    );

    // The standalone image was promoted out of its paragraph and carries
    // the uploaded handle.
    match &atoms[2] {
        NoteAtom::Image { attrs } => {
            assert_eq!(attrs.uuid, "file-0001");
            assert_eq!(attrs.alt, "Harbor at dawn");
            assert_eq!(attrs.align, "center");
        }
        other => panic!("Expected an image atom, got {other:?}"),
    }
}

#[tokio::test]
async fn images_upload_in_document_order() {
    let markdown = load_fixture("article.md");
    let uploader = RecordingUploader::new();
    markdown_to_atoms(&markdown, &uploader).await;

    let calls = uploader.calls.lock().unwrap();
    assert_eq!(
        *calls,
        [
            "https://img.example.com/harbor.png",
            "https://img.example.com/icon.png"
        ]
    );
}

#[tokio::test]
async fn headings_carry_string_levels() {
    let markdown = load_fixture("article.md");
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(&markdown, &uploader).await;

    let levels: Vec<&str> = atoms
        .iter()
        .filter_map(|atom| match atom {
            NoteAtom::Heading { attrs, .. } => Some(attrs.level.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(levels, ["1", "2"]);
}

#[tokio::test]
async fn list_items_hold_exactly_one_paragraph() {
    let markdown = load_fixture("article.md");
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(&markdown, &uploader).await;

    for item in items_of(&atoms[5]).iter().chain(items_of(&atoms[6])) {
        match item {
            NoteAtom::ListItem { content } => {
                assert_eq!(content.len(), 1, "item content is a single wrapper");
                assert!(matches!(content[0], NoteAtom::Paragraph { .. }));
            }
            other => panic!("Expected a list_item atom, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn failed_uploads_degrade_to_link_text() {
    let markdown = load_fixture("article.md");
    let atoms = markdown_to_atoms(&markdown, &FailingUploader).await;

    assert_eq!(atoms.len(), 8, "degraded images keep their block slots");

    let rendered = serde_json::to_string(&NoteAtom::doc(atoms)).unwrap();
    assert!(rendered.contains("[Harbor at dawn](https://img.example.com/harbor.png)"));
    assert!(rendered.contains("[inline icon](https://img.example.com/icon.png)"));
    assert!(!rendered.contains("\"type\":\"image\""));
}
