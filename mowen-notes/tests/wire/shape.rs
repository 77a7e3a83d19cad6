//! Wire-shape tests.
//!
//! Serialized documents must match the platform JSON in structure: field
//! names, `type` discriminators, and field omissions (empty marks).

use crate::support::RecordingUploader;
use mowen_notes::{markdown_to_atoms, NoteAtom};
use serde_json::json;

#[tokio::test]
async fn document_serializes_to_the_platform_shape() {
    let markdown = "## Notes\n\nSee the [guide](https://example.com/guide).\n\n![Map](https://img.example.com/map.png)\n";
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(markdown, &uploader).await;
    let value = serde_json::to_value(NoteAtom::doc(atoms)).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "doc",
            "content": [
                {
                    "type": "heading",
                    "attrs": { "level": "2" },
                    "content": [
                        { "type": "text", "text": "Notes" }
                    ]
                },
                {
                    "type": "paragraph",
                    "content": [
                        { "type": "text", "text": "See the " },
                        {
                            "type": "text",
                            "text": "guide",
                            "marks": [
                                {
                                    "type": "link",
                                    "attrs": {
                                        "href": "https://example.com/guide",
                                        "target": "_blank"
                                    }
                                }
                            ]
                        },
                        { "type": "text", "text": "." }
                    ]
                },
                {
                    "type": "image",
                    "attrs": {
                        "uuid": "file-0001",
                        "alt": "Map",
                        "align": "center"
                    }
                }
            ]
        })
    );
}

#[tokio::test]
async fn style_marks_use_bare_type_objects() {
    let markdown = "**bold** and *italic*\n";
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(markdown, &uploader).await;
    let value = serde_json::to_value(NoteAtom::doc(atoms)).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "doc",
            "content": [
                {
                    "type": "paragraph",
                    "content": [
                        { "type": "text", "text": "bold", "marks": [ { "type": "bold" } ] },
                        { "type": "text", "text": " and " },
                        { "type": "text", "text": "italic", "marks": [ { "type": "italic" } ] }
                    ]
                }
            ]
        })
    );
}

#[tokio::test]
async fn list_wrappers_nest_as_the_platform_expects() {
    let markdown = "1. only step\n";
    let uploader = RecordingUploader::new();
    let atoms = markdown_to_atoms(markdown, &uploader).await;
    let value = serde_json::to_value(NoteAtom::doc(atoms)).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "doc",
            "content": [
                {
                    "type": "ordered_list",
                    "content": [
                        {
                            "type": "list_item",
                            "content": [
                                {
                                    "type": "paragraph",
                                    "content": [
                                        { "type": "text", "text": "only step" }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            ]
        })
    );
}
