//! Markdown → note atom conversion
//!
//! Walks the comrak AST depth-first and compiles every recognized node into
//! the atom tree the note-creation endpoint accepts. The traversal is
//! recursive and awaits one image upload at a time, so images resolve in
//! document order.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing. This choice is based on:
//! - CommonMark compliance with GFM-style extensions
//! - Arena AST that is cheap to walk recursively
//! - Robust and well-maintained
//!
//! # Element Mapping Table
//!
//! | Markdown node      | Note atom                  | Notes                                      |
//! |--------------------|----------------------------|--------------------------------------------|
//! | Paragraph          | `paragraph`                | sole image (or fallback) child is promoted |
//! | Heading            | `heading`                  | level string-encoded in `attrs`            |
//! | BlockQuote         | `quote`                    | empty content is valid                     |
//! | Image              | `image` or fallback        | uploaded first; `[alt](url)` text on error |
//! | Text               | `text`                     | adjacent unmarked runs merge               |
//! | SoftBreak          | `text` (single space)      | merges into neighbors                      |
//! | Strong             | `text` + `bold` mark       | content flattened to plain text            |
//! | Emph               | `text` + `italic` mark     | content flattened to plain text            |
//! | Link               | `text` + `link` mark       | visible text flattened; nested marks lost  |
//! | List / (Task)Item  | `ordered_list`/`bullet_list` of `list_item` | one synthetic paragraph per item; checkbox state dropped |
//! | ThematicBreak, LineBreak, HtmlBlock, HtmlInline | (none) | suppressed silently           |
//! | anything else      | (none)                     | suppressed with a warning                  |
//!
//! # Lossy Conversions
//!
//! - Tables, strikethrough, and code blocks have no atom equivalent and are
//!   suppressed (with a diagnostic).
//! - Rich content nested inside strong/emphasis/link flattens to plain text
//!   carrying the single outer mark.
//! - Raw HTML is dropped, though it still contributes to the flattened-text
//!   fallback of an otherwise empty block.

use crate::atoms::{Mark, NoteAtom};
use crate::upload::ImageUploader;
use async_recursion::async_recursion;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use tracing::warn;

/// Label used in fallback link text when an image has no alt text.
const FALLBACK_ALT: &str = "image";

/// Converts a markdown string into the ordered list of root-level atoms.
///
/// Never fails for syntactically valid markdown: unsupported node kinds are
/// logged and skipped, and image upload failures degrade to link-text
/// paragraphs. Callers wrap the result in [`NoteAtom::doc`] before
/// submitting it.
pub async fn markdown_to_atoms(markdown: &str, uploader: &dyn ImageUploader) -> Vec<NoteAtom> {
    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &conversion_options());

    let mut atoms = Vec::new();
    for child in root.children() {
        if let Some(atom) = convert_node(child, uploader).await {
            atoms.push(atom);
        }
    }
    atoms
}

fn conversion_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Converts one AST node, or `None` for suppressed kinds.
#[async_recursion(?Send)]
async fn convert_node<'a>(node: &'a AstNode<'a>, uploader: &dyn ImageUploader) -> Option<NoteAtom> {
    match &node.data.borrow().value {
        NodeValue::Paragraph => {
            let mut children = convert_children(node, uploader).await;
            // A paragraph around a single image (or around the paragraph the
            // image fallback produced) adds nothing; promote the child.
            if children.len() == 1
                && matches!(children[0], NoteAtom::Image { .. } | NoteAtom::Paragraph { .. })
            {
                return children.pop();
            }
            if children.is_empty() {
                children.push(NoteAtom::text(flatten_text(node)));
            }
            Some(NoteAtom::paragraph(children))
        }

        NodeValue::Heading(heading) => {
            let children = convert_children(node, uploader).await;
            let content = if children.is_empty() {
                vec![NoteAtom::text(flatten_text(node))]
            } else {
                children
            };
            Some(NoteAtom::heading(heading.level, content))
        }

        NodeValue::BlockQuote => Some(NoteAtom::quote(convert_children(node, uploader).await)),

        NodeValue::Image(link) => Some(convert_image(node, &link.url, uploader).await),

        NodeValue::Text(text) => Some(NoteAtom::text(text.clone())),

        NodeValue::SoftBreak => Some(NoteAtom::text(" ")),

        NodeValue::Strong => Some(NoteAtom::styled_text(flatten_text(node), Mark::Bold)),

        NodeValue::Emph => Some(NoteAtom::styled_text(flatten_text(node), Mark::Italic)),

        NodeValue::Link(link) => Some(NoteAtom::styled_text(
            flatten_text(node),
            Mark::link(link.url.clone()),
        )),

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let mut items = Vec::new();
            for child in node.children() {
                items.push(convert_list_item(child, list.tight, uploader).await);
            }
            Some(if ordered {
                NoteAtom::ordered_list(items)
            } else {
                NoteAtom::bullet_list(items)
            })
        }

        NodeValue::ThematicBreak
        | NodeValue::LineBreak
        | NodeValue::HtmlBlock(_)
        | NodeValue::HtmlInline(_) => None,

        other => {
            warn!(kind = %node_kind(other), "skipping unsupported markdown node");
            None
        }
    }
}

/// Uploads the image and builds its atom; on failure degrades to a
/// paragraph rendering the original `[alt](url)` link text.
async fn convert_image<'a>(
    node: &'a AstNode<'a>,
    source_url: &str,
    uploader: &dyn ImageUploader,
) -> NoteAtom {
    let alt = flatten_text(node);
    match uploader.upload_image(source_url).await {
        Ok(file_id) => NoteAtom::image(file_id, alt),
        Err(error) => {
            warn!(url = %source_url, %error, "image upload failed, falling back to link text");
            let label = if alt.is_empty() { FALLBACK_ALT } else { alt.as_str() };
            NoteAtom::paragraph(vec![NoteAtom::text(format!("[{label}]({source_url})"))])
        }
    }
}

/// Converts a node's children, dropping suppressed kinds and merging
/// adjacent unmarked text runs.
async fn convert_children<'a>(node: &'a AstNode<'a>, uploader: &dyn ImageUploader) -> Vec<NoteAtom> {
    let mut atoms = Vec::new();
    for child in node.children() {
        if let Some(atom) = convert_node(child, uploader).await {
            push_text_merged(&mut atoms, atom);
        }
    }
    atoms
}

/// Converts one list item into `list_item > paragraph > ...`.
///
/// Items of a tight list carry a synthetic paragraph wrapper; its inlines
/// are spliced directly into the item so the single paragraph added here
/// stays the only one. Items of a loose list carry real paragraphs, which
/// convert normally and stay nested.
async fn convert_list_item<'a>(
    item: &'a AstNode<'a>,
    tight: bool,
    uploader: &dyn ImageUploader,
) -> NoteAtom {
    let mut children = Vec::new();
    for child in item.children() {
        let splice = tight && matches!(&child.data.borrow().value, NodeValue::Paragraph);
        if splice {
            for inline in child.children() {
                if let Some(atom) = convert_node(inline, uploader).await {
                    push_text_merged(&mut children, atom);
                }
            }
        } else if let Some(atom) = convert_node(child, uploader).await {
            push_text_merged(&mut children, atom);
        }
    }
    NoteAtom::list_item(vec![NoteAtom::paragraph(children)])
}

/// Appends an atom, merging it into the previous one when both are
/// unmarked text runs. The tokenizer fragments plain prose around escapes,
/// entities, and soft breaks; the target schema expects one run per stretch.
fn push_text_merged(atoms: &mut Vec<NoteAtom>, atom: NoteAtom) {
    if let NoteAtom::Text { text, marks } = &atom {
        if marks.is_empty() {
            if let Some(NoteAtom::Text {
                text: previous,
                marks: previous_marks,
            }) = atoms.last_mut()
            {
                if previous_marks.is_empty() {
                    previous.push_str(text);
                    return;
                }
            }
        }
    }
    atoms.push(atom);
}

/// Flattens a node's inline content to plain text.
fn flatten_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

/// Collects text content from a node. Breaks flatten to a space; inline
/// code and raw inline HTML keep their literal source so the empty-block
/// fallback never drops content.
fn collect_text<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::HtmlInline(html) => output.push_str(html),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text(child, output);
            }
        }
    }
}

/// Variant name of a node value, for diagnostics.
fn node_kind(value: &NodeValue) -> String {
    let repr = format!("{value:?}");
    match repr.find(['(', '{', ' ']) {
        Some(end) => repr[..end].to_string(),
        None => repr,
    }
}
