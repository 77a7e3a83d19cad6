//! Core data structures for the Mowen note tree ("atoms").
//!
//! Atoms serialize directly into the JSON the note-creation endpoint
//! expects: every node carries a `type` discriminator, block nodes carry a
//! `content` array, and leaf nodes carry their payload inline. The enum is
//! internally tagged so no hand-written serialization is needed.

use serde::{Deserialize, Serialize};

/// Alignment applied to every uploaded image.
pub const IMAGE_ALIGN_CENTER: &str = "center";

/// Link marks always open in a new tab.
pub const LINK_TARGET_BLANK: &str = "_blank";

/// A typed node in the note document tree.
///
/// Wire names follow the platform schema: `doc`, `paragraph`, `heading`,
/// `quote`, `image`, `text`, `list_item`, `ordered_list`, `bullet_list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteAtom {
    /// Document root; the only atom the create-note endpoint accepts at the
    /// top level.
    Doc { content: Vec<NoteAtom> },
    Paragraph { content: Vec<NoteAtom> },
    Heading {
        attrs: HeadingAttrs,
        content: Vec<NoteAtom>,
    },
    Quote { content: Vec<NoteAtom> },
    /// A successfully uploaded image, referenced by its platform file id.
    Image { attrs: ImageAttrs },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    ListItem { content: Vec<NoteAtom> },
    OrderedList { content: Vec<NoteAtom> },
    BulletList { content: Vec<NoteAtom> },
}

/// Heading attributes. The platform schema requires `level` to be a
/// string-encoded integer, not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: String,
}

/// Image attributes carrying the opaque upload handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttrs {
    pub uuid: String,
    pub alt: String,
    pub align: String,
}

/// An inline style annotation attached to a text atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    Bold,
    Italic,
    Link { attrs: LinkAttrs },
}

/// Hyperlink attributes on a link mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    pub target: String,
}

impl NoteAtom {
    /// Wraps root-level atoms in the document root node.
    pub fn doc(content: Vec<NoteAtom>) -> Self {
        NoteAtom::Doc { content }
    }

    pub fn paragraph(content: Vec<NoteAtom>) -> Self {
        NoteAtom::Paragraph { content }
    }

    /// Builds a heading atom, string-encoding the level.
    pub fn heading(level: u8, content: Vec<NoteAtom>) -> Self {
        NoteAtom::Heading {
            attrs: HeadingAttrs {
                level: level.to_string(),
            },
            content,
        }
    }

    pub fn quote(content: Vec<NoteAtom>) -> Self {
        NoteAtom::Quote { content }
    }

    /// Builds an image atom with the default centered alignment.
    pub fn image(uuid: impl Into<String>, alt: impl Into<String>) -> Self {
        NoteAtom::Image {
            attrs: ImageAttrs {
                uuid: uuid.into(),
                alt: alt.into(),
                align: IMAGE_ALIGN_CENTER.to_string(),
            },
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        NoteAtom::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Builds a text atom carrying a single mark.
    pub fn styled_text(text: impl Into<String>, mark: Mark) -> Self {
        NoteAtom::Text {
            text: text.into(),
            marks: vec![mark],
        }
    }

    pub fn list_item(content: Vec<NoteAtom>) -> Self {
        NoteAtom::ListItem { content }
    }

    pub fn ordered_list(items: Vec<NoteAtom>) -> Self {
        NoteAtom::OrderedList { content: items }
    }

    pub fn bullet_list(items: Vec<NoteAtom>) -> Self {
        NoteAtom::BulletList { content: items }
    }
}

impl Mark {
    /// Builds a link mark; `target` is always `_blank`.
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: LinkAttrs {
                href: href.into(),
                target: LINK_TARGET_BLANK.to_string(),
            },
        }
    }
}
