//! Markdown publishing for Mowen notes
//!
//!     This crate compiles markdown into the typed block tree ("note atoms")
//!     the Mowen OpenAPI accepts, uploads referenced images along the way,
//!     and submits the result as a note.
//!
//!     TLDR for integrators:
//!         - Build a [`MowenClient`] with an API key, hand markdown to
//!           [`publish::publish`], done.
//!         - For conversion without network effects, call
//!           [`convert::markdown_to_atoms`] with your own [`ImageUploader`].
//!         - Conversion never fails; unsupported markdown degrades or is
//!           dropped with a warning. Only note creation returns errors.
//!
//! Architecture
//!
//!     The converter (./convert.rs) is the core: a recursive walk over the
//!     markdown AST that emits note atoms (./atoms.rs). It is pure over its
//!     two inputs, the source text and an uploader implementation, which
//!     keeps the tree-shaping logic testable without any network. The HTTP
//!     client (./api.rs) supplies the real uploader and the note creation
//!     call; the publish pipeline (./publish.rs) ties the two together.
//!
//!     This is a pure lib: it powers applications but is shell agnostic, so
//!     no code here reads env vars or prints to std streams. Configuration
//!     lives in the companion mowen-config crate.
//!
//!     The file structure:
//!     .
//!     ├── atoms.rs        # Note atom model, serializes to the wire shape
//!     ├── convert.rs      # Markdown AST -> atom tree
//!     ├── upload.rs       # ImageUploader seam
//!     ├── api.rs          # Mowen OpenAPI client (upload + note create)
//!     ├── publish.rs      # High-level pipeline
//!     ├── error.rs
//!     └── lib.rs
//!
//! Testing
//!
//!     tests
//!     ├── convert
//!     │   └── article.rs  # Fixture-driven conversion of a whole document
//!     ├── wire
//!     │   └── shape.rs    # Serialized JSON equality against the wire shape
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories,
//!     so tests/lib.rs includes them as modules. Unit tests sit next to the
//!     code they cover; anything needing the network stays out entirely and
//!     is exercised through uploader stubs instead.
//!
//! Library Choices
//!
//!     We never parse markdown ourselves: comrak owns tokenization and AST
//!     construction, and this crate only adapts its node types to the atom
//!     model. Everything that touches the wire is serde derive, so the atom
//!     model and its JSON shape cannot drift apart. HTTP goes through
//!     reqwest. The uploader seam is an async trait so the converter can
//!     await uploads mid-walk while tests substitute canned results.

pub mod api;
pub mod atoms;
pub mod convert;
pub mod error;
pub mod publish;
pub mod upload;

pub use api::{MowenClient, NoteSettings, DEFAULT_BASE_URL};
pub use atoms::{HeadingAttrs, ImageAttrs, LinkAttrs, Mark, NoteAtom};
pub use convert::markdown_to_atoms;
pub use error::MowenError;
pub use publish::{publish, PublishResult, PublishSpec};
pub use upload::ImageUploader;
