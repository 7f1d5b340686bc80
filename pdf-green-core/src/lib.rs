//! # pdf-green
//!
//! Immutable, structurally shared syntax trees for PDF, with a small object
//! model for authoring content.
//!
//! ## Features
//!
//! - **Green trees**: parsed constructs (indirect objects, xref sections,
//!   trailers, literals) as immutable nodes that round-trip their text
//! - **Typed shapes**: validating factories and typed views for every PDF
//!   grammar shape
//! - **Hash-consing**: small identical subtrees share one instance through a
//!   bounded, thread-safe node cache
//! - **Diagnostics**: content problems are attached to nodes as data and
//!   aggregate upward through a flag
//! - **Object model**: arrays, dictionaries, streams and scalars with
//!   byte-exact serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use pdf_green::objects::{Dictionary, Object, ObjectId};
//! use pdf_green::writer::SyntaxWriter;
//! use pdf_green::Result;
//!
//! # fn main() -> Result<()> {
//! let mut catalog = Dictionary::new();
//! catalog.set("Type", Object::name("Catalog"));
//! catalog.set("Pages", ObjectId::new(2, 0));
//!
//! let writer = SyntaxWriter::default();
//! let tree = writer.indirect_object(ObjectId::new(1, 0), &Object::from(catalog))?;
//!
//! assert_eq!(
//!     tree.to_full_string(),
//!     "1 0 obj\n<</Type /Catalog /Pages 2 0 R>>\nendobj\n"
//! );
//! assert_eq!(tree.header().and_then(|h| h.object_id()), Some((1, 0)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`syntax`] - Green nodes, lists, the node cache and the shape factory
//! - [`objects`] - Direct-construction object model
//! - [`writer`] - Byte output for xref/trailer and the object-to-tree bridge

pub mod error;
pub mod objects;
pub mod syntax;
pub mod writer;

pub use error::{Result, SyntaxError};
pub use syntax::{
    Diagnostic, DiagnosticSeverity, GreenNode, GreenSyntax, ListBuilder, NodeCache, SyntaxFactory,
    SyntaxKind, SyntaxList, SyntaxOptions,
};

/// Current version of pdf-green
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
