//! PDF writing functionality
//!
//! Byte-level emission of cross-reference sections and trailers, and
//! [`SyntaxWriter`], which builds the equivalent green trees.

mod syntax_writer;
mod xref;

pub use syntax_writer::SyntaxWriter;
pub use xref::{write_trailer, write_xref_section, XRefRecord};
