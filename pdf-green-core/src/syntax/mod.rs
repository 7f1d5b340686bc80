//! Green syntax trees for PDF
//!
//! Parsed PDF constructs (indirect objects, cross-reference sections,
//! trailers, literals) are represented as immutable, structurally shared
//! trees. Every node, from a single space of trivia up to a whole trailer,
//! is a [`GreenNode`].
//!
//! # Features
//!
//! - **Exact round-trip**: [`GreenNode::to_full_string`] reproduces the
//!   source text, trivia included
//! - **Width accounting**: full width is stored, width (edge trivia
//!   excluded) is derived on demand
//! - **Compact lists**: repeated children are stored in the smallest
//!   representation for their count
//! - **Hash-consing**: small shapes are shared through a [`NodeCache`]
//! - **Copy-on-write diagnostics**: [`GreenNode::with_diagnostics`] returns a
//!   new node and leaves the original untouched
//!
//! # Example
//!
//! ```rust
//! use pdf_green::syntax::{GreenSyntax, SyntaxFactory, SyntaxKind, SyntaxOptions};
//!
//! # fn main() -> pdf_green::Result<()> {
//! let factory = SyntaxFactory::with_options(
//!     SyntaxOptions::default().with_cache_size_bits(12),
//! );
//! let space = || Some(factory.whitespace(" "));
//!
//! let key = factory.literal(factory.name("Type", None, None)?)?;
//! let value = factory.literal(factory.name("Example", space(), None)?)?;
//! let entry = factory.dictionary_element(key, value)?;
//!
//! let dictionary = factory.dictionary_expression(
//!     factory.keyword(SyntaxKind::LessThanLessThanToken, None, None)?,
//!     factory.list(vec![entry]),
//!     factory.keyword(SyntaxKind::GreaterThanGreaterThanToken, None, None)?,
//! )?;
//!
//! assert_eq!(dictionary.to_string(), "<</Type /Example>>");
//! assert_eq!(dictionary.green().slot_count(), 3);
//! # Ok(())
//! # }
//! ```

mod builder;
mod cache;
mod diagnostics;
mod factory;
mod flags;
mod kind;
mod list;
mod node;
mod nodes;
mod token;
mod walk;
mod well_known;

pub use builder::{ListBuilder, DEFAULT_CAPACITY, LOTS_OF_CHILDREN_THRESHOLD};
pub use cache::{CacheLookup, CacheStats, NodeCache, DEFAULT_CACHE_SIZE_BITS, MAX_CACHED_CHILDREN};
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub(crate) use factory::check_xref_offset;
pub use factory::{SyntaxFactory, MAX_XREF_OFFSET};
pub use flags::NodeFlags;
pub use kind::SyntaxKind;
pub use list::SyntaxList;
pub use node::GreenNode;
pub use nodes::{
    ArrayElementSyntax, CollectionExpressionSyntax, DictionaryElementSyntax, ExpressionSyntax,
    FileTrailerSyntax, GreenSyntax, IndirectObjectHeaderSyntax, IndirectObjectSyntax,
    IndirectReferenceSyntax, LiteralExpressionSyntax, XRefEntrySyntax, XRefSectionSyntax,
    XRefSubSectionSyntax,
};
pub use token::TokenValue;
pub use walk::Preorder;
pub use well_known::MAX_SHARED_INTEGER;

/// Configuration for tree construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxOptions {
    /// Node cache size as a power of two
    pub cache_size_bits: u32,
    /// Share small shapes through a node cache
    pub caching: bool,
    /// Element count from which lists keep an offset table
    pub lots_of_children_threshold: usize,
}

impl Default for SyntaxOptions {
    fn default() -> Self {
        Self {
            cache_size_bits: DEFAULT_CACHE_SIZE_BITS,
            caching: true,
            lots_of_children_threshold: LOTS_OF_CHILDREN_THRESHOLD,
        }
    }
}

impl SyntaxOptions {
    /// Set the node cache size (`2^bits` slots)
    pub fn with_cache_size_bits(mut self, bits: u32) -> Self {
        self.cache_size_bits = bits;
        self
    }

    /// Enable or disable node sharing
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        self
    }

    /// Set the offset-table threshold for lists
    pub fn with_lots_of_children_threshold(mut self, threshold: usize) -> Self {
        self.lots_of_children_threshold = threshold;
        self
    }
}
