//! Typed views over the PDF grammar shapes
//!
//! Every shape is a thin wrapper around a [`GreenNode`] of the matching kind.
//! The wrappers only add named slot accessors; all storage, width accounting
//! and text rendering stay in the node itself.
//!
//! | Shape                          | Slots                                        |
//! |--------------------------------|----------------------------------------------|
//! | [`LiteralExpressionSyntax`]    | token                                        |
//! | [`IndirectReferenceSyntax`]    | object number, generation, `R`               |
//! | [`IndirectObjectHeaderSyntax`] | object number, generation, `obj`             |
//! | [`IndirectObjectSyntax`]       | header, content, `endobj`                    |
//! | [`ArrayElementSyntax`]         | expression                                   |
//! | [`CollectionExpressionSyntax`] | open token, element list, close token        |
//! | [`DictionaryElementSyntax`]    | key, value                                   |
//! | [`XRefEntrySyntax`]            | offset, generation, type keyword             |
//! | [`XRefSubSectionSyntax`]       | start object number, entry count, entries    |
//! | [`XRefSectionSyntax`]          | `xref`, subsections                          |
//! | [`FileTrailerSyntax`]          | `trailer`, dictionary, `startxref`, offset   |

use super::kind::SyntaxKind;
use super::list::SyntaxList;
use super::node::GreenNode;
use super::token::TokenValue;
use std::fmt;

/// Shared contract of the typed node views.
pub trait GreenSyntax: Sized {
    /// Whether a node of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: GreenNode) -> Option<Self>;

    fn green(&self) -> &GreenNode;

    fn into_green(self) -> GreenNode;
}

impl GreenSyntax for GreenNode {
    fn can_cast(_kind: SyntaxKind) -> bool {
        true
    }

    fn cast(node: GreenNode) -> Option<Self> {
        Some(node)
    }

    fn green(&self) -> &GreenNode {
        self
    }

    fn into_green(self) -> GreenNode {
        self
    }
}

macro_rules! green_syntax {
    ($(#[$meta:meta])* $name:ident => $can_cast:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(GreenNode);

        impl GreenSyntax for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                let can_cast: fn(SyntaxKind) -> bool = $can_cast;
                can_cast(kind)
            }

            fn cast(node: GreenNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn green(&self) -> &GreenNode {
                &self.0
            }

            fn into_green(self) -> GreenNode {
                self.0
            }
        }

        impl $name {
            pub fn kind(&self) -> SyntaxKind {
                self.0.kind()
            }

            pub fn width(&self) -> usize {
                self.0.width()
            }

            pub fn full_width(&self) -> usize {
                self.0.full_width()
            }

            pub fn to_full_string(&self) -> String {
                self.0.to_full_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for GreenNode {
            fn from(node: $name) -> GreenNode {
                node.0
            }
        }
    };
}

green_syntax! {
    /// Any node that can stand as a value.
    ExpressionSyntax => SyntaxKind::is_expression
}

green_syntax! {
    /// `true`, `false`, `null`, a number, a string or a name.
    LiteralExpressionSyntax => SyntaxKind::is_literal_expression
}

green_syntax! {
    /// `12 0 R`
    IndirectReferenceSyntax => |kind| kind == SyntaxKind::IndirectReferenceExpression
}

green_syntax! {
    /// `12 0 obj`
    IndirectObjectHeaderSyntax => |kind| kind == SyntaxKind::IndirectObjectHeader
}

green_syntax! {
    /// `12 0 obj ... endobj`
    IndirectObjectSyntax => |kind| kind == SyntaxKind::IndirectObject
}

green_syntax! {
    ArrayElementSyntax => |kind| kind == SyntaxKind::ArrayElement
}

green_syntax! {
    /// `[...]` or `<<...>>`
    CollectionExpressionSyntax => |kind| {
        matches!(kind, SyntaxKind::ArrayExpression | SyntaxKind::DictionaryExpression)
    }
}

green_syntax! {
    /// `/Key value`
    DictionaryElementSyntax => |kind| kind == SyntaxKind::DictionaryElement
}

green_syntax! {
    /// One cross-reference record.
    XRefEntrySyntax => |kind| kind == SyntaxKind::XRefEntryExpression
}

green_syntax! {
    /// `start count` followed by the entries.
    XRefSubSectionSyntax => |kind| kind == SyntaxKind::XRefSubSectionExpression
}

green_syntax! {
    /// `xref` followed by the subsections.
    XRefSectionSyntax => |kind| kind == SyntaxKind::XRefSectionExpression
}

green_syntax! {
    /// `trailer <<...>> startxref offset`
    FileTrailerSyntax => |kind| kind == SyntaxKind::FileTrailer
}

fn typed_slot<T: GreenSyntax>(node: &GreenNode, index: usize) -> Option<T> {
    node.slot(index).cloned().and_then(T::cast)
}

fn integer_slot(node: &GreenNode, index: usize) -> Option<i64> {
    node.slot(index)?.value()?.as_integer()
}

impl ExpressionSyntax {
    pub fn as_literal(&self) -> Option<LiteralExpressionSyntax> {
        LiteralExpressionSyntax::cast(self.0.clone())
    }

    pub fn as_reference(&self) -> Option<IndirectReferenceSyntax> {
        IndirectReferenceSyntax::cast(self.0.clone())
    }

    pub fn as_collection(&self) -> Option<CollectionExpressionSyntax> {
        CollectionExpressionSyntax::cast(self.0.clone())
    }
}

impl LiteralExpressionSyntax {
    pub fn token(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    /// Decoded value of the literal token.
    pub fn value(&self) -> Option<&TokenValue> {
        self.token()?.value().map(|v| v.as_ref())
    }
}

impl IndirectReferenceSyntax {
    pub fn object_number(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn generation_number(&self) -> Option<&GreenNode> {
        self.0.slot(1)
    }

    pub fn reference_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }

    /// Object and generation numbers, when both tokens carry values.
    pub fn object_id(&self) -> Option<(i64, i64)> {
        Some((integer_slot(&self.0, 0)?, integer_slot(&self.0, 1)?))
    }
}

impl IndirectObjectHeaderSyntax {
    pub fn object_number(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn generation_number(&self) -> Option<&GreenNode> {
        self.0.slot(1)
    }

    pub fn obj_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }

    pub fn object_id(&self) -> Option<(i64, i64)> {
        Some((integer_slot(&self.0, 0)?, integer_slot(&self.0, 1)?))
    }
}

impl IndirectObjectSyntax {
    pub fn header(&self) -> Option<IndirectObjectHeaderSyntax> {
        typed_slot(&self.0, 0)
    }

    pub fn content(&self) -> Option<ExpressionSyntax> {
        typed_slot(&self.0, 1)
    }

    pub fn endobj_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }
}

impl ArrayElementSyntax {
    pub fn expression(&self) -> Option<ExpressionSyntax> {
        typed_slot(&self.0, 0)
    }
}

impl CollectionExpressionSyntax {
    pub fn is_dictionary(&self) -> bool {
        self.0.kind() == SyntaxKind::DictionaryExpression
    }

    pub fn open_token(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    /// Elements viewed as `T`: [`ArrayElementSyntax`] for arrays,
    /// [`DictionaryElementSyntax`] for dictionaries.
    pub fn elements<T: GreenSyntax>(&self) -> SyntaxList<T> {
        SyntaxList::new(self.0.slot(1).cloned())
    }

    pub fn close_token(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }
}

impl DictionaryElementSyntax {
    pub fn key(&self) -> Option<LiteralExpressionSyntax> {
        typed_slot(&self.0, 0)
    }

    /// Key name without the solidus.
    pub fn key_name(&self) -> Option<&str> {
        self.0.slot(0)?.slot(0)?.value()?.as_name()
    }

    pub fn value(&self) -> Option<ExpressionSyntax> {
        typed_slot(&self.0, 1)
    }
}

impl XRefEntrySyntax {
    pub fn offset(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn generation_number(&self) -> Option<&GreenNode> {
        self.0.slot(1)
    }

    pub fn entry_type(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }

    pub fn is_in_use(&self) -> bool {
        self.entry_type()
            .is_some_and(|t| t.kind() == SyntaxKind::InUseEntryKeyword)
    }
}

impl XRefSubSectionSyntax {
    pub fn start_object_number(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn entry_count(&self) -> Option<&GreenNode> {
        self.0.slot(1)
    }

    pub fn entries(&self) -> SyntaxList<XRefEntrySyntax> {
        SyntaxList::new(self.0.slot(2).cloned())
    }
}

impl XRefSectionSyntax {
    pub fn xref_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn subsections(&self) -> SyntaxList<XRefSubSectionSyntax> {
        SyntaxList::new(self.0.slot(1).cloned())
    }
}

impl FileTrailerSyntax {
    pub fn trailer_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(0)
    }

    pub fn dictionary(&self) -> Option<CollectionExpressionSyntax> {
        typed_slot(&self.0, 1)
    }

    pub fn startxref_keyword(&self) -> Option<&GreenNode> {
        self.0.slot(2)
    }

    pub fn byte_offset(&self) -> Option<&GreenNode> {
        self.0.slot(3)
    }
}
