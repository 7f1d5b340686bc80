//! Validating, cache-aware constructors for tokens and grammar shapes
//!
//! A parser (or the [`SyntaxWriter`](crate::writer::SyntaxWriter)) builds
//! every node through a [`SyntaxFactory`]. Each shape constructor checks the
//! kinds of its parts and fails with a [`SyntaxError`] naming the offending
//! argument. Small shapes go through the factory's [`NodeCache`], so
//! building the same shape from the same children twice yields one shared
//! instance.
//!
//! # Example
//!
//! ```rust
//! use pdf_green::syntax::{SyntaxFactory, SyntaxKind};
//!
//! # fn main() -> pdf_green::Result<()> {
//! let factory = SyntaxFactory::default();
//! let space = factory.whitespace(" ");
//!
//! let token = factory.integer(123, Some(space.clone()), Some(space))?;
//! let literal = factory.literal(token)?;
//!
//! assert_eq!(literal.kind(), SyntaxKind::NumericLiteralExpression);
//! assert_eq!(literal.to_string(), "123");
//! assert_eq!(literal.to_full_string(), " 123 ");
//! # Ok(())
//! # }
//! ```

use super::builder::ListBuilder;
use super::cache::{CacheLookup, NodeCache, MAX_CACHED_CHILDREN};
use super::kind::SyntaxKind;
use super::list::SyntaxList;
use super::node::GreenNode;
use super::nodes::*;
use super::token::TokenValue;
use super::well_known::WellKnownTokens;
use super::SyntaxOptions;
use crate::error::{Result, SyntaxError};
use crate::objects::encoding::{encode_hex_string, encode_literal_string, encode_name, format_real};
use std::sync::Arc;

/// Builds green nodes, sharing small shapes through a [`NodeCache`].
///
/// Cloning a factory shares its cache.
#[derive(Debug, Clone)]
pub struct SyntaxFactory {
    cache: Option<Arc<NodeCache>>,
    options: SyntaxOptions,
}

impl SyntaxFactory {
    /// Factory using `cache`, which may be shared with other factories.
    pub fn new(cache: Arc<NodeCache>) -> Self {
        Self {
            cache: Some(cache),
            options: SyntaxOptions::default(),
        }
    }

    /// Factory with its own cache sized from `options` (none when caching
    /// is disabled).
    pub fn with_options(options: SyntaxOptions) -> Self {
        let cache = options
            .caching
            .then(|| Arc::new(NodeCache::new(options.cache_size_bits)));
        Self { cache, options }
    }

    /// Factory that never shares nodes.
    pub fn uncached() -> Self {
        Self::with_options(SyntaxOptions::default().with_caching(false))
    }

    pub fn cache(&self) -> Option<&Arc<NodeCache>> {
        self.cache.as_ref()
    }

    pub fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    /// Empty list builder honoring this factory's options.
    pub fn list_builder(&self) -> ListBuilder {
        ListBuilder::new().with_lots_of_children_threshold(self.options.lots_of_children_threshold)
    }

    /// List of `items`, in order.
    pub fn list<T: GreenSyntax>(&self, items: impl IntoIterator<Item = T>) -> SyntaxList<T> {
        let mut builder = self.list_builder();
        builder.extend(items.into_iter().map(GreenSyntax::into_green));
        builder.to_list()
    }

    /// Shared token table, consulted only when nodes are cached.
    fn well_known(&self) -> Option<&'static WellKnownTokens> {
        self.cache.as_ref().map(|_| WellKnownTokens::get())
    }

    fn node(&self, kind: SyntaxKind, slots: Vec<Option<GreenNode>>) -> GreenNode {
        let Some(cache) = self.cache.as_deref() else {
            return GreenNode::new_composite(kind, slots);
        };
        if slots.len() > MAX_CACHED_CHILDREN {
            return GreenNode::new_composite(kind, slots);
        }

        let mut key: [Option<&GreenNode>; MAX_CACHED_CHILDREN] = [None; MAX_CACHED_CHILDREN];
        for (entry, slot) in key.iter_mut().zip(&slots) {
            *entry = slot.as_ref();
        }

        let lookup = cache.try_get_node(kind, &key[..slots.len()]);
        match lookup {
            CacheLookup::Hit { node, .. } => node,
            CacheLookup::Miss { hash } => {
                let node = GreenNode::new_composite(kind, slots);
                cache.add_node(node.clone(), hash);
                node
            }
            CacheLookup::Uncacheable => GreenNode::new_composite(kind, slots),
        }
    }

    // Trivia

    pub fn whitespace(&self, text: &str) -> GreenNode {
        match self.well_known() {
            Some(tokens) if text == " " => tokens.space().clone(),
            _ => GreenNode::new_trivia(SyntaxKind::WhitespaceTrivia, text),
        }
    }

    pub fn end_of_line(&self, text: &str) -> GreenNode {
        match self.well_known() {
            Some(tokens) if text == "\n" => tokens.newline().clone(),
            _ => GreenNode::new_trivia(SyntaxKind::EndOfLineTrivia, text),
        }
    }

    /// Comment trivia; `text` includes the `%`.
    pub fn comment(&self, text: &str) -> GreenNode {
        GreenNode::new_trivia(SyntaxKind::CommentTrivia, text)
    }

    // Tokens

    pub fn token(
        &self,
        kind: SyntaxKind,
        text: &str,
        value: Option<TokenValue>,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        GreenNode::token(kind, text, value, leading, trailing)
    }

    /// Keyword or punctuation token spelled with its fixed text.
    ///
    /// With caching on, a token whose edge trivia is absent, a single space
    /// or `\n` is a shared instance.
    pub fn keyword(
        &self,
        kind: SyntaxKind,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        let text = kind
            .fixed_text()
            .ok_or_else(|| SyntaxError::unexpected_kind("kind", "keyword or punctuation", kind))?;
        if let Some(shared) = self
            .well_known()
            .and_then(|tokens| tokens.fixed(kind, leading.as_ref(), trailing.as_ref()))
        {
            return Ok(shared);
        }
        GreenNode::token(kind, text, None, leading, trailing)
    }

    pub fn integer(
        &self,
        value: i64,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        if let Some(shared) = self
            .well_known()
            .and_then(|tokens| tokens.integer(value, leading.as_ref(), trailing.as_ref()))
        {
            return Ok(shared);
        }
        GreenNode::token(
            SyntaxKind::NumericLiteralToken,
            &value.to_string(),
            Some(TokenValue::Integer(value)),
            leading,
            trailing,
        )
    }

    pub fn real(
        &self,
        value: f64,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        GreenNode::token(
            SyntaxKind::NumericLiteralToken,
            &format_real(value),
            Some(TokenValue::Real(value)),
            leading,
            trailing,
        )
    }

    /// Name token; `name` is given without the solidus.
    pub fn name(
        &self,
        name: &str,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        GreenNode::token(
            SyntaxKind::NameToken,
            &encode_name(name),
            Some(TokenValue::Name(name.to_string())),
            leading,
            trailing,
        )
    }

    pub fn literal_string(
        &self,
        bytes: &[u8],
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        GreenNode::token(
            SyntaxKind::StringLiteralToken,
            &encode_literal_string(bytes),
            Some(TokenValue::Bytes(bytes.to_vec())),
            leading,
            trailing,
        )
    }

    pub fn hex_string(
        &self,
        bytes: &[u8],
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        GreenNode::token(
            SyntaxKind::HexStringLiteralToken,
            &encode_hex_string(bytes),
            Some(TokenValue::Bytes(bytes.to_vec())),
            leading,
            trailing,
        )
    }

    // Shapes

    /// Literal expression of `kind` wrapping `token`.
    pub fn literal_expression(
        &self,
        kind: SyntaxKind,
        token: GreenNode,
    ) -> Result<LiteralExpressionSyntax> {
        if !kind.is_literal_expression() {
            return Err(SyntaxError::unexpected_kind("kind", "literal expression kind", kind));
        }
        if !kind.accepts_literal_token(token.kind()) {
            return Err(SyntaxError::unexpected_kind(
                "token",
                format!("token for {kind:?}"),
                token.kind(),
            ));
        }
        cast(self.node(kind, vec![Some(token)]))
    }

    /// Literal expression whose kind follows from the token.
    pub fn literal(&self, token: GreenNode) -> Result<LiteralExpressionSyntax> {
        let kind = SyntaxKind::literal_expression_for(token.kind())
            .ok_or_else(|| SyntaxError::unexpected_kind("token", "literal token", token.kind()))?;
        self.literal_expression(kind, token)
    }

    pub fn indirect_reference(
        &self,
        object_number: GreenNode,
        generation_number: GreenNode,
        reference_keyword: GreenNode,
    ) -> Result<IndirectReferenceSyntax> {
        expect_kind("object_number", &object_number, SyntaxKind::NumericLiteralToken)?;
        expect_kind("generation_number", &generation_number, SyntaxKind::NumericLiteralToken)?;
        expect_kind("reference_keyword", &reference_keyword, SyntaxKind::ReferenceKeyword)?;
        cast(self.node(
            SyntaxKind::IndirectReferenceExpression,
            vec![Some(object_number), Some(generation_number), Some(reference_keyword)],
        ))
    }

    pub fn indirect_object_header(
        &self,
        object_number: GreenNode,
        generation_number: GreenNode,
        obj_keyword: GreenNode,
    ) -> Result<IndirectObjectHeaderSyntax> {
        expect_kind("object_number", &object_number, SyntaxKind::NumericLiteralToken)?;
        expect_kind("generation_number", &generation_number, SyntaxKind::NumericLiteralToken)?;
        expect_kind("obj_keyword", &obj_keyword, SyntaxKind::ObjKeyword)?;
        cast(self.node(
            SyntaxKind::IndirectObjectHeader,
            vec![Some(object_number), Some(generation_number), Some(obj_keyword)],
        ))
    }

    pub fn indirect_object(
        &self,
        header: IndirectObjectHeaderSyntax,
        content: impl Into<GreenNode>,
        endobj_keyword: GreenNode,
    ) -> Result<IndirectObjectSyntax> {
        let content = content.into();
        expect_expression("content", &content)?;
        expect_kind("endobj_keyword", &endobj_keyword, SyntaxKind::EndObjKeyword)?;
        cast(self.node(
            SyntaxKind::IndirectObject,
            vec![Some(header.into_green()), Some(content), Some(endobj_keyword)],
        ))
    }

    pub fn array_element(&self, expression: impl Into<GreenNode>) -> Result<ArrayElementSyntax> {
        let expression = expression.into();
        expect_expression("expression", &expression)?;
        cast(self.node(SyntaxKind::ArrayElement, vec![Some(expression)]))
    }

    /// `[` elements `]`; the element list may be empty.
    pub fn array_expression(
        &self,
        open_token: GreenNode,
        elements: SyntaxList<ArrayElementSyntax>,
        close_token: GreenNode,
    ) -> Result<CollectionExpressionSyntax> {
        expect_kind("open_token", &open_token, SyntaxKind::OpenBracketToken)?;
        expect_elements("elements", elements.node(), SyntaxKind::ArrayElement)?;
        expect_kind("close_token", &close_token, SyntaxKind::CloseBracketToken)?;
        cast(self.node(
            SyntaxKind::ArrayExpression,
            vec![Some(open_token), elements.into_node(), Some(close_token)],
        ))
    }

    /// Key/value pair; the key must be a name literal.
    pub fn dictionary_element(
        &self,
        key: LiteralExpressionSyntax,
        value: impl Into<GreenNode>,
    ) -> Result<DictionaryElementSyntax> {
        let value = value.into();
        expect_kind("key", key.green(), SyntaxKind::NameLiteralExpression)?;
        expect_expression("value", &value)?;
        cast(self.node(
            SyntaxKind::DictionaryElement,
            vec![Some(key.into_green()), Some(value)],
        ))
    }

    /// `<<` elements `>>`; the element list may be empty.
    pub fn dictionary_expression(
        &self,
        open_token: GreenNode,
        elements: SyntaxList<DictionaryElementSyntax>,
        close_token: GreenNode,
    ) -> Result<CollectionExpressionSyntax> {
        expect_kind("open_token", &open_token, SyntaxKind::LessThanLessThanToken)?;
        expect_elements("elements", elements.node(), SyntaxKind::DictionaryElement)?;
        expect_kind("close_token", &close_token, SyntaxKind::GreaterThanGreaterThanToken)?;
        cast(self.node(
            SyntaxKind::DictionaryExpression,
            vec![Some(open_token), elements.into_node(), Some(close_token)],
        ))
    }

    pub fn xref_entry(
        &self,
        offset: GreenNode,
        generation_number: GreenNode,
        entry_type: GreenNode,
    ) -> Result<XRefEntrySyntax> {
        expect_kind("offset", &offset, SyntaxKind::NumericLiteralToken)?;
        expect_kind("generation_number", &generation_number, SyntaxKind::NumericLiteralToken)?;
        if !matches!(
            entry_type.kind(),
            SyntaxKind::InUseEntryKeyword | SyntaxKind::FreeEntryKeyword
        ) {
            return Err(SyntaxError::unexpected_kind(
                "entry_type",
                "InUseEntryKeyword or FreeEntryKeyword",
                entry_type.kind(),
            ));
        }
        cast(self.node(
            SyntaxKind::XRefEntryExpression,
            vec![Some(offset), Some(generation_number), Some(entry_type)],
        ))
    }

    /// Canonical 20-byte record: ten-digit offset, five-digit generation,
    /// type keyword and the two-byte end-of-line marker.
    ///
    /// Offsets above [`MAX_XREF_OFFSET`] do not fit the record.
    pub fn xref_entry_from_values(
        &self,
        offset: u64,
        generation: u16,
        in_use: bool,
    ) -> Result<XRefEntrySyntax> {
        check_xref_offset(offset)?;
        let offset = self.token(
            SyntaxKind::NumericLiteralToken,
            &format!("{offset:010}"),
            Some(TokenValue::Integer(i64::try_from(offset).map_err(|_| {
                SyntaxError::ArgumentOutOfRange {
                    param: "offset",
                    value: offset,
                    limit: MAX_XREF_OFFSET,
                }
            })?)),
            None,
            Some(self.whitespace(" ")),
        )?;
        let generation = self.token(
            SyntaxKind::NumericLiteralToken,
            &format!("{generation:05}"),
            Some(TokenValue::Integer(i64::from(generation))),
            None,
            Some(self.whitespace(" ")),
        )?;
        let (kind, text) = if in_use {
            (SyntaxKind::InUseEntryKeyword, "n \n")
        } else {
            (SyntaxKind::FreeEntryKeyword, "f \n")
        };
        let entry_type = match self.well_known().and_then(|tokens| tokens.record_type(in_use)) {
            Some(shared) => shared,
            None => self.token(kind, text, None, None, None)?,
        };
        self.xref_entry(offset, generation, entry_type)
    }

    /// Subsection header plus at least one entry.
    pub fn xref_subsection(
        &self,
        start_object_number: GreenNode,
        entry_count: GreenNode,
        entries: SyntaxList<XRefEntrySyntax>,
    ) -> Result<XRefSubSectionSyntax> {
        expect_kind("start_object_number", &start_object_number, SyntaxKind::NumericLiteralToken)?;
        expect_kind("entry_count", &entry_count, SyntaxKind::NumericLiteralToken)?;
        if !entries.any() {
            return Err(SyntaxError::EmptyCollection("entries"));
        }
        expect_elements("entries", entries.node(), SyntaxKind::XRefEntryExpression)?;
        cast(self.node(
            SyntaxKind::XRefSubSectionExpression,
            vec![Some(start_object_number), Some(entry_count), entries.into_node()],
        ))
    }

    /// `xref` plus at least one subsection.
    pub fn xref_section(
        &self,
        xref_keyword: GreenNode,
        subsections: SyntaxList<XRefSubSectionSyntax>,
    ) -> Result<XRefSectionSyntax> {
        expect_kind("xref_keyword", &xref_keyword, SyntaxKind::XRefKeyword)?;
        if !subsections.any() {
            return Err(SyntaxError::EmptyCollection("subsections"));
        }
        expect_elements("subsections", subsections.node(), SyntaxKind::XRefSubSectionExpression)?;
        cast(self.node(
            SyntaxKind::XRefSectionExpression,
            vec![Some(xref_keyword), subsections.into_node()],
        ))
    }

    pub fn file_trailer(
        &self,
        trailer_keyword: GreenNode,
        dictionary: CollectionExpressionSyntax,
        startxref_keyword: GreenNode,
        byte_offset: GreenNode,
    ) -> Result<FileTrailerSyntax> {
        expect_kind("trailer_keyword", &trailer_keyword, SyntaxKind::TrailerKeyword)?;
        expect_kind("dictionary", dictionary.green(), SyntaxKind::DictionaryExpression)?;
        expect_kind("startxref_keyword", &startxref_keyword, SyntaxKind::StartXRefKeyword)?;
        expect_kind("byte_offset", &byte_offset, SyntaxKind::NumericLiteralToken)?;
        cast(self.node(
            SyntaxKind::FileTrailer,
            vec![
                Some(trailer_keyword),
                Some(dictionary.into_green()),
                Some(startxref_keyword),
                Some(byte_offset),
            ],
        ))
    }
}

impl Default for SyntaxFactory {
    fn default() -> Self {
        Self::with_options(SyntaxOptions::default())
    }
}

/// Largest byte offset a cross-reference record can hold (ten digits)
pub const MAX_XREF_OFFSET: u64 = 9_999_999_999;

/// Rejects offsets that would widen a cross-reference record past 20 bytes.
pub(crate) fn check_xref_offset(offset: u64) -> Result<()> {
    if offset > MAX_XREF_OFFSET {
        return Err(SyntaxError::ArgumentOutOfRange {
            param: "offset",
            value: offset,
            limit: MAX_XREF_OFFSET,
        });
    }
    Ok(())
}

fn cast<T: GreenSyntax>(node: GreenNode) -> Result<T> {
    let kind = node.kind();
    T::cast(node).ok_or_else(|| {
        SyntaxError::InvalidOperation(format!("{kind:?} node does not have the requested shape"))
    })
}

fn expect_kind(param: &'static str, node: &GreenNode, kind: SyntaxKind) -> Result<()> {
    if node.kind() == kind {
        Ok(())
    } else {
        Err(SyntaxError::unexpected_kind(param, format!("{kind:?}"), node.kind()))
    }
}

fn expect_expression(param: &'static str, node: &GreenNode) -> Result<()> {
    if node.kind().is_expression() {
        Ok(())
    } else {
        Err(SyntaxError::unexpected_kind(param, "expression", node.kind()))
    }
}

fn expect_elements(param: &'static str, list: Option<&GreenNode>, kind: SyntaxKind) -> Result<()> {
    match list {
        None => Ok(()),
        Some(list) if list.is_list() => list
            .children()
            .try_for_each(|element| expect_kind(param, element, kind)),
        Some(element) => expect_kind(param, element, kind),
    }
}
