//! Green nodes
//!
//! A [`GreenNode`] is an immutable, reference-counted tree node. Trivia,
//! tokens, grammar productions and child lists are all green nodes; they
//! differ only in their body. Children are shared by reference, so deriving a
//! new node (for example to attach diagnostics) never copies a subtree.

use super::diagnostics::Diagnostic;
use super::flags::NodeFlags;
use super::kind::SyntaxKind;
use super::list::ListRepr;
#[cfg(test)]
use super::list::ListRepresentation;
use super::token::{TokenData, TokenValue};
use crate::error::{Result, SyntaxError};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared handle to an immutable tree node.
#[derive(Clone)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(Clone)]
struct GreenNodeData {
    kind: SyntaxKind,
    flags: NodeFlags,
    full_width: usize,
    diagnostics: Option<Arc<[Diagnostic]>>,
    body: NodeBody,
}

#[derive(Clone)]
pub(crate) enum NodeBody {
    Trivia(Box<str>),
    Token(TokenData),
    Composite(Box<[Option<GreenNode>]>),
    List(ListRepr),
}

impl NodeBody {
    fn slot(&self, index: usize) -> Option<&GreenNode> {
        match self {
            NodeBody::Trivia(_) | NodeBody::Token(_) => None,
            NodeBody::Composite(slots) => slots.get(index).and_then(Option::as_ref),
            NodeBody::List(list) => list.get(index),
        }
    }

    fn slot_count(&self) -> usize {
        match self {
            NodeBody::Trivia(_) | NodeBody::Token(_) => 0,
            NodeBody::Composite(slots) => slots.len(),
            NodeBody::List(list) => list.len(),
        }
    }

    fn full_width(&self) -> usize {
        match self {
            NodeBody::Trivia(text) => text.len(),
            NodeBody::Token(token) => token.full_width(),
            _ => (0..self.slot_count())
                .filter_map(|i| self.slot(i))
                .map(GreenNode::full_width)
                .sum(),
        }
    }

    /// Union of the inheritable flags of everything directly below.
    fn inherited_flags(&self) -> NodeFlags {
        match self {
            NodeBody::Trivia(_) => NodeFlags::empty(),
            NodeBody::Token(token) => token
                .trivia()
                .fold(NodeFlags::empty(), |acc, t| acc | t.flags().inherited()),
            _ => (0..self.slot_count())
                .filter_map(|i| self.slot(i))
                .fold(NodeFlags::empty(), |acc, c| acc | c.flags().inherited()),
        }
    }
}

impl GreenNode {
    fn from_body(kind: SyntaxKind, body: NodeBody) -> GreenNode {
        let full_width = body.full_width();
        let flags = body.inherited_flags();
        GreenNode(Arc::new(GreenNodeData {
            kind,
            flags,
            full_width,
            diagnostics: None,
            body,
        }))
    }

    pub(crate) fn new_trivia(kind: SyntaxKind, text: &str) -> GreenNode {
        Self::from_body(kind, NodeBody::Trivia(text.into()))
    }

    pub(crate) fn new_token(kind: SyntaxKind, token: TokenData) -> GreenNode {
        Self::from_body(kind, NodeBody::Token(token))
    }

    pub(crate) fn new_composite(kind: SyntaxKind, slots: Vec<Option<GreenNode>>) -> GreenNode {
        Self::from_body(kind, NodeBody::Composite(slots.into_boxed_slice()))
    }

    pub(crate) fn new_list(list: ListRepr) -> GreenNode {
        Self::from_body(SyntaxKind::List, NodeBody::List(list))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn flags(&self) -> NodeFlags {
        self.0.flags
    }

    pub fn contains_flags(&self, flags: NodeFlags) -> bool {
        self.0.flags.contains(flags)
    }

    /// Sets flags on a node that is still being put together.
    ///
    /// A handle that is shared with anyone else is detached first, so a
    /// published node is never changed underneath its other owners.
    pub fn set_flags(&mut self, flags: NodeFlags) {
        Arc::make_mut(&mut self.0).flags |= flags;
    }

    /// Clears flags; same ownership rules as [`set_flags`](Self::set_flags).
    pub fn clear_flags(&mut self, flags: NodeFlags) {
        Arc::make_mut(&mut self.0).flags &= !flags;
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.0.body, NodeBody::Trivia(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self.0.body, NodeBody::Token(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.0.body, NodeBody::List(_))
    }

    pub fn is_missing(&self) -> bool {
        self.contains_flags(NodeFlags::IS_MISSING)
    }

    /// Both handles point at the same node instance.
    pub fn ptr_eq(&self, other: &GreenNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub(crate) fn body(&self) -> &NodeBody {
        &self.0.body
    }

    /// Number of logical children; 0 for tokens and trivia.
    pub fn slot_count(&self) -> usize {
        self.0.body.slot_count()
    }

    /// Child at `index`, `None` past the end or for an absent optional slot.
    ///
    /// Tokens and trivia are not indexable and report an invalid operation.
    pub fn get_slot(&self, index: usize) -> Result<Option<&GreenNode>> {
        match &self.0.body {
            NodeBody::Trivia(_) | NodeBody::Token(_) => Err(SyntaxError::InvalidOperation(
                format!("{:?} has no slots", self.kind()),
            )),
            body => Ok(body.slot(index)),
        }
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&GreenNode> {
        self.0.body.slot(index)
    }

    /// Non-absent children in slot order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &GreenNode> + '_ {
        (0..self.slot_count()).filter_map(move |i| self.slot(i))
    }

    /// Text length including every contained trivia.
    pub fn full_width(&self) -> usize {
        self.0.full_width
    }

    /// Text length without the leading trivia of the first token and the
    /// trailing trivia of the last token.
    pub fn width(&self) -> usize {
        match &self.0.body {
            NodeBody::Trivia(_) => 0,
            NodeBody::Token(token) => token.text().len(),
            NodeBody::List(_) if self.is_trivia_list() => 0,
            NodeBody::Composite(_) | NodeBody::List(_) => {
                self.full_width() - self.leading_trivia_width() - self.trailing_trivia_width()
            }
        }
    }

    pub fn leading_trivia_width(&self) -> usize {
        match &self.0.body {
            NodeBody::Trivia(_) => 0,
            NodeBody::Token(token) => token.leading_width(),
            _ => self
                .first_terminal()
                .map_or(0, GreenNode::leading_trivia_width),
        }
    }

    pub fn trailing_trivia_width(&self) -> usize {
        match &self.0.body {
            NodeBody::Trivia(_) => 0,
            NodeBody::Token(token) => token.trailing_width(),
            _ => self
                .last_terminal()
                .map_or(0, GreenNode::trailing_trivia_width),
        }
    }

    fn is_trivia_list(&self) -> bool {
        self.is_list() && self.children().all(GreenNode::is_trivia)
    }

    /// Leftmost leaf below this node; `None` when called on a leaf.
    pub fn first_terminal(&self) -> Option<&GreenNode> {
        let mut node = self.children().next()?;
        while node.slot_count() > 0 {
            node = node.children().next()?;
        }
        Some(node)
    }

    /// Rightmost leaf below this node; `None` when called on a leaf.
    pub fn last_terminal(&self) -> Option<&GreenNode> {
        let mut node = self.children().next_back()?;
        while node.slot_count() > 0 {
            node = node.children().next_back()?;
        }
        Some(node)
    }

    /// Summed full width of the slots before `index`.
    ///
    /// An out-of-range index is clamped to the last slot.
    pub fn slot_offset(&self, index: usize) -> usize {
        if let NodeBody::List(list) = &self.0.body {
            return list.slot_offset(index);
        }
        let index = index.min(self.slot_count().saturating_sub(1));
        (0..index)
            .filter_map(|i| self.slot(i))
            .map(GreenNode::full_width)
            .sum()
    }

    #[cfg(test)]
    pub(crate) fn list_representation(&self) -> Option<ListRepresentation> {
        match &self.0.body {
            NodeBody::List(list) => Some(list.representation()),
            _ => None,
        }
    }

    /// Literal text of a token or trivia.
    pub fn text(&self) -> Option<&str> {
        match &self.0.body {
            NodeBody::Trivia(text) => Some(text),
            NodeBody::Token(token) => Some(token.text()),
            _ => None,
        }
    }

    /// Decoded value of a token.
    pub fn value(&self) -> Option<&Arc<TokenValue>> {
        match &self.0.body {
            NodeBody::Token(token) => token.value(),
            _ => None,
        }
    }

    pub fn leading_trivia(&self) -> Option<&GreenNode> {
        match &self.0.body {
            NodeBody::Token(token) => token.leading(),
            _ => None,
        }
    }

    pub fn trailing_trivia(&self) -> Option<&GreenNode> {
        match &self.0.body {
            NodeBody::Token(token) => token.trailing(),
            _ => None,
        }
    }

    /// Diagnostics attached to this node itself.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.0.diagnostics.as_deref().unwrap_or(&[])
    }

    /// Whether this node or anything below it carries diagnostics.
    pub fn contains_diagnostics(&self) -> bool {
        self.contains_flags(NodeFlags::CONTAINS_DIAGNOSTICS)
    }

    /// Returns a copy of this node carrying `diagnostics`.
    ///
    /// The receiver and every tree that shares it are left untouched; the
    /// copy shares all children with the original.
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> GreenNode {
        let mut data = (*self.0).clone();
        data.flags = (data.flags - NodeFlags::CONTAINS_DIAGNOSTICS) | data.body.inherited_flags();
        if diagnostics.is_empty() {
            data.diagnostics = None;
        } else {
            data.diagnostics = Some(diagnostics.into());
            data.flags |= NodeFlags::CONTAINS_DIAGNOSTICS;
        }
        GreenNode(Arc::new(data))
    }

    /// Writes the text of this subtree.
    ///
    /// `leading`/`trailing` select whether the outermost trivia of the first
    /// and last token are emitted; trivia between tokens always is.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W, leading: bool, trailing: bool) -> fmt::Result {
        let mut stack: Vec<(&GreenNode, bool, bool)> = vec![(self, leading, trailing)];

        while let Some((node, leading, trailing)) = stack.pop() {
            match &node.0.body {
                NodeBody::Trivia(text) => out.write_str(text)?,
                NodeBody::Token(token) => token.write_to(out, leading, trailing)?,
                body => {
                    let count = body.slot_count();
                    let first = (0..count).find(|&i| body.slot(i).is_some());
                    let last = (0..count).rev().find(|&i| body.slot(i).is_some());
                    if let (Some(first), Some(last)) = (first, last) {
                        for i in (first..=last).rev() {
                            if let Some(child) = body.slot(i) {
                                stack.push((child, leading || i != first, trailing || i != last));
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Text of this subtree including its outermost trivia.
    pub fn to_full_string(&self) -> String {
        let mut text = String::with_capacity(self.full_width());
        // Writing into a String cannot fail
        let _ = self.write_to(&mut text, true, true);
        text
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false, false)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("GreenNode");
        s.field("kind", &self.kind())
            .field("full_width", &self.full_width());
        if let Some(text) = self.text() {
            s.field("text", &text);
        } else {
            let slots: Vec<_> = (0..self.slot_count()).map(|i| self.slot(i)).collect();
            s.field("slots", &slots);
        }
        if !self.diagnostics().is_empty() {
            s.field("diagnostics", &self.diagnostics());
        }
        s.finish()
    }
}

/// Structural equality: kind, text, value and children. Flags and
/// diagnostics are ignored.
impl PartialEq for GreenNode {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.kind() != other.kind() {
            return false;
        }
        match (&self.0.body, &other.0.body) {
            (NodeBody::Trivia(a), NodeBody::Trivia(b)) => a == b,
            (NodeBody::Token(a), NodeBody::Token(b)) => a == b,
            (NodeBody::Trivia(_) | NodeBody::Token(_), _)
            | (_, NodeBody::Trivia(_) | NodeBody::Token(_)) => false,
            _ => {
                self.slot_count() == other.slot_count()
                    && (0..self.slot_count()).all(|i| self.slot(i) == other.slot(i))
            }
        }
    }
}

impl Eq for GreenNode {}

impl Hash for GreenNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match &self.0.body {
            NodeBody::Trivia(text) => text.hash(state),
            NodeBody::Token(token) => token.hash(state),
            _ => {
                self.slot_count().hash(state);
                for i in 0..self.slot_count() {
                    self.slot(i).hash(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::DiagnosticSeverity;

    fn space() -> GreenNode {
        GreenNode::new_trivia(SyntaxKind::WhitespaceTrivia, " ")
    }

    fn number(text: &str, leading: Option<GreenNode>, trailing: Option<GreenNode>) -> GreenNode {
        GreenNode::token(SyntaxKind::NumericLiteralToken, text, None, leading, trailing).unwrap()
    }

    fn reference() -> GreenNode {
        let r = GreenNode::token(SyntaxKind::ReferenceKeyword, "R", None, None, Some(space())).unwrap();
        GreenNode::new_composite(
            SyntaxKind::IndirectReferenceExpression,
            vec![
                Some(number("12", Some(space()), Some(space()))),
                Some(number("0", None, Some(space()))),
                Some(r),
            ],
        )
    }

    #[test]
    fn test_composite_widths() {
        let node = reference();
        assert_eq!(node.full_width(), " 12 0 R ".len());
        assert_eq!(node.width(), "12 0 R".len());
        assert_eq!(node.leading_trivia_width(), 1);
        assert_eq!(node.trailing_trivia_width(), 1);
    }

    #[test]
    fn test_text_rendering() {
        let node = reference();
        assert_eq!(node.to_string(), "12 0 R");
        assert_eq!(node.to_full_string(), " 12 0 R ");
    }

    #[test]
    fn test_slot_access() {
        let node = reference();
        assert_eq!(node.slot_count(), 3);
        assert_eq!(
            node.get_slot(2).unwrap().map(GreenNode::kind),
            Some(SyntaxKind::ReferenceKeyword)
        );
        assert!(node.get_slot(3).unwrap().is_none());
        assert!(node.get_slot(usize::MAX).unwrap().is_none());
    }

    #[test]
    fn test_token_slot_access_is_invalid() {
        let token = number("7", None, None);
        assert_eq!(token.slot_count(), 0);
        assert!(matches!(
            token.get_slot(0),
            Err(SyntaxError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_terminals() {
        let node = reference();
        assert_eq!(node.first_terminal().and_then(GreenNode::text), Some("12"));
        assert_eq!(node.last_terminal().and_then(GreenNode::text), Some("R"));

        let token = number("7", None, None);
        assert!(token.first_terminal().is_none());
        assert!(token.last_terminal().is_none());
    }

    #[test]
    fn test_slot_offset_clamps() {
        let node = reference();
        assert_eq!(node.slot_offset(0), 0);
        assert_eq!(node.slot_offset(1), 4);
        assert_eq!(node.slot_offset(2), 6);
        assert_eq!(node.slot_offset(99), 6);
    }

    #[test]
    fn test_with_diagnostics_is_copy_on_write() {
        let original = reference();
        let diagnostic = Diagnostic::new("PDF0001", DiagnosticSeverity::Error, "bad");
        let decorated = original.with_diagnostics(vec![diagnostic.clone()]);

        assert!(!decorated.ptr_eq(&original));
        assert_eq!(decorated.diagnostics(), &[diagnostic]);
        assert!(decorated.contains_diagnostics());
        assert!(original.diagnostics().is_empty());
        assert!(!original.contains_diagnostics());
        // Structural equality ignores diagnostics
        assert_eq!(decorated, original);
        // Children are shared, not copied
        assert!(decorated.slot(0).unwrap().ptr_eq(original.slot(0).unwrap()));
    }

    #[test]
    fn test_clearing_diagnostics_keeps_inherited_flag() {
        let bad = number("x", None, None).with_diagnostics(vec![Diagnostic::error("PDF0002", "not a number")]);
        let parent = GreenNode::new_composite(SyntaxKind::NumericLiteralExpression, vec![Some(bad)]);
        assert!(parent.contains_diagnostics());
        assert!(parent.diagnostics().is_empty());

        let cleared = parent.with_diagnostics(Vec::new());
        assert!(cleared.contains_diagnostics());
    }

    #[test]
    fn test_set_flags_detaches_shared_handle() {
        let original = number("1", None, None);
        let mut copy = original.clone();
        copy.set_flags(NodeFlags::IS_MISSING);

        assert!(copy.is_missing());
        assert!(!original.is_missing());
        copy.clear_flags(NodeFlags::IS_MISSING);
        assert!(!copy.is_missing());
    }

    #[test]
    fn test_structural_equality_and_hash() {
        use std::collections::hash_map::DefaultHasher;

        let a = reference();
        let b = reference();
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);

        let mut ha = DefaultHasher::new();
        a.hash(&mut ha);
        let mut hb = DefaultHasher::new();
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());

        let c = number("12", Some(space()), Some(space()));
        assert_ne!(a, c);
    }

    #[test]
    fn test_debug_output_names_kind() {
        let debug = format!("{:?}", reference());
        assert!(debug.contains("IndirectReferenceExpression"));
        assert!(debug.contains("\"12\""));
    }
}
