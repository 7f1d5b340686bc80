//! Variable-arity child lists
//!
//! A repeated child (array elements, dictionary entries, xref entries and
//! subsections) is stored as one of several representations picked by
//! [`ListBuilder`](super::ListBuilder) from the element count:
//!
//! | count | stored as                                   |
//! |-------|---------------------------------------------|
//! | 0     | absent slot                                 |
//! | 1     | the element itself                          |
//! | 2, 3  | fixed-size list node                        |
//! | 4+    | array-backed list node                      |
//! | many  | array-backed list node with an offset table |
//!
//! [`SyntaxList`] reads any of them the same way.

use super::kind::SyntaxKind;
use super::node::GreenNode;
use super::nodes::GreenSyntax;
use crate::error::{Result, SyntaxError};
use std::marker::PhantomData;

#[derive(Clone)]
pub(crate) enum ListRepr {
    Two([GreenNode; 2]),
    Three([GreenNode; 3]),
    Many(Box<[GreenNode]>),
    LotsOf {
        children: Box<[GreenNode]>,
        offsets: Box<[usize]>,
    },
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListRepresentation {
    Two,
    Three,
    Many,
    LotsOf,
}

impl ListRepr {
    pub(crate) fn lots_of(children: Box<[GreenNode]>) -> ListRepr {
        let mut offsets = Vec::with_capacity(children.len());
        let mut offset = 0;
        for child in children.iter() {
            offsets.push(offset);
            offset += child.full_width();
        }
        ListRepr::LotsOf {
            children,
            offsets: offsets.into_boxed_slice(),
        }
    }

    pub(crate) fn as_slice(&self) -> &[GreenNode] {
        match self {
            ListRepr::Two(children) => children,
            ListRepr::Three(children) => children,
            ListRepr::Many(children) => children,
            ListRepr::LotsOf { children, .. } => children,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&GreenNode> {
        self.as_slice().get(index)
    }

    pub(crate) fn slot_offset(&self, index: usize) -> usize {
        let index = index.min(self.len().saturating_sub(1));
        match self {
            ListRepr::LotsOf { offsets, .. } => offsets.get(index).copied().unwrap_or(0),
            _ => self.as_slice()[..index]
                .iter()
                .map(GreenNode::full_width)
                .sum(),
        }
    }

    #[cfg(test)]
    pub(crate) fn representation(&self) -> ListRepresentation {
        match self {
            ListRepr::Two(_) => ListRepresentation::Two,
            ListRepr::Three(_) => ListRepresentation::Three,
            ListRepr::Many(_) => ListRepresentation::Many,
            ListRepr::LotsOf { .. } => ListRepresentation::LotsOf,
        }
    }
}

/// Read-only view over a list slot, whatever its representation.
///
/// `T` is the element shape; elements that do not have that shape read as
/// `None`.
pub struct SyntaxList<T = GreenNode> {
    node: Option<GreenNode>,
    _marker: PhantomData<T>,
}

impl<T> Clone for SyntaxList<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SyntaxList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxList").field("node", &self.node).finish()
    }
}

impl<T: GreenSyntax> SyntaxList<T> {
    pub fn new(node: Option<GreenNode>) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// The underlying node: absent, a single element or a list node.
    pub fn node(&self) -> Option<&GreenNode> {
        self.node.as_ref()
    }

    pub fn into_node(self) -> Option<GreenNode> {
        self.node
    }

    pub fn count(&self) -> usize {
        match &self.node {
            None => 0,
            Some(node) if node.is_list() => node.slot_count(),
            Some(_) => 1,
        }
    }

    /// Element at `index`.
    ///
    /// Past the end yields `None`, except on a single-element list, where
    /// the element stands in for the list and only index 0 is addressable.
    pub fn node_at(&self, index: usize) -> Result<Option<T>> {
        match &self.node {
            None => Ok(None),
            Some(node) if node.is_list() => Ok(node.slot(index).cloned().and_then(T::cast)),
            Some(node) if index == 0 => Ok(T::cast(node.clone())),
            Some(node) => Err(SyntaxError::InvalidOperation(format!(
                "index {index} on a single-element list of {:?}",
                node.kind()
            ))),
        }
    }

    pub fn any(&self) -> bool {
        self.node.is_some()
    }

    /// Whether some element has `kind`.
    pub fn any_kind(&self, kind: SyntaxKind) -> bool {
        match &self.node {
            None => false,
            Some(node) if node.is_list() => node.children().any(|c| c.kind() == kind),
            Some(node) => node.kind() == kind,
        }
    }

    /// Summed full width of the elements before `index`, clamped to the
    /// last element.
    pub fn slot_offset(&self, index: usize) -> usize {
        match &self.node {
            Some(node) if node.is_list() => node.slot_offset(index),
            _ => 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let elements: Box<dyn Iterator<Item = &GreenNode> + '_> = match &self.node {
            None => Box::new(std::iter::empty()),
            Some(node) if node.is_list() => Box::new(node.children()),
            Some(node) => Box::new(std::iter::once(node)),
        };
        elements.cloned().filter_map(T::cast)
    }

    pub fn full_width(&self) -> usize {
        self.node.as_ref().map_or(0, GreenNode::full_width)
    }
}

impl<T: GreenSyntax> Default for SyntaxList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> GreenNode {
        GreenNode::token(SyntaxKind::NameToken, text, None, None, None).unwrap()
    }

    #[test]
    fn test_lots_of_offsets() {
        let children: Vec<_> = ["/A", "/BB", "/CCC", "/D"].iter().map(|t| name(t)).collect();
        let list = ListRepr::lots_of(children.into_boxed_slice());

        assert_eq!(list.slot_offset(0), 0);
        assert_eq!(list.slot_offset(1), 2);
        assert_eq!(list.slot_offset(2), 5);
        assert_eq!(list.slot_offset(3), 9);
        assert_eq!(list.slot_offset(10), 9);
    }

    #[test]
    fn test_many_offsets_match_lots_of() {
        let children: Vec<_> = ["/A", "/BB", "/CCC", "/D", "/E"].iter().map(|t| name(t)).collect();
        let many = ListRepr::Many(children.clone().into_boxed_slice());
        let lots = ListRepr::lots_of(children.into_boxed_slice());

        for i in 0..8 {
            assert_eq!(many.slot_offset(i), lots.slot_offset(i), "offset {i}");
        }
    }

    #[test]
    fn test_empty_view() {
        let list: SyntaxList = SyntaxList::empty();
        assert_eq!(list.count(), 0);
        assert!(!list.any());
        assert!(list.node_at(0).unwrap().is_none());
        assert!(list.node_at(5).unwrap().is_none());
        assert_eq!(list.slot_offset(3), 0);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_singleton_view() {
        let list: SyntaxList = SyntaxList::new(Some(name("/Only")));
        assert_eq!(list.count(), 1);
        assert!(list.any());
        assert!(list.any_kind(SyntaxKind::NameToken));
        assert!(!list.any_kind(SyntaxKind::NumericLiteralToken));
        assert_eq!(list.node_at(0).unwrap().and_then(|n| n.text().map(str::to_owned)), Some("/Only".into()));
        assert!(matches!(list.node_at(1), Err(SyntaxError::InvalidOperation(_))));
        assert_eq!(list.slot_offset(0), 0);
        assert_eq!(list.slot_offset(4), 0);
    }

    #[test]
    fn test_list_view_over_two() {
        let node = GreenNode::new_list(ListRepr::Two([name("/A"), name("/B")]));
        let list: SyntaxList = SyntaxList::new(Some(node));
        assert_eq!(list.count(), 2);
        assert!(list.node_at(2).unwrap().is_none());
        assert_eq!(list.slot_offset(1), 2);
        let texts: Vec<String> = list.iter().filter_map(|n| n.text().map(str::to_owned)).collect();
        assert_eq!(texts, vec!["/A", "/B"]);
    }
}
