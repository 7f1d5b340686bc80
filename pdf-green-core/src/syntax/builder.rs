//! Staging area for list slots

use super::kind::SyntaxKind;
use super::list::{ListRepr, SyntaxList};
use super::node::GreenNode;
use super::nodes::GreenSyntax;
use crate::error::{Result, SyntaxError};

/// Initial capacity of a new builder
pub const DEFAULT_CAPACITY: usize = 8;

/// Element count from which lists keep a per-slot offset table
pub const LOTS_OF_CHILDREN_THRESHOLD: usize = 10;

/// Growable buffer that turns a run of nodes into a list slot.
///
/// Adding a list node appends its elements, so lists never nest.
#[derive(Debug, Clone)]
pub struct ListBuilder {
    nodes: Vec<GreenNode>,
    lots_of_children_threshold: usize,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            lots_of_children_threshold: LOTS_OF_CHILDREN_THRESHOLD,
        }
    }

    /// Overrides the offset-table threshold (never below 4).
    pub fn with_lots_of_children_threshold(mut self, threshold: usize) -> Self {
        self.lots_of_children_threshold = threshold.max(4);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&GreenNode> {
        self.nodes.get(index)
    }

    /// Appends `node`; `None` is ignored and list nodes are flattened.
    pub fn add(&mut self, node: impl Into<Option<GreenNode>>) -> &mut Self {
        match node.into() {
            None => {}
            Some(node) if node.is_list() => self.nodes.extend(node.children().cloned()),
            Some(node) => self.nodes.push(node),
        }
        self
    }

    /// Appends `items[offset..offset + length]`.
    pub fn add_range(&mut self, items: &[GreenNode], offset: usize, length: usize) -> Result<&mut Self> {
        if offset > items.len() {
            return Err(SyntaxError::ArgumentOutOfRange {
                param: "offset",
                value: offset as u64,
                limit: items.len() as u64,
            });
        }
        let available = items.len() - offset;
        if length > available {
            return Err(SyntaxError::ArgumentOutOfRange {
                param: "length",
                value: length as u64,
                limit: available as u64,
            });
        }

        self.nodes.reserve(length);
        for item in &items[offset..offset + length] {
            self.add(item.clone());
        }
        Ok(self)
    }

    pub fn remove_last(&mut self) -> Option<GreenNode> {
        self.nodes.pop()
    }

    /// Empties the builder, keeping its capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn any_kind(&self, kind: SyntaxKind) -> bool {
        self.nodes.iter().any(|n| n.kind() == kind)
    }

    /// Materializes the current contents; the builder stays usable.
    pub fn to_list_node(&self) -> Option<GreenNode> {
        let list = match self.nodes.as_slice() {
            [] => return None,
            [single] => return Some(single.clone()),
            [a, b] => ListRepr::Two([a.clone(), b.clone()]),
            [a, b, c] => ListRepr::Three([a.clone(), b.clone(), c.clone()]),
            nodes if nodes.len() < self.lots_of_children_threshold => {
                ListRepr::Many(nodes.to_vec().into_boxed_slice())
            }
            nodes => ListRepr::lots_of(nodes.to_vec().into_boxed_slice()),
        };
        Some(GreenNode::new_list(list))
    }

    /// Typed view over [`to_list_node`](Self::to_list_node).
    pub fn to_list<T: GreenSyntax>(&self) -> SyntaxList<T> {
        SyntaxList::new(self.to_list_node())
    }
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<GreenNode> for ListBuilder {
    fn extend<I: IntoIterator<Item = GreenNode>>(&mut self, iter: I) {
        for node in iter {
            self.add(node);
        }
    }
}

impl FromIterator<GreenNode> for ListBuilder {
    fn from_iter<I: IntoIterator<Item = GreenNode>>(iter: I) -> Self {
        let mut builder = ListBuilder::new();
        builder.extend(iter);
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::list::ListRepresentation;

    fn number(i: usize) -> GreenNode {
        GreenNode::token(SyntaxKind::NumericLiteralToken, &i.to_string(), None, None, None).unwrap()
    }

    fn build(count: usize) -> ListBuilder {
        (0..count).map(number).collect()
    }

    #[test]
    fn test_new_builder_capacity() {
        let builder = ListBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.capacity() >= DEFAULT_CAPACITY);
    }

    #[test]
    fn test_grows_past_capacity() {
        let builder = build(DEFAULT_CAPACITY * 3);
        assert_eq!(builder.len(), DEFAULT_CAPACITY * 3);
        assert!(builder.capacity() >= DEFAULT_CAPACITY * 3);
    }

    #[test]
    fn test_representation_selection() {
        assert!(build(0).to_list_node().is_none());

        let single = build(1).to_list_node().unwrap();
        assert!(!single.is_list());
        assert_eq!(single.kind(), SyntaxKind::NumericLiteralToken);

        let expected = [
            (2, ListRepresentation::Two),
            (3, ListRepresentation::Three),
            (4, ListRepresentation::Many),
            (LOTS_OF_CHILDREN_THRESHOLD - 1, ListRepresentation::Many),
            (LOTS_OF_CHILDREN_THRESHOLD, ListRepresentation::LotsOf),
            (100, ListRepresentation::LotsOf),
        ];
        for (count, representation) in expected {
            let node = build(count).to_list_node().unwrap();
            assert_eq!(node.list_representation(), Some(representation), "count {count}");
            assert_eq!(node.slot_count(), count);
        }
    }

    #[test]
    fn test_custom_threshold() {
        let builder: ListBuilder = (0..5).map(number).collect();
        let builder = builder.with_lots_of_children_threshold(5);
        assert_eq!(
            builder.to_list_node().unwrap().list_representation(),
            Some(ListRepresentation::LotsOf)
        );

        let mut clamped = ListBuilder::new().with_lots_of_children_threshold(1);
        clamped.extend((0..4).map(number));
        assert_eq!(
            clamped.to_list_node().unwrap().list_representation(),
            Some(ListRepresentation::LotsOf)
        );
    }

    #[test]
    fn test_add_none_is_noop() {
        let mut builder = ListBuilder::new();
        let nothing: Option<GreenNode> = None;
        builder.add(nothing.clone());
        assert_eq!(builder.len(), 0);
        builder.add(number(1)).add(nothing).add(number(2));
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_add_flattens_lists() {
        let inner = build(3).to_list_node().unwrap();
        let mut builder = ListBuilder::new();
        builder.add(number(9));
        builder.add(inner);

        assert_eq!(builder.len(), 4);
        let node = builder.to_list_node().unwrap();
        assert!(node.children().all(|c| !c.is_list()));
        assert_eq!(node.to_string(), "9012");
    }

    #[test]
    fn test_add_range_validation() {
        let items: Vec<_> = (0..4).map(number).collect();
        let mut builder = ListBuilder::new();

        match builder.add_range(&items, 5, 0) {
            Err(SyntaxError::ArgumentOutOfRange { param, .. }) => assert_eq!(param, "offset"),
            other => panic!("expected offset error, got {other:?}"),
        }
        match builder.add_range(&items, 2, 3) {
            Err(SyntaxError::ArgumentOutOfRange { param, value, limit }) => {
                assert_eq!(param, "length");
                assert_eq!(value, 3);
                assert_eq!(limit, 2);
            }
            other => panic!("expected length error, got {other:?}"),
        }
        assert!(builder.is_empty());

        builder.add_range(&items, 1, 2).unwrap();
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.get(0).and_then(GreenNode::text), Some("1"));

        builder.add_range(&items, 4, 0).unwrap();
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_remove_last_and_clear() {
        let mut builder = build(3);
        let removed = builder.remove_last().unwrap();
        assert_eq!(removed.text(), Some("2"));
        assert_eq!(builder.len(), 2);
        assert!(builder.get(2).is_none());

        let capacity = builder.capacity();
        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.capacity(), capacity);
        assert!(builder.remove_last().is_none());
    }

    #[test]
    fn test_any_kind() {
        let mut builder = build(2);
        assert!(builder.any_kind(SyntaxKind::NumericLiteralToken));
        assert!(!builder.any_kind(SyntaxKind::NameToken));
        builder.clear();
        assert!(!builder.any_kind(SyntaxKind::NumericLiteralToken));
    }

    #[test]
    fn test_to_list_node_is_repeatable() {
        let builder = build(5);
        let first = builder.to_list_node().unwrap();
        let second = builder.to_list_node().unwrap();
        assert_eq!(first, second);
        assert_eq!(builder.len(), 5);
    }

    #[test]
    fn test_typed_list() {
        let builder = build(3);
        let list: SyntaxList = builder.to_list();
        assert_eq!(list.count(), 3);
        assert_eq!(list.slot_offset(2), 2);
    }
}
