//! Tree traversal

use super::diagnostics::Diagnostic;
use super::node::GreenNode;

/// Depth-first, document-order iterator over a subtree.
///
/// Yields the root and every node in a slot below it; trivia attached to
/// tokens is not visited.
pub struct Preorder<'a> {
    stack: Vec<&'a GreenNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a GreenNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}

impl GreenNode {
    pub fn descendants(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Tokens of this subtree in document order.
    pub fn descendant_tokens(&self) -> impl Iterator<Item = &GreenNode> + '_ {
        self.descendants().filter(|node| node.is_token())
    }

    /// Every diagnostic attached in this subtree, trivia included.
    ///
    /// Depth-first; a node's own diagnostics come before those below it.
    /// Subtrees without the contains-diagnostics flag are skipped.
    pub fn collect_diagnostics(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if !node.contains_diagnostics() {
                continue;
            }
            found.extend_from_slice(node.diagnostics());

            if node.is_token() {
                stack.extend(node.trailing_trivia());
                stack.extend(node.leading_trivia());
            } else {
                stack.extend(node.children().rev());
            }
        }

        found
    }
}
