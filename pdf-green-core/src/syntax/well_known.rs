//! Process-wide shared tokens
//!
//! The node cache matches children by identity, so two `true` literals only
//! share a node when they wrap the same token instance. Keyword and
//! punctuation tokens, small integers and the two cross-reference type
//! tokens are therefore built once, for every combination of absent, single
//! space and newline edge trivia, and handed out by the caching factory.

use super::kind::SyntaxKind;
use super::node::GreenNode;
use super::token::TokenValue;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Largest integer whose tokens are shared
pub const MAX_SHARED_INTEGER: i64 = 127;

const FIXED_TEXT_KINDS: [SyntaxKind; 15] = [
    SyntaxKind::OpenBracketToken,
    SyntaxKind::CloseBracketToken,
    SyntaxKind::LessThanLessThanToken,
    SyntaxKind::GreaterThanGreaterThanToken,
    SyntaxKind::TrueKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::NullKeyword,
    SyntaxKind::ObjKeyword,
    SyntaxKind::EndObjKeyword,
    SyntaxKind::ReferenceKeyword,
    SyntaxKind::XRefKeyword,
    SyntaxKind::TrailerKeyword,
    SyntaxKind::StartXRefKeyword,
    SyntaxKind::InUseEntryKeyword,
    SyntaxKind::FreeEntryKeyword,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EdgeTrivia {
    Absent,
    Space,
    Newline,
}

const EDGES: [EdgeTrivia; 3] = [EdgeTrivia::Absent, EdgeTrivia::Space, EdgeTrivia::Newline];

type TokenKey<K> = (K, EdgeTrivia, EdgeTrivia);

#[derive(Debug)]
pub(crate) struct WellKnownTokens {
    space: GreenNode,
    newline: GreenNode,
    fixed: HashMap<TokenKey<SyntaxKind>, GreenNode>,
    integers: HashMap<TokenKey<i64>, GreenNode>,
    in_use_record: Option<GreenNode>,
    free_record: Option<GreenNode>,
}

lazy_static! {
    static ref WELL_KNOWN: WellKnownTokens = WellKnownTokens::build();
}

impl WellKnownTokens {
    pub(crate) fn get() -> &'static WellKnownTokens {
        &WELL_KNOWN
    }

    fn build() -> Self {
        let space = GreenNode::new_trivia(SyntaxKind::WhitespaceTrivia, " ");
        let newline = GreenNode::new_trivia(SyntaxKind::EndOfLineTrivia, "\n");
        let edge = |edge: EdgeTrivia| match edge {
            EdgeTrivia::Absent => None,
            EdgeTrivia::Space => Some(space.clone()),
            EdgeTrivia::Newline => Some(newline.clone()),
        };

        let mut fixed = HashMap::new();
        let mut integers = HashMap::new();
        for leading in EDGES {
            for trailing in EDGES {
                for kind in FIXED_TEXT_KINDS {
                    let Some(text) = kind.fixed_text() else {
                        continue;
                    };
                    if let Ok(token) = GreenNode::token(kind, text, None, edge(leading), edge(trailing)) {
                        fixed.insert((kind, leading, trailing), token);
                    }
                }
                for value in 0..=MAX_SHARED_INTEGER {
                    if let Ok(token) = GreenNode::token(
                        SyntaxKind::NumericLiteralToken,
                        &value.to_string(),
                        Some(TokenValue::Integer(value)),
                        edge(leading),
                        edge(trailing),
                    ) {
                        integers.insert((value, leading, trailing), token);
                    }
                }
            }
        }

        let in_use_record =
            GreenNode::token(SyntaxKind::InUseEntryKeyword, "n \n", None, None, None).ok();
        let free_record =
            GreenNode::token(SyntaxKind::FreeEntryKeyword, "f \n", None, None, None).ok();

        tracing::debug!(
            fixed = fixed.len(),
            integers = integers.len(),
            "built well-known token table"
        );

        Self {
            space,
            newline,
            fixed,
            integers,
            in_use_record,
            free_record,
        }
    }

    /// Shared single-space whitespace trivia
    pub(crate) fn space(&self) -> &GreenNode {
        &self.space
    }

    /// Shared `\n` end-of-line trivia
    pub(crate) fn newline(&self) -> &GreenNode {
        &self.newline
    }

    /// Shared keyword or punctuation token with the given edge trivia.
    pub(crate) fn fixed(
        &self,
        kind: SyntaxKind,
        leading: Option<&GreenNode>,
        trailing: Option<&GreenNode>,
    ) -> Option<GreenNode> {
        let key = (kind, self.classify(leading)?, self.classify(trailing)?);
        self.fixed.get(&key).cloned()
    }

    /// Shared integer token with the given edge trivia.
    pub(crate) fn integer(
        &self,
        value: i64,
        leading: Option<&GreenNode>,
        trailing: Option<&GreenNode>,
    ) -> Option<GreenNode> {
        let key = (value, self.classify(leading)?, self.classify(trailing)?);
        self.integers.get(&key).cloned()
    }

    /// Shared `n \n` / `f \n` cross-reference type token.
    pub(crate) fn record_type(&self, in_use: bool) -> Option<GreenNode> {
        if in_use {
            self.in_use_record.clone()
        } else {
            self.free_record.clone()
        }
    }

    fn classify(&self, trivia: Option<&GreenNode>) -> Option<EdgeTrivia> {
        match trivia {
            None => Some(EdgeTrivia::Absent),
            // Flagged trivia is never swapped for the shared instance
            Some(t) if t.contains_diagnostics() => None,
            Some(t) if *t == self.space => Some(EdgeTrivia::Space),
            Some(t) if *t == self.newline => Some(EdgeTrivia::Newline),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_tokens_cover_every_edge_combination() {
        let table = WellKnownTokens::get();
        assert_eq!(table.fixed.len(), FIXED_TEXT_KINDS.len() * 9);
        assert_eq!(table.integers.len(), (MAX_SHARED_INTEGER as usize + 1) * 9);
    }

    #[test]
    fn test_equal_trivia_maps_to_shared_token() {
        let table = WellKnownTokens::get();
        let space = GreenNode::new_trivia(SyntaxKind::WhitespaceTrivia, " ");

        let a = table.fixed(SyntaxKind::NullKeyword, Some(&space), None).unwrap();
        let b = table
            .fixed(SyntaxKind::NullKeyword, Some(table.space()), None)
            .unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.to_full_string(), " null");
    }

    #[test]
    fn test_other_trivia_is_not_shared() {
        let table = WellKnownTokens::get();
        let tab = GreenNode::new_trivia(SyntaxKind::WhitespaceTrivia, "\t");
        let crlf = GreenNode::new_trivia(SyntaxKind::EndOfLineTrivia, "\r\n");

        assert!(table.fixed(SyntaxKind::TrueKeyword, Some(&tab), None).is_none());
        assert!(table.fixed(SyntaxKind::TrueKeyword, None, Some(&crlf)).is_none());
        assert!(table.integer(MAX_SHARED_INTEGER + 1, None, None).is_none());
        assert!(table.integer(-1, None, None).is_none());
    }

    #[test]
    fn test_trivia_with_diagnostics_is_not_replaced() {
        use crate::syntax::Diagnostic;

        let table = WellKnownTokens::get();
        let flagged = table
            .space()
            .with_diagnostics(vec![Diagnostic::warning("PDF2001", "odd spacing")]);
        assert!(table.integer(0, Some(&flagged), None).is_none());
    }

    #[test]
    fn test_record_type_tokens() {
        let table = WellKnownTokens::get();
        assert_eq!(table.record_type(true).unwrap().text(), Some("n \n"));
        assert_eq!(table.record_type(false).unwrap().text(), Some("f \n"));
        assert!(table.record_type(true).unwrap().ptr_eq(&table.record_type(true).unwrap()));
        assert_eq!(table.newline().text(), Some("\n"));
    }
}
