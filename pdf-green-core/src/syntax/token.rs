//! Tokens and trivia
//!
//! Tokens are the leaves of the tree. Each carries its literal text, an
//! optional decoded value supplied by the lexer, and optional leading and
//! trailing trivia (a single trivia node or a list of them).

use super::kind::SyntaxKind;
use super::node::{GreenNode, NodeBody};
use crate::error::{Result, SyntaxError};
use lazy_static::lazy_static;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Decoded value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Bool(bool),
    Null,
    Integer(i64),
    Real(f64),
    /// Decoded bytes of a literal or hexadecimal string
    Bytes(Vec<u8>),
    /// Name without the leading solidus, `#xx` escapes resolved
    Name(String),
}

lazy_static! {
    static ref TRUE_VALUE: Arc<TokenValue> = Arc::new(TokenValue::Bool(true));
    static ref FALSE_VALUE: Arc<TokenValue> = Arc::new(TokenValue::Bool(false));
    static ref NULL_VALUE: Arc<TokenValue> = Arc::new(TokenValue::Null);
}

impl TokenValue {
    /// Shared value of the `true`, `false` and `null` keywords.
    ///
    /// Every keyword token of these kinds points at the same instance.
    pub fn keyword_value(kind: SyntaxKind) -> Option<Arc<TokenValue>> {
        match kind {
            SyntaxKind::TrueKeyword => Some(Arc::clone(&TRUE_VALUE)),
            SyntaxKind::FalseKeyword => Some(Arc::clone(&FALSE_VALUE)),
            SyntaxKind::NullKeyword => Some(Arc::clone(&NULL_VALUE)),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TokenValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            TokenValue::Real(f) => Some(*f),
            TokenValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TokenValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenValue::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TokenValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq)]
pub(crate) struct TokenData {
    text: Box<str>,
    value: Option<Arc<TokenValue>>,
    leading: Option<GreenNode>,
    trailing: Option<GreenNode>,
}

impl TokenData {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn value(&self) -> Option<&Arc<TokenValue>> {
        self.value.as_ref()
    }

    pub(crate) fn leading(&self) -> Option<&GreenNode> {
        self.leading.as_ref()
    }

    pub(crate) fn trailing(&self) -> Option<&GreenNode> {
        self.trailing.as_ref()
    }

    pub(crate) fn trivia(&self) -> impl Iterator<Item = &GreenNode> {
        self.leading.iter().chain(self.trailing.iter())
    }

    pub(crate) fn leading_width(&self) -> usize {
        self.leading.as_ref().map_or(0, GreenNode::full_width)
    }

    pub(crate) fn trailing_width(&self) -> usize {
        self.trailing.as_ref().map_or(0, GreenNode::full_width)
    }

    pub(crate) fn full_width(&self) -> usize {
        self.leading_width() + self.text.len() + self.trailing_width()
    }

    pub(crate) fn write_to<W: fmt::Write>(
        &self,
        out: &mut W,
        leading: bool,
        trailing: bool,
    ) -> fmt::Result {
        if leading {
            if let Some(trivia) = &self.leading {
                trivia.write_to(out, true, true)?;
            }
        }
        out.write_str(&self.text)?;
        if trailing {
            if let Some(trivia) = &self.trailing {
                trivia.write_to(out, true, true)?;
            }
        }
        Ok(())
    }
}

// The decoded value follows from the text, so hashing the text suffices.
impl Hash for TokenData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.leading.hash(state);
        self.trailing.hash(state);
    }
}

fn check_trivia(param: &'static str, trivia: Option<&GreenNode>) -> Result<()> {
    let Some(trivia) = trivia else {
        return Ok(());
    };
    let valid = trivia.is_trivia() || (trivia.is_list() && trivia.children().all(GreenNode::is_trivia));
    if valid {
        Ok(())
    } else {
        Err(SyntaxError::unexpected_kind(param, "trivia", trivia.kind()))
    }
}

impl GreenNode {
    /// Creates a trivia node.
    pub fn trivia(kind: SyntaxKind, text: &str) -> Result<GreenNode> {
        if !kind.is_trivia() {
            return Err(SyntaxError::unexpected_kind("kind", "trivia kind", kind));
        }
        Ok(GreenNode::new_trivia(kind, text))
    }

    /// Creates a token.
    ///
    /// Keyword tokens of the `true`, `false` and `null` kinds get the shared
    /// keyword value when `value` is `None`.
    pub fn token(
        kind: SyntaxKind,
        text: &str,
        value: Option<TokenValue>,
        leading: Option<GreenNode>,
        trailing: Option<GreenNode>,
    ) -> Result<GreenNode> {
        if !kind.is_token() {
            return Err(SyntaxError::unexpected_kind("kind", "token kind", kind));
        }
        if text.is_empty() {
            return Err(SyntaxError::InvalidOperation(format!(
                "{kind:?} token requires text"
            )));
        }
        check_trivia("leading", leading.as_ref())?;
        check_trivia("trailing", trailing.as_ref())?;

        let value = match value {
            Some(value) => Some(Arc::new(value)),
            None => TokenValue::keyword_value(kind),
        };

        Ok(GreenNode::new_token(
            kind,
            TokenData {
                text: text.into(),
                value,
                leading,
                trailing,
            },
        ))
    }

    fn token_data(&self) -> Result<&TokenData> {
        match self.body() {
            NodeBody::Token(token) => Ok(token),
            _ => Err(SyntaxError::InvalidOperation(format!(
                "{:?} is not a token",
                self.kind()
            ))),
        }
    }

    /// Copy of this token with different leading trivia.
    pub fn with_leading_trivia(&self, leading: Option<GreenNode>) -> Result<GreenNode> {
        let token = self.token_data()?;
        check_trivia("leading", leading.as_ref())?;
        Ok(GreenNode::new_token(
            self.kind(),
            TokenData {
                leading,
                ..token.clone()
            },
        ))
    }

    /// Copy of this token with different trailing trivia.
    pub fn with_trailing_trivia(&self, trailing: Option<GreenNode>) -> Result<GreenNode> {
        let token = self.token_data()?;
        check_trivia("trailing", trailing.as_ref())?;
        Ok(GreenNode::new_token(
            self.kind(),
            TokenData {
                trailing,
                ..token.clone()
            },
        ))
    }
}
