//! Node kinds
//!
//! Tokens, trivia and grammar productions share one closed enumeration
//! (ISO 32000-1 Sections 7.2, 7.3 and 7.5).

/// Kind of a green node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    /// Variable-arity child list (never a grammar production)
    List = 0,

    // Trivia
    /// Blanks, tabs, form feeds and NUL bytes
    WhitespaceTrivia,
    /// `\n`, `\r` or `\r\n`
    EndOfLineTrivia,
    /// `%` up to the end of the line
    CommentTrivia,

    // Punctuation
    /// `[`
    OpenBracketToken,
    /// `]`
    CloseBracketToken,
    /// `<<`
    LessThanLessThanToken,
    /// `>>`
    GreaterThanGreaterThanToken,

    // Keywords
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ObjKeyword,
    EndObjKeyword,
    /// `R` of an indirect reference
    ReferenceKeyword,
    XRefKeyword,
    TrailerKeyword,
    StartXRefKeyword,
    /// `n` type of a cross-reference record
    InUseEntryKeyword,
    /// `f` type of a cross-reference record
    FreeEntryKeyword,

    // Literal tokens
    NumericLiteralToken,
    /// `(...)`
    StringLiteralToken,
    /// `<...>`
    HexStringLiteralToken,
    /// `/Name`
    NameToken,

    // Expressions
    TrueLiteralExpression,
    FalseLiteralExpression,
    NullLiteralExpression,
    NumericLiteralExpression,
    StringLiteralExpression,
    NameLiteralExpression,
    IndirectReferenceExpression,
    ArrayExpression,
    DictionaryExpression,

    // Structure
    ArrayElement,
    DictionaryElement,
    IndirectObjectHeader,
    IndirectObject,
    XRefEntryExpression,
    XRefSubSectionExpression,
    XRefSectionExpression,
    FileTrailer,
}

impl SyntaxKind {
    pub fn is_list(self) -> bool {
        self == SyntaxKind::List
    }

    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WhitespaceTrivia | SyntaxKind::EndOfLineTrivia | SyntaxKind::CommentTrivia
        )
    }

    pub fn is_keyword(self) -> bool {
        (SyntaxKind::TrueKeyword as u16..=SyntaxKind::FreeEntryKeyword as u16)
            .contains(&(self as u16))
    }

    pub fn is_punctuation(self) -> bool {
        (SyntaxKind::OpenBracketToken as u16..=SyntaxKind::GreaterThanGreaterThanToken as u16)
            .contains(&(self as u16))
    }

    /// Tokens are the leaves that carry significant text.
    pub fn is_token(self) -> bool {
        (SyntaxKind::OpenBracketToken as u16..=SyntaxKind::NameToken as u16)
            .contains(&(self as u16))
    }

    pub fn is_literal_expression(self) -> bool {
        (SyntaxKind::TrueLiteralExpression as u16..=SyntaxKind::NameLiteralExpression as u16)
            .contains(&(self as u16))
    }

    /// Kinds that may stand as a value: array elements, dictionary values,
    /// indirect object content.
    pub fn is_expression(self) -> bool {
        (SyntaxKind::TrueLiteralExpression as u16..=SyntaxKind::DictionaryExpression as u16)
            .contains(&(self as u16))
    }

    /// Whether `token` is a lexical counterpart of this literal expression kind.
    pub fn accepts_literal_token(self, token: SyntaxKind) -> bool {
        matches!(
            (self, token),
            (SyntaxKind::TrueLiteralExpression, SyntaxKind::TrueKeyword)
                | (SyntaxKind::FalseLiteralExpression, SyntaxKind::FalseKeyword)
                | (SyntaxKind::NullLiteralExpression, SyntaxKind::NullKeyword)
                | (
                    SyntaxKind::NumericLiteralExpression,
                    SyntaxKind::NumericLiteralToken
                )
                | (
                    SyntaxKind::StringLiteralExpression,
                    SyntaxKind::StringLiteralToken | SyntaxKind::HexStringLiteralToken
                )
                | (SyntaxKind::NameLiteralExpression, SyntaxKind::NameToken)
        )
    }

    /// Literal expression kind a token kind maps to, if any.
    pub fn literal_expression_for(token: SyntaxKind) -> Option<SyntaxKind> {
        match token {
            SyntaxKind::TrueKeyword => Some(SyntaxKind::TrueLiteralExpression),
            SyntaxKind::FalseKeyword => Some(SyntaxKind::FalseLiteralExpression),
            SyntaxKind::NullKeyword => Some(SyntaxKind::NullLiteralExpression),
            SyntaxKind::NumericLiteralToken => Some(SyntaxKind::NumericLiteralExpression),
            SyntaxKind::StringLiteralToken | SyntaxKind::HexStringLiteralToken => {
                Some(SyntaxKind::StringLiteralExpression)
            }
            SyntaxKind::NameToken => Some(SyntaxKind::NameLiteralExpression),
            _ => None,
        }
    }

    /// Fixed text of punctuation and keyword kinds.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::NullKeyword => "null",
            SyntaxKind::ObjKeyword => "obj",
            SyntaxKind::EndObjKeyword => "endobj",
            SyntaxKind::ReferenceKeyword => "R",
            SyntaxKind::XRefKeyword => "xref",
            SyntaxKind::TrailerKeyword => "trailer",
            SyntaxKind::StartXRefKeyword => "startxref",
            SyntaxKind::InUseEntryKeyword => "n",
            SyntaxKind::FreeEntryKeyword => "f",
            _ => return None,
        };
        Some(text)
    }

    /// Keyword kind spelled by `text`.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "null" => SyntaxKind::NullKeyword,
            "obj" => SyntaxKind::ObjKeyword,
            "endobj" => SyntaxKind::EndObjKeyword,
            "R" => SyntaxKind::ReferenceKeyword,
            "xref" => SyntaxKind::XRefKeyword,
            "trailer" => SyntaxKind::TrailerKeyword,
            "startxref" => SyntaxKind::StartXRefKeyword,
            "n" => SyntaxKind::InUseEntryKeyword,
            "f" => SyntaxKind::FreeEntryKeyword,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_disjoint() {
        let kinds = [
            SyntaxKind::List,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::CommentTrivia,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::NameToken,
            SyntaxKind::TrueKeyword,
            SyntaxKind::NameLiteralExpression,
            SyntaxKind::ArrayElement,
            SyntaxKind::FileTrailer,
        ];
        for kind in kinds {
            let categories = [kind.is_list(), kind.is_trivia(), kind.is_token()]
                .iter()
                .filter(|b| **b)
                .count();
            assert!(categories <= 1, "{kind:?} is in more than one category");
        }
    }

    #[test]
    fn test_keywords_are_tokens() {
        assert!(SyntaxKind::ObjKeyword.is_keyword());
        assert!(SyntaxKind::ObjKeyword.is_token());
        assert!(SyntaxKind::FreeEntryKeyword.is_keyword());
        assert!(!SyntaxKind::NumericLiteralToken.is_keyword());
        assert!(!SyntaxKind::OpenBracketToken.is_keyword());
        assert!(SyntaxKind::OpenBracketToken.is_punctuation());
    }

    #[test]
    fn test_expression_kinds() {
        assert!(SyntaxKind::TrueLiteralExpression.is_expression());
        assert!(SyntaxKind::IndirectReferenceExpression.is_expression());
        assert!(SyntaxKind::DictionaryExpression.is_expression());
        assert!(!SyntaxKind::ArrayElement.is_expression());
        assert!(!SyntaxKind::IndirectReferenceExpression.is_literal_expression());
        assert!(!SyntaxKind::NumericLiteralToken.is_expression());
    }

    #[test]
    fn test_literal_token_mapping() {
        assert!(SyntaxKind::NumericLiteralExpression.accepts_literal_token(SyntaxKind::NumericLiteralToken));
        assert!(SyntaxKind::StringLiteralExpression.accepts_literal_token(SyntaxKind::HexStringLiteralToken));
        assert!(!SyntaxKind::TrueLiteralExpression.accepts_literal_token(SyntaxKind::FalseKeyword));
        assert_eq!(
            SyntaxKind::literal_expression_for(SyntaxKind::NameToken),
            Some(SyntaxKind::NameLiteralExpression)
        );
        assert_eq!(SyntaxKind::literal_expression_for(SyntaxKind::ObjKeyword), None);
    }

    #[test]
    fn test_keyword_text_roundtrip() {
        for kind in [
            SyntaxKind::TrueKeyword,
            SyntaxKind::EndObjKeyword,
            SyntaxKind::ReferenceKeyword,
            SyntaxKind::StartXRefKeyword,
            SyntaxKind::InUseEntryKeyword,
        ] {
            let text = kind.fixed_text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
        }
        assert_eq!(SyntaxKind::from_keyword("endstream"), None);
        assert_eq!(SyntaxKind::NumericLiteralToken.fixed_text(), None);
    }
}
