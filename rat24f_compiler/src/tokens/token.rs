//! Token value type produced by the lexer

use crate::grammar::keywords::Keyword;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Integer,
    Real,
    Operator,
    Separator,
    EndMarker,
    Unknown,
}

impl TokenKind {
    /// Upper-case name used in token listings and traces
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Real => "REAL",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::EndMarker => "END_MARKER",
            TokenKind::Unknown => "UNKNOWN",
        }
    }

    pub const fn all() -> &'static [TokenKind] {
        &[
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::Operator,
            TokenKind::Separator,
            TokenKind::EndMarker,
            TokenKind::Unknown,
        ]
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable token: kind, exact matched text, and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// End-of-input sentinel at `span`
    pub fn end_marker(span: Span) -> Self {
        Self::new(TokenKind::EndMarker, "", span)
    }

    pub fn is_end_marker(&self) -> bool {
        self.kind == TokenKind::EndMarker
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword.as_str()
    }

    /// The reserved word this token spells, if it is a Keyword token
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.lexeme),
            _ => None,
        }
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == operator
    }

    pub fn is_separator(&self, separator: char) -> bool {
        self.kind == TokenKind::Separator && self.lexeme.chars().eq(std::iter::once(separator))
    }

    /// Line the token starts on
    pub fn line(&self) -> u32 {
        self.span.line()
    }

    /// Lexeme for diagnostics; the end marker has no text of its own
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndMarker => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// `Token: <KIND> Lexeme: <lexeme>`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token: {} Lexeme: {}", self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn span() -> Span {
        Span::empty_at(Position::start())
    }

    #[test]
    fn test_keyword_queries() {
        let token = Token::new(TokenKind::Keyword, "while", span());
        assert!(token.is_keyword(Keyword::While));
        assert!(!token.is_keyword(Keyword::If));
        assert_eq!(token.keyword(), Some(Keyword::While));

        let ident = Token::new(TokenKind::Identifier, "while_", span());
        assert_eq!(ident.keyword(), None);
    }

    #[test]
    fn test_operator_and_separator_queries() {
        let le = Token::new(TokenKind::Operator, "<=", span());
        assert!(le.is_operator("<="));
        assert!(!le.is_operator("<"));

        let at = Token::new(TokenKind::Separator, "@", span());
        assert!(at.is_separator('@'));
        assert!(!at.is_separator('('));

        // Same text but not a separator token
        let unknown = Token::new(TokenKind::Unknown, "@", span());
        assert!(!unknown.is_separator('@'));
    }

    #[test]
    fn test_display_matches_listing_format() {
        let token = Token::new(TokenKind::Identifier, "count", span());
        assert_eq!(token.to_string(), "Token: IDENTIFIER Lexeme: count");
        assert_eq!(Token::end_marker(span()).describe(), "end of input");
    }

    #[test]
    fn test_kind_serializes_in_listing_case() {
        let json = serde_json::to_string(&TokenKind::EndMarker).unwrap();
        assert_eq!(json, "\"END_MARKER\"");
    }
}
