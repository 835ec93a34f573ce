//! Syntax errors with logging code mapping
//!
//! A parse stops at the first error, so a run produces at most one
//! [`SyntaxError`]. Each error names the non-terminal that was active and the
//! token that could not be accepted.

use crate::grammar::keywords::Keyword;
use crate::grammar::productions::NonTerminal;
use crate::grammar::table;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// A terminal the parser requires at the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any token of this kind
    Kind(TokenKind),
    Keyword(Keyword),
    Operator(&'static str),
    Separator(char),
}

impl Expected {
    /// Token kind a matching token has
    pub fn kind(&self) -> TokenKind {
        match self {
            Expected::Kind(kind) => *kind,
            Expected::Keyword(_) => TokenKind::Keyword,
            Expected::Operator(_) => TokenKind::Operator,
            Expected::Separator(_) => TokenKind::Separator,
        }
    }

    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Expected::Kind(kind) => token.kind == *kind,
            Expected::Keyword(keyword) => token.is_keyword(*keyword),
            Expected::Operator(operator) => token.is_operator(operator),
            Expected::Separator(separator) => token.is_separator(*separator),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(TokenKind::EndMarker) => f.write_str("end of input"),
            Expected::Kind(kind) => write!(f, "{}", kind.as_str().to_lowercase()),
            Expected::Keyword(keyword) => write!(f, "keyword '{}'", keyword),
            Expected::Operator(operator) => write!(f, "operator '{}'", operator),
            Expected::Separator(separator) => write!(f, "separator '{}'", separator),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxError {
    #[error(
        "{nonterminal}: expected {expected} ({expected_kind}), found {found_kind} '{found_lexeme}' at {}",
        .span.start
    )]
    UnexpectedToken {
        nonterminal: NonTerminal,
        expected: String,
        expected_kind: TokenKind,
        found_kind: TokenKind,
        found_lexeme: String,
        span: Span,
    },

    #[error(
        "{nonterminal}: expected {expected}, found {found_kind} '{found_lexeme}' at {}",
        .span.start
    )]
    NoViableAlternative {
        nonterminal: NonTerminal,
        expected: &'static str,
        expected_kinds: &'static [TokenKind],
        found_kind: TokenKind,
        found_lexeme: String,
        span: Span,
    },

    #[error("{nonterminal}: maximum parse depth exceeded at {}", .span.start)]
    MaxRecursionDepth { nonterminal: NonTerminal, span: Span },
}

impl SyntaxError {
    pub fn unexpected_token(nonterminal: NonTerminal, expected: Expected, found: &Token) -> Self {
        Self::UnexpectedToken {
            nonterminal,
            expected: expected.to_string(),
            expected_kind: expected.kind(),
            found_kind: found.kind,
            found_lexeme: found.lexeme.clone(),
            span: found.span,
        }
    }

    pub fn no_viable_alternative(nonterminal: NonTerminal, found: &Token) -> Self {
        Self::NoViableAlternative {
            nonterminal,
            expected: table::expected_description(nonterminal),
            expected_kinds: table::expected_kinds(nonterminal),
            found_kind: found.kind,
            found_lexeme: found.lexeme.clone(),
            span: found.span,
        }
    }

    pub fn max_recursion_depth(nonterminal: NonTerminal, span: Span) -> Self {
        Self::MaxRecursionDepth { nonterminal, span }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::NoViableAlternative { .. } => codes::syntax::NO_VIABLE_ALTERNATIVE,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::NoViableAlternative { span, .. }
            | Self::MaxRecursionDepth { span, .. } => *span,
        }
    }

    /// Source line of the offending token
    pub fn line(&self) -> u32 {
        self.span().line()
    }

    /// Non-terminal whose procedure was active when parsing stopped
    pub fn nonterminal(&self) -> NonTerminal {
        match self {
            Self::UnexpectedToken { nonterminal, .. }
            | Self::NoViableAlternative { nonterminal, .. }
            | Self::MaxRecursionDepth { nonterminal, .. } => *nonterminal,
        }
    }

    pub fn found_kind(&self) -> Option<TokenKind> {
        match self {
            Self::UnexpectedToken { found_kind, .. }
            | Self::NoViableAlternative { found_kind, .. } => Some(*found_kind),
            Self::MaxRecursionDepth { .. } => None,
        }
    }

    pub fn found_lexeme(&self) -> Option<&str> {
        match self {
            Self::UnexpectedToken { found_lexeme, .. }
            | Self::NoViableAlternative { found_lexeme, .. } => Some(found_lexeme),
            Self::MaxRecursionDepth { .. } => None,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn token_at(kind: TokenKind, lexeme: &str, line: u32, column: u32) -> Token {
        let start = Position::new(0, line, column);
        Token::new(kind, lexeme, Span::new(start, start.advance_str(lexeme)))
    }

    #[test]
    fn test_error_code_mapping() {
        let found = token_at(TokenKind::Identifier, "b", 1, 11);

        let unexpected =
            SyntaxError::unexpected_token(NonTerminal::Ids, Expected::Separator(','), &found);
        assert_eq!(unexpected.error_code().as_str(), "E040");

        let no_viable = SyntaxError::no_viable_alternative(NonTerminal::Statement, &found);
        assert_eq!(no_viable.error_code().as_str(), "E041");

        let depth = SyntaxError::max_recursion_depth(NonTerminal::Expression, found.span);
        assert_eq!(depth.error_code().as_str(), "E042");
        assert_eq!(depth.found_kind(), None);
    }

    #[test]
    fn test_unexpected_token_details() {
        let found = token_at(TokenKind::Identifier, "b", 3, 11);
        let error =
            SyntaxError::unexpected_token(NonTerminal::Declaration, Expected::Separator(';'), &found);

        assert_matches!(
            &error,
            SyntaxError::UnexpectedToken { expected_kind: TokenKind::Separator, found_lexeme, .. }
                if found_lexeme == "b"
        );
        assert_eq!(error.line(), 3);
        assert_eq!(error.nonterminal(), NonTerminal::Declaration);
        assert_eq!(error.found_kind(), Some(TokenKind::Identifier));
        assert_eq!(
            error.to_string(),
            "<Declaration>: expected separator ';' (SEPARATOR), found IDENTIFIER 'b' at 3:11"
        );
    }

    #[test]
    fn test_no_viable_alternative_names_first_set() {
        let found = token_at(TokenKind::Keyword, "else", 2, 1);
        let error = SyntaxError::no_viable_alternative(NonTerminal::Relop, &found);

        assert!(error.to_string().contains("relational operator"));
        assert_matches!(
            error,
            SyntaxError::NoViableAlternative { expected_kinds: [TokenKind::Operator], .. }
        );
    }

    #[test]
    fn test_expected_display() {
        assert_eq!(Expected::Kind(TokenKind::Identifier).to_string(), "identifier");
        assert_eq!(Expected::Kind(TokenKind::EndMarker).to_string(), "end of input");
        assert_eq!(Expected::Keyword(Keyword::Fi).to_string(), "keyword 'fi'");
        assert_eq!(Expected::Operator("=").to_string(), "operator '='");
        assert_eq!(Expected::Kind(TokenKind::Integer).kind(), TokenKind::Integer);
        assert_eq!(Expected::Separator('@').kind(), TokenKind::Separator);
    }

    #[test]
    fn test_error_serializes_with_kind_tag() {
        let found = token_at(TokenKind::Separator, "@", 1, 1);
        let error = SyntaxError::no_viable_alternative(NonTerminal::Primary, &found);
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], "no_viable_alternative");
        assert_eq!(json["found_lexeme"], "@");
        assert_eq!(json["span"]["start"]["line"], 1);
    }
}
