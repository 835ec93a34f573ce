//! Forward-only cursor over a lexed token sequence

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, Span};

/// Token sequence with a private read cursor.
///
/// The stream always ends with exactly one EndMarker. The cursor only moves
/// forward and stops on the EndMarker, so `current()` is always valid.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    /// Wrap a token sequence, appending an EndMarker if it lacks one
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_end_marker) {
            let at = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or_else(Position::start);
            tokens.push(Token::end_marker(Span::empty_at(at)));
        }

        Self {
            tokens,
            position: 0,
        }
    }

    /// The lookahead token
    pub fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Consume the lookahead and return it; the EndMarker is never passed
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_end_marker()
    }

    /// Number of tokens, EndMarker included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: the EndMarker is always present
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The whole sequence in source order, independent of the cursor
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|token| token.kind == kind).count()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }
}
