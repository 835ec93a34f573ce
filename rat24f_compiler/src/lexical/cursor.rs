//! Character cursor over an immutable source buffer

use crate::utils::Position;
use std::iter::Peekable;
use std::str::CharIndices;

/// Reads characters front to back while tracking line and column.
/// Only the lexer owns one; nothing outside this module sees the offset.
pub(crate) struct Cursor<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: Position::start(),
        }
    }

    pub(crate) fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.position = self.position.advance(ch);
        Some(ch)
    }

    /// Consume `expected` if it is next
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Text consumed since `start`
    pub(crate) fn slice_from(&self, start: Position) -> &'a str {
        &self.source[start.offset..self.position.offset]
    }
}
