//! Finite-state lexical analyzer for Rat24F
//!
//! One scanner per character class, chosen by the first character of the
//! next lexeme. Every branch consumes at least one character, and no input
//! makes the lexer fail: characters that fit no category become Unknown
//! tokens for the parser to reject.

use super::cursor::Cursor;
use crate::config::runtime::LexicalPreferences;
use crate::grammar::keywords::is_reserved_keyword;
use crate::grammar::symbols;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;

/// Token counts gathered during one tokenization
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub integer_tokens: usize,
    pub real_tokens: usize,
    pub operator_tokens: usize,
    pub separator_tokens: usize,
    pub unknown_tokens: usize,
    pub whitespace_chars: usize,
    pub line_count: u32,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        // Unknown tokens are always counted; they decide whether a warning
        // summary is logged.
        if token.kind == TokenKind::Unknown {
            self.unknown_tokens += 1;
        }

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.kind {
            TokenKind::Keyword => self.keyword_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Integer => self.integer_tokens += 1,
            TokenKind::Real => self.real_tokens += 1,
            TokenKind::Operator => self.operator_tokens += 1,
            TokenKind::Separator => self.separator_tokens += 1,
            TokenKind::EndMarker | TokenKind::Unknown => {}
        }
    }

    pub(crate) fn record_whitespace(&mut self) {
        self.whitespace_chars += 1;
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Metrics of the most recent [`tokenize`](Self::tokenize) call
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Convert `source` into a token stream terminated by one EndMarker
    pub fn tokenize(&mut self, source: &str) -> TokenStream {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "char_count" => source.chars().count(),
            "byte_count" => source.len()
        );

        let mut cursor = Cursor::new(source);
        let mut tokens = Vec::new();

        while let Some(ch) = cursor.peek() {
            if ch.is_whitespace() {
                cursor.bump();
                self.metrics.record_whitespace();
                continue;
            }

            let token = if ch.is_ascii_alphabetic() || ch == '_' {
                self.scan_word(&mut cursor)
            } else if ch.is_ascii_digit() {
                self.scan_number(&mut cursor)
            } else if symbols::is_operator_lead(ch) {
                self.scan_operator(&mut cursor)
            } else if symbols::is_separator(ch) {
                self.scan_single(&mut cursor, TokenKind::Separator)
            } else {
                self.scan_single(&mut cursor, TokenKind::Unknown)
            };

            if token.kind == TokenKind::Unknown {
                self.report_unknown(&token);
            }

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(token);
        }

        let end = cursor.position();
        tokens.push(Token::end_marker(Span::empty_at(end)));
        self.metrics.line_count = end.line;

        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => self.metrics.total_tokens,
            "unknown_tokens" => self.metrics.unknown_tokens,
            "lines" => self.metrics.line_count
        );

        TokenStream::new(tokens)
    }

    /// Identifier scanner: letter or `_`, then letters, digits and `_`
    fn scan_word(&self, cursor: &mut Cursor<'_>) -> Token {
        let start = cursor.position();
        cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let lexeme = cursor.slice_from(start);

        let kind = if is_reserved_keyword(lexeme) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, lexeme, Span::new(start, cursor.position()))
    }

    /// Number scanner: digits, optionally `.` and more digits. A trailing
    /// `.` with no digits after it still makes a Real.
    fn scan_number(&self, cursor: &mut Cursor<'_>) -> Token {
        let start = cursor.position();
        cursor.eat_while(|c| c.is_ascii_digit());

        let kind = if cursor.eat('.') {
            cursor.eat_while(|c| c.is_ascii_digit());
            TokenKind::Real
        } else {
            TokenKind::Integer
        };
        Token::new(kind, cursor.slice_from(start), Span::new(start, cursor.position()))
    }

    /// Operator scanner with maximal munch on a trailing `=`
    fn scan_operator(&self, cursor: &mut Cursor<'_>) -> Token {
        let start = cursor.position();
        cursor.bump();
        cursor.eat('=');
        let lexeme = cursor.slice_from(start);

        let kind = if symbols::is_operator(lexeme) {
            TokenKind::Operator
        } else {
            TokenKind::Unknown
        };
        Token::new(kind, lexeme, Span::new(start, cursor.position()))
    }

    fn scan_single(&self, cursor: &mut Cursor<'_>, kind: TokenKind) -> Token {
        let start = cursor.position();
        cursor.bump();
        Token::new(kind, cursor.slice_from(start), Span::new(start, cursor.position()))
    }

    fn report_unknown(&self, token: &Token) {
        if !self.preferences.warn_on_unknown_tokens {
            return;
        }

        let code = if token.lexeme.chars().count() > 1 {
            codes::lexical::INVALID_OPERATOR_PAIR
        } else {
            codes::lexical::UNKNOWN_CHARACTER
        };

        log_warning!(code = code, "Unrecognized lexeme",
            span = token.span,
            "lexeme" => token.lexeme.as_str(),
            "line" => token.line()
        );
    }
}
