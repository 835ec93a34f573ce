//! Append-only record of a parse
//!
//! Productions and matched tokens are interleaved in the order the parser
//! applied them. A finished trace ends with exactly one [`TraceEntry::Accepted`]
//! or [`TraceEntry::Rejected`].

use crate::grammar::productions::Production;
use crate::syntax::error::SyntaxError;
use crate::tokens::Token;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry", content = "value", rename_all = "snake_case")]
pub enum TraceEntry {
    Production(Production),
    Matched(Token),
    Accepted,
    Rejected(SyntaxError),
}

impl TraceEntry {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TraceEntry::Accepted | TraceEntry::Rejected(_))
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEntry::Production(production) => write!(f, "{}", production),
            TraceEntry::Matched(token) => write!(f, "{}", token),
            TraceEntry::Accepted => f.write_str("Parse complete: input accepted"),
            TraceEntry::Rejected(error) => write!(f, "Parsing Error: {}", error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParseTrace {
    entries: Vec<TraceEntry>,
}

impl ParseTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_production(&mut self, production: Production) {
        self.entries.push(TraceEntry::Production(production));
    }

    pub(crate) fn record_match(&mut self, token: Token) {
        self.entries.push(TraceEntry::Matched(token));
    }

    pub(crate) fn finish(&mut self, outcome: Result<(), SyntaxError>) {
        debug_assert!(!self.is_finished(), "trace finished twice");
        self.entries.push(match outcome {
            Ok(()) => TraceEntry::Accepted,
            Err(error) => TraceEntry::Rejected(error),
        });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.entries.last().is_some_and(TraceEntry::is_terminal)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.entries.last(), Some(TraceEntry::Accepted))
    }

    /// The syntax error that ended the parse, if it was rejected
    pub fn error(&self) -> Option<&SyntaxError> {
        match self.entries.last() {
            Some(TraceEntry::Rejected(error)) => Some(error),
            _ => None,
        }
    }

    /// Applied productions in order
    pub fn productions(&self) -> impl Iterator<Item = Production> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TraceEntry::Production(production) => Some(*production),
            _ => None,
        })
    }

    /// Matched tokens in order
    pub fn matched(&self) -> impl Iterator<Item = &Token> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TraceEntry::Matched(token) => Some(token),
            _ => None,
        })
    }
}

/// One entry per line
impl fmt::Display for ParseTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::productions::NonTerminal;
    use crate::tokens::TokenKind;
    use crate::utils::{Position, Span};

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        let start = Position::start();
        Token::new(kind, lexeme, Span::new(start, start.advance_str(lexeme)))
    }

    #[test]
    fn test_accepted_trace() {
        let mut trace = ParseTrace::new();
        trace.record_production(Production::Ids);
        trace.record_match(token(TokenKind::Identifier, "a"));
        assert!(!trace.is_finished());

        trace.finish(Ok(()));
        assert!(trace.is_finished());
        assert!(trace.is_accepted());
        assert!(trace.error().is_none());
        assert_eq!(trace.productions().collect::<Vec<_>>(), vec![Production::Ids]);
        assert_eq!(trace.matched().count(), 1);
        assert_eq!(
            trace.to_string(),
            "<IDs> -> <Identifier> {, <Identifier>}\n\
             Token: IDENTIFIER Lexeme: a\n\
             Parse complete: input accepted\n"
        );
    }

    #[test]
    fn test_rejected_trace() {
        let mut trace = ParseTrace::new();
        let found = token(TokenKind::Separator, "@");
        trace.finish(Err(SyntaxError::no_viable_alternative(
            NonTerminal::Statement,
            &found,
        )));

        assert!(!trace.is_accepted());
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.error().map(|e| e.nonterminal()), Some(NonTerminal::Statement));
        assert!(trace.to_string().starts_with("Parsing Error: <Statement>"));
    }

    #[test]
    fn test_trace_json_shape() {
        let mut trace = ParseTrace::new();
        trace.record_production(Production::Empty);
        trace.record_match(token(TokenKind::Integer, "7"));
        trace.finish(Ok(()));

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json[0]["entry"], "production");
        assert_eq!(json[0]["value"], "<Empty> -> ε");
        assert_eq!(json[1]["entry"], "matched");
        assert_eq!(json[1]["value"]["kind"], "INTEGER");
        assert_eq!(json[2]["entry"], "accepted");
    }
}
