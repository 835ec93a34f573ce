//! Syntax analysis: token stream to parse trace
//!
//! The parser validates the stream against the Rat24F grammar and records the
//! productions it applied. It never builds a tree; the trace is the output.

pub mod error;
pub mod parser;
pub mod trace;

pub use error::{Expected, SyntaxError, SyntaxResult};
pub use parser::Parser;
pub use trace::{ParseTrace, TraceEntry};

use crate::config::runtime::SyntaxPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::log_debug;

/// Parse a token stream with default preferences
pub fn parse(tokens: TokenStream) -> ParseTrace {
    parse_with_preferences(tokens, SyntaxPreferences::default())
}

pub fn parse_with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> ParseTrace {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());
    let trace = Parser::with_preferences(tokens, preferences).parse();
    log_debug!("Syntax analysis finished",
        "accepted" => trace.is_accepted(),
        "entries" => trace.len()
    );
    trace
}

pub fn create_parser(tokens: TokenStream) -> Parser {
    Parser::new(tokens)
}

/// Check that every syntax error code is registered (for system startup)
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::syntax::NO_VIABLE_ALTERNATIVE,
        codes::syntax::MAX_RECURSION_DEPTH,
    ];

    for code in &syntax_codes {
        if !codes::requires_halt(code.as_str()) {
            return Err(format!(
                "Syntax code {} must halt parsing but is not registered as halting",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;

    #[test]
    fn test_parse_is_independent_per_run() {
        let first = parse(tokenize("@ a = 1; @"));
        let second = parse(tokenize("@ a = ; @"));
        let third = parse(tokenize("@ a = 1; @"));

        assert!(first.is_accepted());
        assert!(!second.is_accepted());
        assert_eq!(first, third);
    }

    #[test]
    fn test_every_trace_is_finished_once() {
        for source in ["", "@", "@ @", "@ @ @", "function", "@ { { } @", "@ put(1) @"] {
            let trace = parse(tokenize(source));
            let terminal = trace.entries().iter().filter(|e| e.is_terminal()).count();
            assert_eq!(terminal, 1, "input {source:?}");
            assert!(trace.is_finished());
        }
    }

    #[test]
    fn test_syntax_codes_registered() {
        assert!(init_syntax_logging().is_ok());
    }
}
