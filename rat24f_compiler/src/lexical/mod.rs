//! Lexical analysis for Rat24F source text
//!
//! Tokenization is total: every input produces a token stream ending in a
//! single EndMarker, with unrecognized characters carried as Unknown tokens.

pub mod analyzer;
mod cursor;

use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics};

/// Tokenize `source` with default preferences
pub fn tokenize(source: &str) -> TokenStream {
    LexicalAnalyzer::new().tokenize(source)
}

/// Tokenize `source` with custom runtime preferences
pub fn tokenize_with_preferences(source: &str, preferences: LexicalPreferences) -> TokenStream {
    LexicalAnalyzer::with_preferences(preferences).tokenize(source)
}

pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

/// Check that every lexical warning code is registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::UNKNOWN_CHARACTER,
        codes::lexical::INVALID_OPERATOR_PAIR,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}
