//! Report rendering for the command-line driver

use crate::config::runtime::ReportPreferences;
use crate::pipeline::result::PipelineResult;
use crate::syntax::{ParseTrace, SyntaxError};
use crate::tokens::Token;
use crate::utils::SourceMap;
use serde::Serialize;
use std::fmt::Write;

/// JSON form of one processed input
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub file: &'a str,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<&'a [Token]>,
    pub trace: &'a ParseTrace,
    pub error: Option<&'a SyntaxError>,
}

impl<'a> PipelineOutput<'a> {
    pub fn new(file: &'a str, result: &'a PipelineResult, preferences: &ReportPreferences) -> Self {
        Self {
            file,
            accepted: result.is_accepted(),
            tokens: preferences
                .include_token_listing
                .then_some(result.tokens.as_slice()),
            trace: &result.trace,
            error: result.syntax_error(),
        }
    }
}

/// Text report: header, optional token listing, then the trace. A rejected
/// trace ends with its `Parsing Error:` line, optionally followed by the
/// offending source line.
pub fn render_text(file: &str, result: &PipelineResult, preferences: &ReportPreferences) -> String {
    let mut report = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(report, "Processing file: {}", file);

    if preferences.include_token_listing {
        let _ = writeln!(report, "\nTokens:");
        for token in &result.tokens {
            let _ = writeln!(report, "{}", token);
        }
        let _ = writeln!(report);
    }

    let _ = write!(report, "{}", result.trace);

    if let Some(error) = result.syntax_error() {
        if preferences.include_source_excerpt {
            let source_map = SourceMap::new(result.source.as_str());
            let _ = write!(
                report,
                "{}",
                source_map.format_error(&error.span(), &error.to_string())
            );
        }
    }

    report
}
