use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::syntax::{ParseTrace, SyntaxError};
use crate::tokens::Token;
use std::time::Duration;

/// Everything one lexer + parser run produced for a single source
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
    pub source: String,
    pub tokens: Vec<Token>,
    pub lexical_metrics: LexicalMetrics,
    pub trace: ParseTrace,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn is_accepted(&self) -> bool {
        self.trace.is_accepted()
    }

    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        self.trace.error()
    }

    /// Token count, end marker included
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn log_completion(&self, file_path: &str) {
        let duration_ms = format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0);

        if self.is_accepted() {
            crate::log_success!(
                crate::logging::codes::success::FILE_PROCESSING_SUCCESS,
                "Rat24F source accepted",
                "file" => file_path,
                "tokens" => self.token_count(),
                "trace_entries" => self.trace.len(),
                "duration_ms" => duration_ms
            );
        } else {
            crate::log_info!("Rat24F source rejected",
                "file" => file_path,
                "tokens" => self.token_count(),
                "line" => self.syntax_error().map(SyntaxError::line).unwrap_or_default(),
                "duration_ms" => duration_ms
            );
        }
    }
}
