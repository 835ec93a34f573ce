//! Lexer and parser wired together over a string or a file

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::{render_text, PipelineOutput};
pub use result::PipelineResult;

use crate::config::runtime::RuntimeConfig;
use crate::lexical::LexicalAnalyzer;
use crate::logging::{self, codes};
use crate::syntax;
use std::path::Path;
use std::time::Instant;

/// Tokenize and parse `source` with default preferences
pub fn analyze_source(source: &str) -> PipelineResult {
    analyze_source_with_config(source, &RuntimeConfig::default())
}

pub fn analyze_source_with_config(source: &str, config: &RuntimeConfig) -> PipelineResult {
    let start_time = Instant::now();

    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let tokens = analyzer.tokenize(source);
    let token_listing = tokens.tokens().to_vec();
    let trace = syntax::parse_with_preferences(tokens, config.syntax.clone());

    PipelineResult {
        file_metadata: None,
        source: source.to_string(),
        tokens: token_listing,
        lexical_metrics: analyzer.metrics().clone(),
        trace,
        processing_duration: start_time.elapsed(),
    }
}

/// Read a file and run it through the lexer and parser
pub fn process_file(path: impl AsRef<Path>) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(path, &RuntimeConfig::default(), 0)
}

/// `file_id` tags log events of this file when several inputs are processed
pub fn process_file_with_config(
    path: impl AsRef<Path>,
    config: &RuntimeConfig,
    file_id: usize,
) -> Result<PipelineResult, PipelineError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    logging::with_file_context(path.to_path_buf(), file_id, || {
        crate::log_info!("Starting Rat24F processing", "file" => display);

        let file_result = crate::file_processor::process_file(path)?;
        let mut result = analyze_source_with_config(&file_result.source, config);
        result.processing_duration += file_result.processing_duration;
        result.file_metadata = Some(file_result.metadata);

        result.log_completion(&display);
        Ok(result)
    })
}

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;
    logging::config::validate_config()?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processor::FileProcessorError;
    use crate::logging::{self, codes, LogLevel, LoggingService, MemoryLogger};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::io::Write;
    use std::sync::{Arc, OnceLock};
    use tempfile::NamedTempFile;

    #[test]
    fn test_analyze_accepted_source() {
        let result = analyze_source("function f ( integer x ) { return x; } @ integer a; @");

        assert!(result.is_accepted());
        assert!(result.syntax_error().is_none());
        assert_eq!(result.tokens.last().map(|t| t.kind), Some(TokenKind::EndMarker));
        assert_eq!(result.token_count(), result.lexical_metrics.total_tokens + 1);
        assert!(result.file_metadata.is_none());
    }

    #[test]
    fn test_analyze_rejected_source_keeps_tokens() {
        let result = analyze_source("@ a = $; @");

        assert!(!result.is_accepted());
        assert_eq!(result.lexical_metrics.unknown_tokens, 1);
        assert_eq!(
            result.syntax_error().and_then(|e| e.found_kind()),
            Some(TokenKind::Unknown)
        );
    }

    #[test]
    fn test_process_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "@ integer i;").unwrap();
        writeln!(file, "while (i < 10) i = i + 1;").unwrap();
        writeln!(file, "@").unwrap();

        let result = process_file(file.path()).unwrap();
        assert!(result.is_accepted());
        assert_eq!(result.file_metadata.map(|m| m.line_count), Some(3));
    }

    #[test]
    fn test_process_missing_file() {
        let error = process_file("/definitely/not/here.rat").unwrap_err();
        assert_matches!(
            error,
            PipelineError::FileProcessing(FileProcessorError::NotFound { .. })
        );
        assert_eq!(error.error_code().as_str(), "E005");
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }

    /// The global logger can be installed once per process, so every test
    /// that inspects emitted events shares this one
    fn memory_logger() -> &'static Arc<MemoryLogger> {
        static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
        MEMORY.get_or_init(|| {
            let memory = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(memory.clone(), LogLevel::Info);
            logging::init_global_logging_with_service(Arc::new(service))
                .expect("no other test installs a global logger");
            memory
        })
    }

    #[test]
    fn test_lexer_and_parser_log_their_codes() {
        let memory = memory_logger();

        let rejected = analyze_source("@ a = $; @");
        assert!(!rejected.is_accepted());
        assert!(memory.has_event_with_code(codes::lexical::UNKNOWN_CHARACTER));

        let error_code = rejected.syntax_error().map(|e| e.error_code());
        assert_matches!(
            error_code,
            Some(code) if code == codes::syntax::UNEXPECTED_TOKEN
                || code == codes::syntax::NO_VIABLE_ALTERNATIVE
        );
        assert!(error_code.is_some_and(|code| memory.has_event_with_code(code)));

        let invalid_pair = analyze_source("@ a = +=; @");
        assert!(!invalid_pair.is_accepted());
        assert!(memory.has_event_with_code(codes::lexical::INVALID_OPERATOR_PAIR));

        let accepted = analyze_source("@ @");
        assert!(accepted.is_accepted());
        assert!(memory.has_event_with_code(codes::success::PARSE_ACCEPTED));
    }
}
