use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;

/// Pipeline processing errors
///
/// A rejected program is not an error here: the syntax error is part of the
/// [`PipelineResult`](super::PipelineResult) trace.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::Configuration(_) => crate::logging::codes::system::INVALID_CONFIGURATION,
            Self::Pipeline { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }
}
