//! Reading Rat24F source files from disk

mod processor;

use std::path::Path;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(path: impl AsRef<Path>) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(path)
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    FileProcessor::max_file_size()
}
