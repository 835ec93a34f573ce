//! Source file reading with compile-time size limits and logging

use crate::config::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("File too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileProcessorError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::InvalidData => Self::InvalidEncoding {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::NotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::NotAFile { .. } => codes::file_processing::NOT_A_FILE,
            Self::TooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::Io { .. } => codes::file_processing::IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}

/// Size and shape of a source file that was read
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// File contents with metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Reads Rat24F sources; any extension is accepted
#[derive(Debug, Clone)]
pub struct FileProcessor {
    /// Log size and timing details on success
    pub enable_performance_logging: bool,
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            enable_performance_logging: true,
        }
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Get the compile-time maximum file size
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a source file after checking that it exists, is a regular file
    /// and fits within [`MAX_FILE_SIZE`].
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let path = path.as_ref();
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => path.display());

        let size = self.validate(path).inspect_err(|error| {
            log_error!(error.error_code(), "Source file rejected",
                "file" => path.display(),
                "error" => error
            );
        })?;

        let source = fs::read_to_string(path)
            .map_err(|error| FileProcessorError::from_io(path, error))
            .inspect_err(|error| {
                log_error!(error.error_code(), "Failed to read source file",
                    "file" => path.display(),
                    "error" => error
                );
            })?;

        let result = FileProcessingResult {
            metadata: FileMetadata {
                path: path.to_path_buf(),
                size,
                line_count: source.lines().count(),
            },
            source,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result);
        Ok(result)
    }

    /// Returns the file size in bytes
    fn validate(&self, path: &Path) -> Result<u64, FileProcessorError> {
        let metadata =
            fs::metadata(path).map_err(|error| FileProcessorError::from_io(path, error))?;

        if !metadata.is_file() {
            return Err(FileProcessorError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let size = metadata.len();
        if size > MAX_FILE_SIZE {
            return Err(FileProcessorError::TooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            });
        }

        Ok(size)
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        let file = result.metadata.path.display();
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "File processed successfully",
                "file" => file,
                "size_bytes" => result.metadata.size
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_reads_source_and_metadata() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "@ integer a;\n@\n").unwrap();

        let result = FileProcessor::new().process_file(file.path()).unwrap();
        assert_eq!(result.source, "@ integer a;\n@\n");
        assert_eq!(result.metadata.size, 15);
        assert_eq!(result.metadata.line_count, 2);
        assert!(!result.metadata.is_large_file());
    }

    #[test]
    fn test_empty_file_is_readable() {
        let file = NamedTempFile::new().unwrap();
        let result = FileProcessor::new().process_file(file.path()).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.char_count(), 0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let error = FileProcessor::new()
            .process_file(dir.path().join("missing.rat"))
            .unwrap_err();

        assert_matches!(error, FileProcessorError::NotFound { .. });
        assert_eq!(error.error_code().as_str(), "E005");
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let error = FileProcessor::new().process_file(dir.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::NotAFile { .. });
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'@', 0xff, 0xfe, b'@']).unwrap();

        let error = FileProcessor::new().process_file(file.path()).unwrap_err();
        assert_matches!(error, FileProcessorError::InvalidEncoding { .. });
        assert_eq!(error.error_code().as_str(), "E010");
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.rat"),
            size: 2048,
            line_count: 1,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }
}
