//! Error, warning and success codes with their classification metadata
//!
//! Every event logged by the compiler carries one of these codes. The
//! registry below is the single place where a code's category, severity and
//! recommended action are defined.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const INVALID_CONFIGURATION: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const NOT_A_FILE: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
}

/// Lexical diagnostics; the lexer never fails, so these are warnings
pub mod lexical {
    use super::Code;

    pub const UNKNOWN_CHARACTER: Code = Code::new("W020");
    pub const INVALID_OPERATOR_PAIR: Code = Code::new("W021");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E040");
    pub const NO_VIABLE_ALTERNATIVE: Code = Code::new("E041");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E042");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_ACCEPTED: Code = Code::new("I040");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTERED: &[ErrorMetadata] = &[
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check logging configuration and environment variables",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Invalid runtime configuration",
        "Fix the configuration file or RAT24F_* environment variables",
    ),
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Source file not found",
        "Verify the path and that the file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Path is not a regular file",
        "Pass a source file rather than a directory",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Source file exceeds the configured size limit",
        "Split the program or raise max_file_size in the build profile",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Permission denied reading source file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Source file is not valid UTF-8",
        "Re-encode the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "I/O error while reading source file",
        "Retry, or check the underlying device",
    ),
    ErrorMetadata::new(
        "W020",
        "LexicalAnalysis",
        Severity::Low,
        true,
        false,
        "Character is not part of any Rat24F token",
        "Remove the character or replace it with a valid symbol",
    ),
    ErrorMetadata::new(
        "W021",
        "LexicalAnalysis",
        Severity::Low,
        true,
        false,
        "Two-character operator is not a Rat24F operator",
        "Use one of <= >= == !=",
    ),
    ErrorMetadata::new(
        "E040",
        "SyntaxAnalysis",
        Severity::High,
        false,
        true,
        "Token does not match the terminal the grammar requires",
        "Insert or correct the expected token at the reported location",
    ),
    ErrorMetadata::new(
        "E041",
        "SyntaxAnalysis",
        Severity::High,
        false,
        true,
        "No production of the non-terminal starts with this token",
        "Check the construct against the Rat24F grammar",
    ),
    ErrorMetadata::new(
        "E042",
        "SyntaxAnalysis",
        Severity::High,
        false,
        true,
        "Program nesting exceeds the parser depth limit",
        "Reduce nesting or raise max_parse_depth",
    ),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(false)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    match get_error_metadata(code) {
        Some(metadata) => metadata.category,
        None if code.starts_with('I') => "Success",
        None => "Unknown",
    }
}
