// RUNTIME PREFERENCES (User Experience)

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to log a warning for every Unknown token
    pub warn_on_unknown_tokens: bool,

    /// Whether to collect per-category token counts
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            warn_on_unknown_tokens: env_or(env_vars::LEXICAL_WARN_UNKNOWN, true),
            collect_detailed_metrics: env_or(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether each applied production is sent to the debug log
    pub log_productions: bool,

    /// Nesting limit for non-terminals; clamped to the compile-time maximum
    pub max_parse_depth: usize,
}

impl SyntaxPreferences {
    /// Depth limit actually enforced by the parser
    pub fn effective_max_parse_depth(&self) -> usize {
        self.max_parse_depth.clamp(1, MAX_PARSE_DEPTH)
    }
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            log_productions: env_or(env_vars::SYNTAX_LOG_PRODUCTIONS, true),
            max_parse_depth: env_or(env_vars::SYNTAX_MAX_PARSE_DEPTH, MAX_PARSE_DEPTH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// What the command-line report contains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    /// List every token before the trace
    pub include_token_listing: bool,

    /// Emit the report as JSON instead of text
    pub json_output: bool,

    /// Show the offending source line under a syntax error
    pub include_source_excerpt: bool,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            include_token_listing: env_or(env_vars::REPORT_TOKENS, false),
            json_output: env_or(env_vars::REPORT_JSON, false),
            include_source_excerpt: env_or(env_vars::REPORT_SOURCE_EXCERPT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
    pub report: ReportPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections and keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.syntax.max_parse_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "syntax.max_parse_depth",
                message: "must be at least 1".to_string(),
            });
        }
        if self.syntax.max_parse_depth > MAX_PARSE_DEPTH {
            return Err(ConfigError::InvalidValue {
                field: "syntax.max_parse_depth",
                message: format!("exceeds compile-time maximum {}", MAX_PARSE_DEPTH),
            });
        }
        Ok(())
    }
}

/// Environment variable names read by the preference defaults
pub mod env_vars {
    pub const LEXICAL_WARN_UNKNOWN: &str = "RAT24F_LEXICAL_WARN_UNKNOWN";
    pub const LEXICAL_DETAILED_METRICS: &str = "RAT24F_LEXICAL_DETAILED_METRICS";
    pub const SYNTAX_LOG_PRODUCTIONS: &str = "RAT24F_SYNTAX_LOG_PRODUCTIONS";
    pub const SYNTAX_MAX_PARSE_DEPTH: &str = "RAT24F_SYNTAX_MAX_PARSE_DEPTH";
    pub const LOGGING_USE_STRUCTURED: &str = "RAT24F_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RAT24F_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RAT24F_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "RAT24F_LOGGING_INCLUDE_FILE_CONTEXT";
    pub const REPORT_TOKENS: &str = "RAT24F_REPORT_TOKENS";
    pub const REPORT_JSON: &str = "RAT24F_REPORT_JSON";
    pub const REPORT_SOURCE_EXCERPT: &str = "RAT24F_REPORT_SOURCE_EXCERPT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("WARN"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [logging]
            min_log_level = "debug"

            [report]
            json_output = true
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(config.report.json_output);
        assert!(config.syntax.max_parse_depth >= 1);
    }

    #[test]
    fn test_depth_above_compile_time_limit_is_rejected() {
        let content = format!("[syntax]\nmax_parse_depth = {}\n", MAX_PARSE_DEPTH + 1);
        let result = RuntimeConfig::from_toml_str(&content);
        assert_matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "syntax.max_parse_depth",
                ..
            })
        );
    }

    #[test]
    fn test_malformed_toml() {
        assert_matches!(
            RuntimeConfig::from_toml_str("[syntax\nmax_parse_depth = 3"),
            Err(ConfigError::Parse(_))
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rat24f.toml");
        std::fs::write(&path, "[syntax]\nmax_parse_depth = 16\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.syntax.max_parse_depth, 16);
        assert_eq!(config.syntax.effective_max_parse_depth(), 16.min(MAX_PARSE_DEPTH));

        assert_matches!(
            RuntimeConfig::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        );
    }
}
