// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPreferences {
    /// Whether number terminals expand into integer/fraction/digit trace entries
    pub detailed_trace: bool,

    /// Whether the report orders diagnostics by start offset
    pub sort_diagnostics: bool,

    /// Whether every diagnostic is also forwarded to the global logger
    pub log_diagnostics: bool,
}

impl Default for AnalysisPreferences {
    fn default() -> Self {
        Self {
            detailed_trace: env::var(env_vars::ANALYSIS_DETAILED_TRACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            sort_diagnostics: env::var(env_vars::ANALYSIS_SORT_DIAGNOSTICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_diagnostics: env::var(env_vars::ANALYSIS_LOG_DIAGNOSTICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within security constraints)
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Analysis
    pub const ANALYSIS_DETAILED_TRACE: &str = "SYNTAXLAB_DETAILED_TRACE";
    pub const ANALYSIS_SORT_DIAGNOSTICS: &str = "SYNTAXLAB_SORT_DIAGNOSTICS";
    pub const ANALYSIS_LOG_DIAGNOSTICS: &str = "SYNTAXLAB_LOG_DIAGNOSTICS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SYNTAXLAB_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SYNTAXLAB_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SYNTAXLAB_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_ordering_matches_events() {
        assert!(LogLevel::Error < LogLevel::Debug);
        assert_eq!(
            LogLevel::Warning.to_events_log_level(),
            crate::logging::events::LogLevel::Warning
        );
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::ANALYSIS_DETAILED_TRACE,
            env_vars::ANALYSIS_SORT_DIAGNOSTICS,
            env_vars::ANALYSIS_LOG_DIAGNOSTICS,
            env_vars::LOGGING_USE_STRUCTURED,
            env_vars::LOGGING_ENABLE_CONSOLE,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("SYNTAXLAB_"));
        }
    }
}
