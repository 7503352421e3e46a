//! Event system for syntaxlab logging

use super::codes::Code;
use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::utils::Span;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: truncate_message(message),
            span: None,
            context: HashMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Create a new warning event (warnings may not have codes)
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    /// Create a new info event
    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Add span information
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn category(&self) -> &'static str {
        super::codes::get_category(self.code.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        let span_str = self
            .span
            .as_ref()
            .map(|s| format!(" at {}", s))
            .unwrap_or_default();

        format!(
            "[{}] {} - {}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            span_str
        )
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
        });

        if let Some(metadata) = super::codes::get_error_metadata(self.code.as_str()) {
            json["severity"] = serde_json::json!(metadata.severity.as_str());
            if self.is_error() {
                json["error_metadata"] = serde_json::json!({
                    "recoverable": metadata.recoverable,
                    "requires_halt": metadata.requires_halt,
                    "description": metadata.description,
                });
            }
        }

        if let Some(span) = &self.span {
            json["span"] = serde_json::json!({
                "start": span.start,
                "end": span.end,
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}

/// Cap a message at the configured length, respecting char boundaries
fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(MAX_LOG_MESSAGE_LENGTH).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::input::EMPTY_INPUT, "Input is empty");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E005");
        assert_eq!(event.category(), "Input");
    }

    #[test]
    fn test_warning_with_code_keeps_code() {
        let event = LogEvent::warning_with_code(codes::lexical::UNKNOWN_FUNCTION, "unknown");
        assert_eq!(event.level, LogLevel::Warning);
        assert_eq!(event.code, codes::lexical::UNKNOWN_FUNCTION);
        assert_eq!(LogEvent::warning("generic").code.as_str(), "W000");
    }

    #[test]
    fn test_event_formatting_includes_span() {
        let event = LogEvent::error(codes::lexical::INVALID_FRAGMENT, "invalid fragment")
            .with_span(Span::new(2, 4));
        let formatted = event.format();

        assert!(formatted.contains("[ERROR]"));
        assert!(formatted.contains("E020"));
        assert!(formatted.ends_with("at chars 3-5"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::prototype::EXPECTED_SEMICOLON, "missing ';'")
            .with_span(Span::point(7))
            .with_context("mode", "prototype");

        let json = event.format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "E065");
        assert_eq!(value["span"]["start"], 7);
        assert_eq!(value["context"]["mode"], "prototype");
        assert_eq!(value["severity"], "Low");
        assert_eq!(value["error_metadata"]["recoverable"], true);
        assert!(value["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let long = "x".repeat(MAX_LOG_MESSAGE_LENGTH + 10);
        let event = LogEvent::info(&long);
        assert_eq!(event.message.chars().count(), MAX_LOG_MESSAGE_LENGTH + 3);
        assert!(event.message.ends_with("..."));
    }
}
