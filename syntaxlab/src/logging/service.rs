//! Logging service and sinks

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::Arc;

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a sink
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Service wired from the runtime preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        Self::new(Arc::new(create_configured_multi_logger()), min_level)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Human-readable sink on stderr; stdout belongs to analysis output
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// JSON-lines sink on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Fan-out logger; with no sinks attached it drops everything
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        for logger in &self.loggers {
            logger.log(event);
        }
    }
}

// ============================================================================
// CONFIGURATION-AWARE FACTORY FUNCTIONS
// ============================================================================

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Console output is opt-in, so a default configuration stays silent
pub fn create_configured_multi_logger() -> MultiLogger {
    let mut multi_logger = MultiLogger::default();

    if config::use_console_logging() {
        if config::use_structured_logging() {
            multi_logger.add_logger(Arc::new(StructuredLogger));
        } else {
            multi_logger.add_logger(Arc::new(ConsoleLogger));
        }
    }

    multi_logger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use std::sync::Mutex;

    /// Captures events for assertions
    #[derive(Default)]
    struct MemoryLogger {
        events: Mutex<Vec<LogEvent>>,
    }

    impl MemoryLogger {
        fn codes(&self) -> Vec<&'static str> {
            self.events
                .lock()
                .map(|events| events.iter().map(|e| e.code.as_str()).collect())
                .unwrap_or_default()
        }
    }

    impl Logger for MemoryLogger {
        fn log(&self, event: &LogEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event.clone());
            }
        }
    }

    #[test]
    fn test_console_and_structured_loggers_do_not_panic() {
        ConsoleLogger.log(&LogEvent::info("Test message"));
        StructuredLogger.log(
            &LogEvent::error(codes::input::EMPTY_INPUT, "Test error").with_context("key", "value"),
        );
    }

    #[test]
    fn test_multi_logger_fans_out() {
        let first = Arc::new(MemoryLogger::default());
        let second = Arc::new(MemoryLogger::default());
        let mut multi = MultiLogger::default();
        multi.add_logger(first.clone());
        multi.add_logger(second.clone());

        multi.log(&LogEvent::success(codes::success::ANALYSIS_COMPLETE, "done"));

        assert_eq!(multi.loggers.len(), 2);
        assert_eq!(first.codes(), vec!["I090"]);
        assert_eq!(second.codes(), vec!["I090"]);
    }

    #[test]
    fn test_default_configuration_has_no_console_sink() {
        assert_eq!(create_configured_multi_logger().loggers.len(), 0);
    }

    #[test]
    fn test_level_filtering() {
        let memory = Arc::new(MemoryLogger::default());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("Debug message"));
        service.log_event(LogEvent::info("Info message"));
        service.log_event(LogEvent::warning_with_code(
            codes::structural::GARBAGE_RUN,
            "garbage",
        ));
        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "Error message"));

        assert_eq!(memory.codes(), vec!["E080", "ERR001"]);
        assert!(service.should_log(LogLevel::Error));
        assert!(!service.should_log(LogLevel::Info));
    }
}
