//! Global logging module for syntaxlab
//!
//! Provides thread-safe global logging, a per-thread analysis context that is stamped
//! onto every event, and the macro interface used by the analyzers.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::Span;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MultiLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static ANALYSIS_CONTEXT: RefCell<Option<AnalysisContext>> = const { RefCell::new(None) };
}

/// What the current thread is analyzing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisContext {
    pub mode: String,
    pub input_length: usize,
}

impl AnalysisContext {
    pub fn new(mode: &str, input_length: usize) -> Self {
        Self {
            mode: mode.to_string(),
            input_length,
        }
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    for code in codes::diagnostic_codes() {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// ANALYSIS CONTEXT MANAGEMENT
// ============================================================================

fn replace_analysis_context(context: Option<AnalysisContext>) -> Option<AnalysisContext> {
    ANALYSIS_CONTEXT.with(|ctx| ctx.replace(context))
}

/// Execute function with analysis context, restoring any outer context afterwards
pub fn with_analysis_context<F, R>(mode: &str, input_length: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = replace_analysis_context(Some(AnalysisContext::new(mode, input_length)));
    let result = f();
    replace_analysis_context(previous);
    result
}

/// Get current analysis context (used by macros)
pub fn get_current_analysis_context() -> Option<AnalysisContext> {
    ANALYSIS_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Stamp the current analysis context onto an event
pub fn attach_analysis_context(event: LogEvent) -> LogEvent {
    match get_current_analysis_context() {
        Some(ctx) => event
            .with_context("mode", &ctx.mode)
            .with_context("input_length", &ctx.input_length.to_string()),
        None => event,
    }
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn dispatch(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_analysis_context(event));
    }
}

fn with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Used by log_error!
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(with_pairs(event, context));
}

/// Used by log_warning!
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(with_pairs(event, context));
}

/// Used by log_success!
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::success(code, message), context));
}

/// Used by log_info!
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::info(message), context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_analysis_context_restores_outer() {
        assert!(get_current_analysis_context().is_none());

        let result = with_analysis_context("numbers", 3, || {
            let inner = with_analysis_context("prototype", 40, || {
                get_current_analysis_context().map(|c| c.mode)
            });
            assert_eq!(inner, Some("prototype".to_string()));
            get_current_analysis_context()
        });

        assert_eq!(result, Some(AnalysisContext::new("numbers", 3)));
        assert!(get_current_analysis_context().is_none());
    }

    #[test]
    fn test_context_is_attached_to_events() {
        let event = with_analysis_context("expression", 5, || {
            attach_analysis_context(LogEvent::info("hello"))
        });
        assert_eq!(event.context.get("mode").map(String::as_str), Some("expression"));
        assert_eq!(
            event.context.get("input_length").map(String::as_str),
            Some("5")
        );
    }
}
