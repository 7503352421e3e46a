//! Configuration module for logging - using compile-time constants
//!
//! Limits come from the build profile and cannot change at runtime. Sink selection and
//! verbosity are user preferences read once from the environment or set explicitly.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;
type RuntimeLogLevel = crate::config::runtime::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    if preferences.use_structured_logging && !preferences.enable_console_logging {
        return Err("Structured logging requires console logging to be enabled".to_string());
    }

    Ok(())
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Minimum level to emit; never stricter than the profile's floor
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    let floor = get_security_log_level();

    if user_level < floor {
        floor
    } else {
        user_level
    }
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Least verbose level a user may select (compile-time enforced)
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        2 => EventsLogLevel::Info,
        _ => EventsLogLevel::Debug,
    }
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    if let Some(preferences) = RUNTIME_PREFERENCES.get() {
        validate_preferences(preferences)?;
    }

    Ok(())
}

/// Preferences used by the command-line tool with `--verbose`
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: RuntimeLogLevel::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_floor_is_at_least_warning() {
        assert!(get_security_log_level() >= EventsLogLevel::Warning);
        assert!(get_min_log_level() >= get_security_log_level());
    }

    #[test]
    fn test_structured_without_console_is_rejected() {
        let prefs = LoggingPreferences {
            use_structured_logging: true,
            enable_console_logging: false,
            min_log_level: RuntimeLogLevel::Info,
        };
        assert!(validate_preferences(&prefs).is_err());
        assert!(validate_preferences(&get_development_preferences()).is_ok());
    }
}
