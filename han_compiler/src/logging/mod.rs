//! Global logging module for the han converter
//!
//! Thread-safe global logging with typed error codes and a clean macro
//! interface. The converter itself is strictly single-threaded; the
//! `OnceLock` only guards initialization.

pub mod codes;
pub mod events;
pub mod macros;

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();
static MIN_LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

/// Console logger writing formatted events to stderr
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn log_event(&self, event: LogEvent) {
        if event.level <= min_log_level() {
            eprintln!("{}", event);
        }
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
///
/// Reads the minimum level from HAN_LOG_LEVEL (error/warn/info/debug,
/// default info). Calling twice is an error.
pub fn init_global_logging() -> Result<(), String> {
    if let Ok(value) = std::env::var("HAN_LOG_LEVEL") {
        match LogLevel::parse(&value) {
            Some(level) => MIN_LOG_LEVEL.store(level as u8, Ordering::Relaxed),
            None => return Err(format!("Invalid HAN_LOG_LEVEL value: {}", value)),
        }
    }

    GLOBAL_LOGGER
        .set(ConsoleLogger)
        .map_err(|_| "Global logger already initialized".to_string())?;

    // Validate the error code registry before anything can log against it
    let probe_codes = ["ERR001", "E005", "E020", "E040"];
    for &code in &probe_codes {
        if codes::get_description(code) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let event = LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static ConsoleLogger> {
    GLOBAL_LOGGER.get()
}

/// Current minimum log level
pub fn min_log_level() -> LogLevel {
    match MIN_LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        2 => LogLevel::Success,
        3 => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Override the minimum log level (primarily for the CLI's --verbose flag)
pub fn set_min_log_level(level: LogLevel) {
    MIN_LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::error(code, message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_logging_never_panics() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn min_level_round_trip() {
        let original = min_log_level();
        set_min_log_level(LogLevel::Debug);
        assert_eq!(min_log_level(), LogLevel::Debug);
        set_min_log_level(original);
    }

    #[test]
    fn initialization_is_idempotent_failure() {
        // Whichever test initializes first wins; the second call must error,
        // never panic.
        let first = init_global_logging();
        let second = init_global_logging();
        assert!(first.is_ok() || second.is_err());
    }
}
