//! Log event and level types shared by the logger and the macros

use crate::logging::codes::Code;
use chrono::{DateTime, Utc};
use std::fmt;

/// Log levels in increasing verbosity order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Success = 2,
    Info = 3,
    Debug = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Success => "OK",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Parse a level name as used by HAN_LOG_LEVEL
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warning),
            "success" | "ok" => Some(LogLevel::Success),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

/// A single structured log event with optional code and key/value context
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub code: Option<Code>,
    pub message: String,
    pub context: Vec<(String, String)>,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Option<Code>, message: &str) -> Self {
        Self {
            level,
            code,
            message: message.to_string(),
            context: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, Some(code), message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, None, message)
    }

    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Success, Some(code), message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, None, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, None, message)
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.level.as_str(),
            match self.code {
                Some(code) => format!("[{}] {}", code, self.message),
                None => self.message.clone(),
            }
        )?;
        for (key, value) in &self.context {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}
