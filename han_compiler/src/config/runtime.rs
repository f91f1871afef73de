// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionPreferences {
    /// Overwrite an existing destination without asking (confirmation
    /// itself is owned by the CLI, the core only reads the flag)
    pub force_overwrite: bool,

    /// Convert even when the destination is newer than the source
    pub force_update: bool,

    /// Spaces per indentation level (accepted, not yet applied to output)
    pub spaces_per_indent: usize,

    /// Use tabs instead of spaces; overrides spaces_per_indent
    /// (accepted, not yet applied to output)
    pub use_tabs: bool,

    /// Prefix joined onto relative source and destination paths of the
    /// top-level invocation
    pub working_dir_prefix: String,
}

impl Default for ConversionPreferences {
    fn default() -> Self {
        Self {
            force_overwrite: env::var("HAN_FORCE_OVERWRITE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            force_update: env::var("HAN_FORCE_UPDATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            spaces_per_indent: env::var("HAN_SPACES_PER_INDENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            use_tabs: env::var("HAN_USE_TABS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            working_dir_prefix: env::var("HAN_WORKING_DIR_PREFIX").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to show line/column information in error messages
    pub include_position_in_errors: bool,

    /// Whether to log per-line token statistics at debug level
    pub log_token_statistics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            include_position_in_errors: env::var("HAN_LEXICAL_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_token_statistics: env::var("HAN_LEXICAL_LOG_TOKEN_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}
