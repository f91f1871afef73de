//! Consolidated error codes and classification system
//!
//! Single source of truth for all error and success codes, their metadata,
//! and the classification functions built on top of them.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
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

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

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

/// Complete metadata for an error code
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

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNCLASSIFIED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const INVALID_NUMERAL: Code = Code::new("E022");
    pub const NO_TRANSITION: Code = Code::new("E023");
}

/// Rendering table error codes
pub mod tables {
    use super::Code;

    pub const SYMBOL_TABLE_MISS: Code = Code::new("E030");
    pub const RESERVED_TABLE_MISS: Code = Code::new("E031");
}

/// File conversion error codes
pub mod conversion {
    use super::Code;

    pub const MISSING_IMPORT_TARGET: Code = Code::new("E040");
    pub const IMPORT_DEPTH_EXCEEDED: Code = Code::new("E041");
    pub const DESTINATION_WRITE_FAILED: Code = Code::new("E042");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("S002");
    pub const LINE_ASSEMBLY_COMPLETE: Code = Code::new("S003");
    pub const CONVERSION_COMPLETE: Code = Code::new("S004");
    pub const CONVERSION_SKIPPED: Code = Code::new("S005");
    pub const IMPORT_RESOLVED: Code = Code::new("S006");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn meta(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
) -> (&'static str, ErrorMetadata) {
    (
        code,
        ErrorMetadata {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        },
    )
}

fn registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        HashMap::from([
            meta(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Internal converter error",
                "Report the failing source line as a bug",
            ),
            meta(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging system initialization failed",
                "Check HAN_LOG_LEVEL and retry",
            ),
            meta(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Source file not found",
                "Check the path passed on the command line",
            ),
            meta(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Source file exceeds the compile-time size limit",
                "Split the source file",
            ),
            meta(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Source file is not valid UTF-8",
                "Re-encode the file as UTF-8",
            ),
            meta(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error while reading the source file",
                "Check filesystem permissions",
            ),
            meta(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Path is empty or does not point at a file",
                "Check the path passed on the command line",
            ),
            meta(
                "E013",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Source file exceeds the compile-time line count limit",
                "Split the source file",
            ),
            meta(
                "E020",
                "Lexical",
                Severity::High,
                false,
                true,
                "A character survived the full tokenizer pipeline unclaimed",
                "Fix the source line; if the character should be legal, extend the tables",
            ),
            meta(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "A single-line string is still open at end of line",
                "Close the string on the same line or use a multi-line string",
            ),
            meta(
                "E022",
                "Lexical",
                Severity::High,
                false,
                true,
                "Malformed numeral literal",
                "Check digit values against the declared radix and place-value ordering",
            ),
            meta(
                "E023",
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Scanner state graph has no transition for the input",
                "Report the failing source line as a bug",
            ),
            meta(
                "E030",
                "Tables",
                Severity::Critical,
                false,
                true,
                "Symbol token has no entry in the rendering table",
                "Fix the symbol table; this is a table-authoring defect",
            ),
            meta(
                "E031",
                "Tables",
                Severity::Critical,
                false,
                true,
                "Reserved word token has no entry in the rendering table",
                "Fix the reserved-word table; this is a table-authoring defect",
            ),
            meta(
                "E040",
                "Conversion",
                Severity::High,
                false,
                true,
                "Imported module source file does not exist",
                "Create the referenced module or fix the import line",
            ),
            meta(
                "E041",
                "Conversion",
                Severity::High,
                false,
                true,
                "Import recursion exceeded the compile-time depth limit",
                "Flatten the module import chain",
            ),
            meta(
                "E042",
                "Conversion",
                Severity::Medium,
                false,
                true,
                "Destination file could not be written",
                "Check filesystem permissions on the output directory",
            ),
        ])
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.requires_halt)
        .unwrap_or(true)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.recoverable)
        .unwrap_or(false)
}
