//! Source file reading with validation and up-to-date checks
//!
//! The core's only filesystem contract: read a whole source file as UTF-8
//! text, and answer whether an existing destination is already newer than
//! both the source and the converter binary itself.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::constants::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::log_debug;
use crate::logging::codes;

/// File processing errors
#[derive(Debug, Clone, Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
            FileProcessorError::InvalidEncoding { .. } => {
                codes::file_processing::INVALID_ENCODING
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }
}

/// Metadata collected while reading a source file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Number of lines in the file
    pub line_count: usize,
    /// Modification time, if the filesystem reports one
    pub modified: Option<std::time::SystemTime>,
}

/// A fully-read source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// File contents as UTF-8 text
    pub source: String,
    pub metadata: FileMetadata,
}

impl SourceFile {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Read and validate one source file
pub fn read_source(path: &Path) -> Result<SourceFile, FileProcessorError> {
    if path.as_os_str().is_empty() {
        return Err(FileProcessorError::InvalidPath {
            path: String::new(),
        });
    }
    if !path.exists() {
        return Err(FileProcessorError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    if !path.is_file() {
        return Err(FileProcessorError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let canonical = path
        .canonicalize()
        .map_err(|e| FileProcessorError::IoError {
            message: format!("Failed to resolve path '{}': {}", path.display(), e),
        })?;

    let metadata = fs::metadata(&canonical).map_err(|e| FileProcessorError::IoError {
        message: format!("Failed to read metadata for '{}': {}", canonical.display(), e),
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileProcessorError::FileTooLarge {
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        });
    }

    let source = match fs::read_to_string(&canonical) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            return Err(FileProcessorError::InvalidEncoding {
                path: canonical.display().to_string(),
            })
        }
        Err(e) => {
            return Err(FileProcessorError::IoError {
                message: format!("Failed to read file '{}': {}", canonical.display(), e),
            })
        }
    };

    let line_count = source.lines().count();
    if line_count > MAX_LINE_COUNT {
        return Err(FileProcessorError::TooManyLines {
            lines: line_count,
            max_lines: MAX_LINE_COUNT,
        });
    }

    log_debug!("Source file read",
        "file" => canonical.display(),
        "size_bytes" => metadata.len(),
        "lines" => line_count
    );

    Ok(SourceFile {
        source,
        metadata: FileMetadata {
            path: canonical,
            size: metadata.len(),
            line_count,
            modified: metadata.modified().ok(),
        },
    })
}

/// Whether an existing destination is already newer than the source and the
/// converter binary itself
pub fn destination_up_to_date(source: &Path, dest: &Path) -> bool {
    let dest_modified = match fs::metadata(dest).and_then(|m| m.modified()) {
        Ok(time) => time,
        Err(_) => return false,
    };
    let source_modified = match fs::metadata(source).and_then(|m| m.modified()) {
        Ok(time) => time,
        Err(_) => return false,
    };
    if source_modified > dest_modified {
        return false;
    }

    // A rebuilt converter may translate differently, so a destination older
    // than the binary is stale too
    if let Ok(exe) = std::env::current_exe() {
        if let Ok(exe_modified) = fs::metadata(exe).and_then(|m| m.modified()) {
            if exe_modified > dest_modified {
                return false;
            }
        }
    }

    true
}
