//! Conversion failure type
//!
//! Every failure below aborts the whole top-level conversion; nested import
//! failures propagate up the recursive call chain unchanged. Lexical and
//! rendering failures carry the source file and line they surfaced on.

use thiserror::Error;

use crate::file_processor::FileProcessorError;
use crate::lexical::LexError;
use crate::logging::codes;
use crate::tokens::RenderError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{file}:{line}: {source}")]
    Lex {
        source: LexError,
        file: String,
        line: usize,
    },

    #[error("{file}:{line}: {source}")]
    Render {
        source: RenderError,
        file: String,
        line: usize,
    },

    #[error(transparent)]
    File(#[from] FileProcessorError),

    #[error("Missing import target: {path}")]
    MissingImportTarget { path: String },

    #[error("Import nesting of {depth} exceeds the limit of {max}")]
    ImportDepthExceeded { depth: usize, max: usize },

    #[error("Failed to write destination '{path}': {message}")]
    DestinationWrite { path: String, message: String },
}

impl ConvertError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            ConvertError::Lex { source, .. } => source.error_code(),
            ConvertError::Render { source, .. } => source.error_code(),
            ConvertError::File(source) => source.error_code(),
            ConvertError::MissingImportTarget { .. } => {
                codes::conversion::MISSING_IMPORT_TARGET
            }
            ConvertError::ImportDepthExceeded { .. } => {
                codes::conversion::IMPORT_DEPTH_EXCEEDED
            }
            ConvertError::DestinationWrite { .. } => {
                codes::conversion::DESTINATION_WRITE_FAILED
            }
        }
    }
}
