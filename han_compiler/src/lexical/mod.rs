//! Lexical analysis: scanners, classifier, and the line pipeline
//!
//! A line is lexed as a sequence of pieces: raw characters progressively
//! claimed by scanner passes until only typed tokens remain. Pass order is
//! fixed: block-quote scan, quote scan, whitespace and trailing-comment
//! capture, reserved word, symbols, numeral/identifier classification.

pub mod block_quote;
pub mod classifier;
pub mod quote;
pub mod tokenizer;

use thiserror::Error;

use crate::automata::AutomatonError;
use crate::logging::codes;
use crate::numerals::NumeralError;
use crate::tokens::Token;

pub use block_quote::{BlockQuoteScanner, BlockScan};
pub use classifier::NumberVariableClassifier;
pub use quote::QuoteScanner;
pub use tokenizer::LineTokenizer;

/// Lexical analysis failures; all abort the surrounding conversion
#[derive(Debug, Clone, Error)]
pub enum LexError {
    #[error("String still open at end of line")]
    UnterminatedString,

    #[error("Character not claimed by any pipeline pass: '{glyph}'")]
    UnclassifiedCharacter { glyph: char },

    #[error(transparent)]
    Numeral(#[from] NumeralError),

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

impl LexError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            LexError::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            LexError::UnclassifiedCharacter { .. } => codes::lexical::UNCLASSIFIED_CHARACTER,
            LexError::Numeral(e) => e.error_code(),
            LexError::Automaton(e) => e.error_code(),
        }
    }
}

/// One unit of a partially-lexed line
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    /// A character no pass has claimed yet
    Raw(char),
    /// A finished token
    Tok(Token),
    /// A cell voided by a multi-character match, compacted away per pass
    Consumed,
}

impl Piece {
    pub fn raw(&self) -> Option<char> {
        match self {
            Piece::Raw(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Piece::Raw(_))
    }

    /// Turn a line into its initial all-raw piece sequence
    pub fn from_line(line: &str) -> Vec<Piece> {
        line.chars().map(Piece::Raw).collect()
    }
}
