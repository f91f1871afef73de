// Internal modules
pub mod assembler;
pub mod automata;
pub mod config;
pub mod converter;
pub mod file_processor;
pub mod identifiers;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod numerals;
pub mod tables;
pub mod tokens;

// Re-export key types for library consumers
pub use config::{ConversionPreferences, LexicalPreferences};
pub use converter::{ConversionOutcome, ConvertError, Converter};
pub use identifiers::IdentifierMap;
pub use lexical::{LexError, LineTokenizer};
pub use tables::Tables;
pub use tokens::{NumberFormat, Token};
