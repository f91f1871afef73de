//! Closed token variant set with per-variant rendering
//!
//! Every token carries its original ideographic text. String, symbol,
//! reserved-word and numeral tokens render from that text alone; variable
//! tokens additionally consult (and grow) the session identifier map.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::identifiers::IdentifierMap;
use crate::logging::codes;
use crate::numerals::{self, NumeralError};
use crate::tables::{Tables, CLOSE_QUOTE, OPEN_QUOTE};

/// Numeral encodings a Number token may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    /// Plain digit glyph run, optional sign/decimal point
    Arabic,
    /// Decimal shorthand with no integer part (点五)
    ShorthandArabic,
    /// Place-value numeral (三千五百万)
    FullName,
    /// Declared-radix numeral (一六进FF)
    RadixDeclared,
    /// Exponent notation (三E九)
    Scientific,
}

/// Rendering failures caused by table-authoring defects
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Symbol '{raw}' has no entry in the symbol table")]
    SymbolTableMiss { raw: String },

    #[error("Reserved word '{raw}' has no entry in the reserved-word table")]
    ReservedTableMiss { raw: String },

    #[error(transparent)]
    Numeral(#[from] NumeralError),
}

impl RenderError {
    pub fn error_code(&self) -> codes::Code {
        match self {
            RenderError::SymbolTableMiss { .. } => codes::tables::SYMBOL_TABLE_MISS,
            RenderError::ReservedTableMiss { .. } => codes::tables::RESERVED_TABLE_MISS,
            RenderError::Numeral(e) => e.error_code(),
        }
    }
}

/// One token of a tokenized line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// The leading indentation run; always the first token of a line
    Whitespace(String),
    /// End of line, optionally carrying the trailing comment text
    End { comment: Option<String> },
    /// Complete single-line string, delimiters included
    Str(String),
    /// One line's worth of a multi-line string, delimiters included where present
    MultilineStr(String),
    /// Operator or punctuation, by its ideographic key
    Symbol(String),
    /// Statement word matched at the start of the line
    ReservedWord(String),
    /// Identifier spelling
    Variable(String),
    /// Numeral run with its detected encoding
    Number { text: String, format: NumberFormat },
    /// Synthetic text placed by the rewriter; renders literally
    Injected(String),
}

impl Token {
    /// Render to host-language text
    ///
    /// Variable rendering records new spellings into the session map as a
    /// side effect; everything else is pure.
    pub fn render(
        &self,
        tables: &Tables,
        idents: &mut IdentifierMap,
    ) -> Result<String, RenderError> {
        match self {
            Token::Whitespace(text) => Ok(text.clone()),
            Token::End { .. } => Ok(String::new()),
            Token::Str(text) | Token::MultilineStr(text) => Ok(render_quoted(text)),
            Token::Symbol(raw) => tables
                .symbol_host(raw)
                .map(str::to_string)
                .ok_or_else(|| RenderError::SymbolTableMiss { raw: raw.clone() }),
            Token::ReservedWord(raw) => tables
                .reserved_host(raw)
                .map(str::to_string)
                .ok_or_else(|| RenderError::ReservedTableMiss { raw: raw.clone() }),
            Token::Variable(raw) => Ok(idents.render(raw)),
            Token::Number { text, format } => Ok(match format {
                NumberFormat::Arabic
                | NumberFormat::ShorthandArabic
                | NumberFormat::Scientific => numerals::render_arabic(text)?,
                NumberFormat::FullName => numerals::render_full_name(text)?,
                NumberFormat::RadixDeclared => numerals::render_radix(text)?,
            }),
            Token::Injected(text) => Ok(text.clone()),
        }
    }

    /// The original source text this token stands for
    pub fn raw_text(&self) -> &str {
        match self {
            Token::Whitespace(text)
            | Token::Str(text)
            | Token::MultilineStr(text)
            | Token::Symbol(text)
            | Token::ReservedWord(text)
            | Token::Variable(text)
            | Token::Injected(text) => text,
            Token::Number { text, .. } => text,
            Token::End { .. } => "",
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Token::Variable(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Token::Symbol(_))
    }

    pub fn is_reserved_word(&self) -> bool {
        matches!(self, Token::ReservedWord(_))
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Token::End { .. })
    }

    pub fn is_injected(&self) -> bool {
        matches!(self, Token::Injected(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Token::Str(_) | Token::MultilineStr(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::End { comment: Some(c) } => write!(f, "<end #{}>", c),
            Token::End { comment: None } => write!(f, "<end>"),
            other => write!(f, "{}", other.raw_text()),
        }
    }
}

/// Map the ideographic quote glyphs onto host quotes, content untouched
fn render_quoted(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == OPEN_QUOTE || c == CLOSE_QUOTE {
                '"'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn render(token: &Token) -> Result<String, RenderError> {
        let tables = Tables::new();
        let mut idents = IdentifierMap::new();
        token.render(&tables, &mut idents)
    }

    #[test]
    fn string_rendering_maps_quotes_only() {
        let token = Token::Str("“你好 world”".to_string());
        assert_eq!(render(&token).unwrap(), "\"你好 world\"");
    }

    #[test]
    fn multiline_fragment_without_delimiters_is_verbatim() {
        let token = Token::MultilineStr("middle of a docstring".to_string());
        assert_eq!(render(&token).unwrap(), "middle of a docstring");
    }

    #[test]
    fn multiline_delimiters_become_triple_quotes() {
        let token = Token::MultilineStr("“““文档".to_string());
        assert_eq!(render(&token).unwrap(), "\"\"\"文档");
    }

    #[test]
    fn symbol_and_reserved_rendering_hit_tables() {
        assert_eq!(render(&Token::Symbol("加".into())).unwrap(), "+");
        assert_eq!(render(&Token::ReservedWord("种类".into())).unwrap(), "class");
    }

    #[test]
    fn table_misses_are_authoring_defects() {
        assert_matches!(
            render(&Token::Symbol("卅".into())),
            Err(RenderError::SymbolTableMiss { .. })
        );
        assert_matches!(
            render(&Token::ReservedWord("卅卅".into())),
            Err(RenderError::ReservedTableMiss { .. })
        );
    }

    #[test]
    fn number_rendering_dispatches_on_format() {
        let arabic = Token::Number {
            text: "一二三".into(),
            format: NumberFormat::Arabic,
        };
        let full = Token::Number {
            text: "三百".into(),
            format: NumberFormat::FullName,
        };
        let radix = Token::Number {
            text: "二进一零一".into(),
            format: NumberFormat::RadixDeclared,
        };
        assert_eq!(render(&arabic).unwrap(), "123");
        assert_eq!(render(&full).unwrap(), "300");
        assert_eq!(render(&radix).unwrap(), "0b101");
    }

    #[test]
    fn variable_rendering_registers_in_the_session() {
        let tables = Tables::new();
        let mut idents = IdentifierMap::new();
        let token = Token::Variable("人".into());
        assert_eq!(token.render(&tables, &mut idents).unwrap(), "rén");
        assert_eq!(idents.lookup("人"), Some("rén"));
    }

    #[test]
    fn tokens_serialize() {
        let token = Token::Number {
            text: "十二".into(),
            format: NumberFormat::FullName,
        };
        let json = serde_json::to_string(&token).unwrap();
        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
