//! Line tokenizer: the fixed six-pass pipeline
//!
//! Pass order per line: block-quote scan (with the inside flag carried from
//! the previous line), single-line quote scan, whitespace and trailing
//! comment capture, reserved word at line start, longest-match symbol
//! substitution, numeral/identifier classification. Afterwards the line
//! must be fully partitioned into tokens; a surviving raw character is
//! fatal.

use crate::config::runtime::LexicalPreferences;
use crate::lexical::{
    BlockQuoteScanner, LexError, NumberVariableClassifier, Piece, QuoteScanner,
};
use crate::tables::{Tables, COMMENT};
use crate::{log_debug, log_error};
use crate::tokens::Token;

/// Pipeline driver owning the scanners and the cross-line inside flag
pub struct LineTokenizer {
    block: BlockQuoteScanner,
    quote: QuoteScanner,
    classifier: NumberVariableClassifier,
    preferences: LexicalPreferences,
    /// True while a multi-line string from a previous line is still open
    inside: bool,
}

impl LineTokenizer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            block: BlockQuoteScanner::new(),
            quote: QuoteScanner::new(),
            classifier: NumberVariableClassifier::new(),
            preferences,
            inside: false,
        }
    }

    /// Forget any open multi-line string; called between files
    pub fn reset(&mut self) {
        self.inside = false;
    }

    /// Whether the last line ended inside a multi-line string
    pub fn still_inside(&self) -> bool {
        self.inside
    }

    /// Restore a saved inside flag; used when a nested conversion borrows
    /// the tokenizer mid-file
    pub fn set_inside(&mut self, inside: bool) {
        self.inside = inside;
    }

    /// Run the full pipeline over one line
    pub fn tokenize_line(&mut self, tables: &Tables, line: &str) -> Result<Vec<Token>, LexError> {
        match self.run_passes(tables, line) {
            Ok(tokens) => {
                if self.preferences.log_token_statistics {
                    log_debug!("Line tokenized",
                        "tokens" => tokens.len(),
                        "still_inside" => self.inside
                    );
                }
                Ok(tokens)
            }
            Err(error) => {
                let message = if self.preferences.include_position_in_errors {
                    format!("Lexical analysis failed: {}", error)
                } else {
                    "Lexical analysis failed".to_string()
                };
                log_error!(error.error_code(), &message);
                Err(error)
            }
        }
    }

    fn run_passes(&mut self, tables: &Tables, line: &str) -> Result<Vec<Token>, LexError> {
        let scan = self.block.scan(Piece::from_line(line), self.inside)?;
        self.inside = scan.still_inside;

        let pieces = self.quote.scan(scan.pieces)?;
        let pieces = capture_whitespace_and_comment(pieces);
        let pieces = match_reserved_word(pieces, tables);
        let pieces = substitute_symbols(pieces, tables);
        let pieces = self.classifier.classify(pieces)?;

        let mut tokens = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Tok(token) => tokens.push(token),
                Piece::Raw(glyph) => return Err(LexError::UnclassifiedCharacter { glyph }),
                Piece::Consumed => {}
            }
        }

        Ok(tokens)
    }
}

impl Default for LineTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pass 3: one Whitespace token for the leading indentation, interior
/// whitespace dropped, trailing comment folded into the End token
fn capture_whitespace_and_comment(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut indent = String::new();
    let mut rest = pieces.into_iter().peekable();
    while let Some(Piece::Raw(c @ (' ' | '\t'))) = rest.peek() {
        indent.push(*c);
        rest.next();
    }

    let mut out = vec![Piece::Tok(Token::Whitespace(indent))];
    let mut comment: Option<String> = None;

    for piece in rest {
        match piece {
            Piece::Raw(c) if comment.is_some() => {
                if let Some(text) = comment.as_mut() {
                    text.push(c);
                }
            }
            Piece::Raw(c) if c == COMMENT => comment = Some(String::new()),
            Piece::Raw(' ' | '\t' | '\n' | '\r') => {}
            other => out.push(other),
        }
    }

    out.push(Piece::Tok(Token::End { comment }));
    out
}

/// Pass 4: reserved statement word immediately after the indentation;
/// longest key first, at most one match per line
fn match_reserved_word(mut pieces: Vec<Piece>, tables: &Tables) -> Vec<Piece> {
    for (word, _) in tables.reserved_words() {
        let glyphs: Vec<char> = word.chars().collect();
        if pieces.len() < glyphs.len() + 2 {
            continue;
        }
        let matches = glyphs
            .iter()
            .enumerate()
            .all(|(i, g)| pieces[i + 1].raw() == Some(*g));
        if matches {
            pieces[1] = Piece::Tok(Token::ReservedWord(word.to_string()));
            for cell in pieces.iter_mut().skip(2).take(glyphs.len() - 1) {
                *cell = Piece::Consumed;
            }
            break;
        }
    }
    pieces.into_iter().filter(|p| *p != Piece::Consumed).collect()
}

/// Pass 5: greedy longest-match symbol substitution anywhere in the line
fn substitute_symbols(mut pieces: Vec<Piece>, tables: &Tables) -> Vec<Piece> {
    for (symbol, _) in tables.symbols() {
        let glyphs: Vec<char> = symbol.chars().collect();
        if glyphs.is_empty() || pieces.len() < glyphs.len() {
            continue;
        }
        let mut i = 0;
        while i + glyphs.len() <= pieces.len() {
            let matches = glyphs
                .iter()
                .enumerate()
                .all(|(j, g)| pieces[i + j].raw() == Some(*g));
            if matches {
                pieces[i] = Piece::Tok(Token::Symbol(symbol.to_string()));
                for cell in pieces.iter_mut().skip(i + 1).take(glyphs.len() - 1) {
                    *cell = Piece::Consumed;
                }
                i += glyphs.len();
            } else {
                i += 1;
            }
        }
    }
    pieces.into_iter().filter(|p| *p != Piece::Consumed).collect()
}
