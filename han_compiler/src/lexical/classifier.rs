//! Numeral / identifier classifier
//!
//! Runs over the raw residue left between already-recognized tokens and
//! decides, run by run, whether the characters form an identifier or one of
//! the numeral encodings. The state graph is shared and immutable; all
//! per-run bookkeeping lives in a `RunContext` local to each scan.

use crate::automata::{GraphBuilder, StateGraph, StateId};
use crate::config::constants::compile_time::lexical::{MAX_DECLARED_RADIX, MIN_DECLARED_RADIX};
use crate::lexical::{LexError, Piece};
use crate::numerals::{
    self, NumeralError, DECIMAL_POINT, EXPONENT, NEGATIVE, RADIX_MARKER,
};
use crate::tokens::{NumberFormat, Token};

/// Per-run bookkeeping, reset at every token boundary
#[derive(Default)]
struct RunContext {
    buf: String,
    /// Digits seen before a decimal point or radix marker
    int_digits: String,
    /// Declared base once the radix marker is consumed
    base: Option<u32>,
    /// Count of digits consumed after the radix marker
    radix_digits: usize,
    /// A digit was consumed before the decimal point
    had_int_digits: bool,
}

/// Classifier built on the shared automaton engine
pub struct NumberVariableClassifier {
    graph: StateGraph,
    ready: StateId,
    negative: StateId,
    d1: StateId,
    d2: StateId,
    dot: StateId,
    sci: StateId,
    variable: StateId,
    nary: StateId,
    fullname: StateId,
}

fn is_digit(c: char) -> bool {
    numerals::digit_glyph_value(c).is_some()
}

impl NumberVariableClassifier {
    pub fn new() -> Self {
        let mut b = GraphBuilder::new();
        let ready = b.state("Ready");
        let negative = b.state("Negative");
        let d1 = b.state("D1");
        let d2 = b.state("D2");
        let dot = b.state("Dot");
        let sci = b.state("Scientific");
        let variable = b.state("Variable");
        let nary = b.state("Nary");
        let fullname = b.state("FullName");

        b.delta(ready, |c| c == NEGATIVE, negative);
        b.delta(ready, |c| c == DECIMAL_POINT, dot);
        b.delta(ready, is_digit, d1);
        b.delta(ready, numerals::is_place_marker, fullname);
        b.delta(ready, |_| true, variable);

        b.delta(negative, is_digit, d1);
        b.delta(negative, |c| c == DECIMAL_POINT, dot);
        b.delta(negative, numerals::is_place_marker, fullname);
        b.delta(negative, |_| true, variable);

        for state in [d1, d2] {
            b.delta(state, is_digit, d2);
            b.delta(state, |c| c == DECIMAL_POINT, dot);
            b.delta(state, |c| c == EXPONENT, sci);
            b.delta(state, |c| c == RADIX_MARKER, nary);
            b.delta(state, numerals::is_place_marker, fullname);
            b.delta(state, |_| true, variable);
        }

        b.delta(dot, is_digit, dot);
        b.delta(dot, |c| c == EXPONENT, sci);
        b.delta(dot, |_| true, variable);

        b.delta(sci, is_digit, sci);
        b.delta(sci, |c| c == NEGATIVE, sci);
        b.delta(sci, |_| true, variable);

        b.delta(variable, |_| true, variable);

        b.delta(nary, |c| numerals::radix_glyph_value(c).is_some(), nary);
        b.delta(nary, |_| true, variable);

        b.delta(fullname, is_digit, fullname);
        b.delta(fullname, numerals::is_place_marker, fullname);
        b.delta(fullname, |_| true, variable);

        Self {
            graph: b.build(),
            ready,
            negative,
            d1,
            d2,
            dot,
            sci,
            variable,
            nary,
            fullname,
        }
    }

    /// Classify every raw run in the piece sequence
    pub fn classify(&self, pieces: Vec<Piece>) -> Result<Vec<Piece>, LexError> {
        let mut out = Vec::with_capacity(pieces.len());
        let mut ctx = RunContext::default();
        let mut state = self.ready;

        for piece in pieces {
            match piece {
                Piece::Raw(c) => {
                    let prev = state;
                    state = self.graph.transition(state, c)?;
                    self.bookkeep(prev, state, c, &mut ctx)?;
                    ctx.buf.push(c);
                }
                boundary => {
                    if let Some(token) = self.close(state, &mut ctx)? {
                        out.push(Piece::Tok(token));
                    }
                    state = self.ready;
                    out.push(boundary);
                }
            }
        }

        if let Some(token) = self.close(state, &mut ctx)? {
            out.push(Piece::Tok(token));
        }

        Ok(out)
    }

    /// Context updates and eager validity checks for one transition
    fn bookkeep(
        &self,
        prev: StateId,
        next: StateId,
        c: char,
        ctx: &mut RunContext,
    ) -> Result<(), LexError> {
        if next == self.d1 || next == self.d2 {
            ctx.had_int_digits = true;
            ctx.int_digits.push(c);
        }

        if next == self.nary && (prev == self.d1 || prev == self.d2) {
            // The radix marker itself: the digits so far name the base
            let mut base: u32 = 0;
            for glyph in ctx.int_digits.chars() {
                let d = numerals::digit_glyph_value(glyph).unwrap_or(0) as u32;
                base = base * 10 + d;
            }
            if !(MIN_DECLARED_RADIX..=MAX_DECLARED_RADIX).contains(&base) {
                return Err(NumeralError::InvalidRadix { base }.into());
            }
            ctx.base = Some(base);
        } else if next == self.nary && prev == self.nary {
            let base = ctx.base.unwrap_or(MAX_DECLARED_RADIX);
            let value = numerals::radix_glyph_value(c).unwrap_or(u32::MAX);
            if value >= base {
                return Err(NumeralError::DigitTooLarge {
                    glyph: c,
                    value,
                    base,
                }
                .into());
            }
            ctx.radix_digits += 1;
        }

        Ok(())
    }

    /// Close the pending run at a token boundary
    fn close(&self, state: StateId, ctx: &mut RunContext) -> Result<Option<Token>, LexError> {
        let run = std::mem::take(ctx);
        let text = run.buf;

        let token = if state == self.ready {
            None
        } else if state == self.variable || state == self.negative {
            Some(Token::Variable(text))
        } else if state == self.d1 || state == self.d2 {
            Some(Token::Number {
                text,
                format: NumberFormat::Arabic,
            })
        } else if state == self.dot {
            Some(Token::Number {
                format: if run.had_int_digits {
                    NumberFormat::Arabic
                } else {
                    NumberFormat::ShorthandArabic
                },
                text,
            })
        } else if state == self.sci {
            Some(Token::Number {
                text,
                format: NumberFormat::Scientific,
            })
        } else if state == self.nary {
            if run.radix_digits == 0 {
                return Err(NumeralError::EmptyRadixDigits { text }.into());
            }
            // Full validation; render is repeated later from the token text
            numerals::render_radix(&text)?;
            Some(Token::Number {
                text,
                format: NumberFormat::RadixDeclared,
            })
        } else if state == self.fullname {
            numerals::render_full_name(&text)?;
            Some(Token::Number {
                text,
                format: NumberFormat::FullName,
            })
        } else {
            None
        };

        Ok(token)
    }
}

impl Default for NumberVariableClassifier {
    fn default() -> Self {
        Self::new()
    }
}
