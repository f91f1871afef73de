//! Single-line string scanner
//!
//! Complete `“ … ”` spans become Str tokens. Unlike multi-line strings, a
//! single-line string may never survive past end of line; doing so is the
//! unterminated-quote failure.

use crate::automata::{GraphBuilder, StateGraph, StateId};
use crate::lexical::{LexError, Piece};
use crate::tables::{CLOSE_QUOTE, COMMENT, ESCAPE, OPEN_QUOTE};
use crate::tokens::Token;

/// Quote scanner built on the shared automaton engine
pub struct QuoteScanner {
    graph: StateGraph,
    start: StateId,
    inside: StateId,
    escape: StateId,
    comment: StateId,
}

impl QuoteScanner {
    pub fn new() -> Self {
        let mut b = GraphBuilder::new();
        let start = b.state("Start");
        let inside = b.state("Inside");
        let escape = b.state("Escape");
        let comment = b.state("Comment");

        b.delta(start, |c| c == COMMENT, comment);
        b.delta(start, |c| c == OPEN_QUOTE, inside);
        b.delta(start, |_| true, start);

        b.delta(inside, |c| c == ESCAPE, escape);
        b.delta(inside, |c| c == CLOSE_QUOTE, start);
        b.delta(inside, |_| true, inside);

        b.delta(escape, |_| true, inside);

        b.delta(comment, |_| true, comment);

        Self {
            graph: b.build(),
            start,
            inside,
            escape,
            comment,
        }
    }

    /// Scan one line, replacing complete quote spans with Str tokens
    pub fn scan(&self, pieces: Vec<Piece>) -> Result<Vec<Piece>, LexError> {
        let mut out = Vec::with_capacity(pieces.len());
        let mut buf = String::new();
        let mut state = self.start;

        for piece in pieces {
            let c = match piece {
                Piece::Raw(c) => c,
                other => {
                    if state == self.start || state == self.comment {
                        out.push(other);
                        continue;
                    }
                    // A multi-line delimiter opened inside a single-line
                    // string can never terminate it
                    return Err(LexError::UnterminatedString);
                }
            };

            let prev = state;
            state = self.graph.transition(state, c)?;

            if state == self.comment {
                out.push(Piece::Raw(c));
            } else if state == self.start {
                if prev == self.inside {
                    buf.push(c);
                    out.push(Piece::Tok(Token::Str(std::mem::take(&mut buf))));
                } else {
                    out.push(Piece::Raw(c));
                }
            } else {
                buf.push(c);
            }
        }

        if state == self.inside || state == self.escape {
            return Err(LexError::UnterminatedString);
        }

        Ok(out)
    }
}

impl Default for QuoteScanner {
    fn default() -> Self {
        Self::new()
    }
}
