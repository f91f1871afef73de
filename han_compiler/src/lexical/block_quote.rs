//! Multi-line string scanner
//!
//! Recognizes the triple-quote delimiter `“““ … ”””`, which may open and
//! close on one line or span many. The scanner is stateless across lines
//! except for the `still_inside` flag its caller must thread into the next
//! call, the only cross-line coupling in the scanner layer.

use crate::automata::{GraphBuilder, StateGraph, StateId};
use crate::lexical::{LexError, Piece};
use crate::tables::{CLOSE_QUOTE, COMMENT, ESCAPE, OPEN_QUOTE};
use crate::tokens::Token;

/// Result of scanning one line
#[derive(Debug)]
pub struct BlockScan {
    pub pieces: Vec<Piece>,
    /// True when the line ended inside an unclosed multi-line string;
    /// must be passed as `resume_inside` for the following line
    pub still_inside: bool,
}

/// Triple-quote scanner built on the shared automaton engine
pub struct BlockQuoteScanner {
    graph: StateGraph,
    start: StateId,
    open1: StateId,
    open2: StateId,
    inside: StateId,
    escape: StateId,
    close1: StateId,
    close2: StateId,
    comment: StateId,
}

impl BlockQuoteScanner {
    pub fn new() -> Self {
        let mut b = GraphBuilder::new();
        let start = b.state("Start");
        let open1 = b.state("Open1");
        let open2 = b.state("Open2");
        let inside = b.state("Inside");
        let escape = b.state("Escape");
        let close1 = b.state("Close1");
        let close2 = b.state("Close2");
        let comment = b.state("Comment");

        b.delta(start, |c| c == COMMENT, comment);
        b.delta(start, |c| c == OPEN_QUOTE, open1);
        b.delta(start, |_| true, start);

        b.delta(open1, |c| c == OPEN_QUOTE, open2);
        b.delta(open1, |_| true, start);

        b.delta(open2, |c| c == OPEN_QUOTE, inside);
        b.delta(open2, |_| true, start);

        b.delta(inside, |c| c == ESCAPE, escape);
        b.delta(inside, |c| c == CLOSE_QUOTE, close1);
        b.delta(inside, |_| true, inside);

        b.delta(escape, |_| true, inside);

        b.delta(close1, |c| c == CLOSE_QUOTE, close2);
        b.delta(close1, |_| true, inside);

        b.delta(close2, |c| c == CLOSE_QUOTE, start);
        b.delta(close2, |_| true, inside);

        b.delta(comment, |_| true, comment);

        Self {
            graph: b.build(),
            start,
            open1,
            open2,
            inside,
            escape,
            close1,
            close2,
            comment,
        }
    }

    /// Scan one line, replacing every recognized span with a MultilineStr
    /// token. A tail still open at end of line collapses into one token and
    /// sets `still_inside`.
    pub fn scan(&self, pieces: Vec<Piece>, resume_inside: bool) -> Result<BlockScan, LexError> {
        let mut out = Vec::with_capacity(pieces.len());
        let mut buf = String::new();
        let mut state = if resume_inside { self.inside } else { self.start };

        for piece in pieces {
            let c = match piece {
                Piece::Raw(c) => c,
                other => {
                    // Block scanning runs first; already-built tokens only
                    // pass through untouched
                    out.push(other);
                    continue;
                }
            };

            let prev = state;
            state = self.graph.transition(state, c)?;

            if state == self.comment {
                out.push(Piece::Raw(c));
            } else if state == self.start {
                if prev == self.open1 || prev == self.open2 {
                    // The opening run fell short of three quotes
                    for pending in buf.drain(..) {
                        out.push(Piece::Raw(pending));
                    }
                    out.push(Piece::Raw(c));
                } else if prev == self.close2 {
                    buf.push(c);
                    out.push(Piece::Tok(Token::MultilineStr(std::mem::take(&mut buf))));
                } else {
                    out.push(Piece::Raw(c));
                }
            } else {
                buf.push(c);
            }
        }

        if state == self.open1 || state == self.open2 {
            for pending in buf.drain(..) {
                out.push(Piece::Raw(pending));
            }
            state = self.start;
        }

        let still_inside = state == self.inside
            || state == self.escape
            || state == self.close1
            || state == self.close2;
        if still_inside {
            // Everything consumed while inside belongs to the span, even an
            // empty resume line
            out.push(Piece::Tok(Token::MultilineStr(buf)));
        }

        Ok(BlockScan {
            pieces: out,
            still_inside,
        })
    }
}

impl Default for BlockQuoteScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_string(pieces: &[Piece]) -> String {
        pieces
            .iter()
            .map(|p| match p {
                Piece::Raw(c) => c.to_string(),
                Piece::Tok(t) => t.raw_text().to_string(),
                Piece::Consumed => String::new(),
            })
            .collect()
    }

    fn scan(line: &str, inside: bool) -> BlockScan {
        BlockQuoteScanner::new()
            .scan(Piece::from_line(line), inside)
            .unwrap()
    }

    #[test]
    fn line_without_quotes_passes_through() {
        let result = scan("种类人:", false);
        assert!(!result.still_inside);
        assert!(result.pieces.iter().all(Piece::is_raw));
    }

    #[test]
    fn same_line_open_and_close() {
        let result = scan("“““文档”””", false);
        assert!(!result.still_inside);
        assert_eq!(result.pieces.len(), 1);
        assert_eq!(
            result.pieces[0],
            Piece::Tok(Token::MultilineStr("“““文档”””".to_string()))
        );
    }

    #[test]
    fn single_quotes_are_left_for_the_string_scanner() {
        let result = scan("我是“你好”", false);
        assert!(!result.still_inside);
        assert!(result.pieces.iter().all(Piece::is_raw));
        assert_eq!(raw_string(&result.pieces), "我是“你好”");
    }

    #[test]
    fn two_line_span_concatenates_to_the_original() {
        let first = scan("定义“““文档开始", false);
        assert!(first.still_inside);
        let tail = first.pieces.last().unwrap();
        assert_eq!(tail, &Piece::Tok(Token::MultilineStr("“““文档开始".to_string())));

        let second = scan("文档结束”””", true);
        assert!(!second.still_inside);
        assert_eq!(
            second.pieces[0],
            Piece::Tok(Token::MultilineStr("文档结束”””".to_string()))
        );

        let rejoined = format!(
            "{}\n{}",
            raw_string(&first.pieces),
            raw_string(&second.pieces)
        );
        assert_eq!(rejoined, "定义“““文档开始\n文档结束”””");
    }

    #[test]
    fn middle_line_of_a_span_is_one_token() {
        let result = scan("中间一行", true);
        assert!(result.still_inside);
        assert_eq!(result.pieces.len(), 1);
        assert_eq!(
            result.pieces[0],
            Piece::Tok(Token::MultilineStr("中间一行".to_string()))
        );
    }

    #[test]
    fn escape_consumes_the_closing_quote() {
        let result = scan("“““a\\”””", false);
        // The escaped ” is content, so only two closing quotes follow and
        // the span stays open
        assert!(result.still_inside);
    }

    #[test]
    fn comment_region_is_never_scanned() {
        let result = scan("#“““这不是文档", false);
        assert!(!result.still_inside);
        assert!(result.pieces.iter().all(Piece::is_raw));
    }

    #[test]
    fn quotes_inside_comment_after_code() {
        let result = scan("一 #“““", false);
        assert!(!result.still_inside);
        assert!(result.pieces.iter().all(Piece::is_raw));
    }

    #[test]
    fn partial_close_run_stays_inside() {
        let result = scan("””", true);
        assert!(result.still_inside);
        assert_eq!(
            result.pieces[0],
            Piece::Tok(Token::MultilineStr("””".to_string()))
        );
    }
}
