//! Translation tables: symbols, reserved words, spacing policy
//!
//! All tables are immutable configuration built once by `Tables::new()` and
//! passed into the tokenizer and renderer. Symbol and reserved-word entries
//! are held longest-key-first so greedy matching can never split a compound
//! operator into shorter ones.

use std::collections::HashSet;

/// Opening quote glyph for strings
pub const OPEN_QUOTE: char = '“';
/// Closing quote glyph for strings
pub const CLOSE_QUOTE: char = '”';
/// Escape character inside strings
pub const ESCAPE: char = '\\';
/// Comment marker; everything after it on a line is passed through verbatim
pub const COMMENT: char = '#';

/// Symbol table: ideographic key → host text, matched anywhere in a line
const SYMBOLS: &[(&str, &str)] = &[
    // Punctuation and grouping
    ("的", "."),
    ("（", "("),
    ("）", ")"),
    ("【", "["),
    ("】", "]"),
    ("「", "{"),
    ("」", "}"),
    ("：", ":"),
    ("，", ","),
    (":", ":"),
    (",", ","),
    ("(", "("),
    (")", ")"),
    ("[", "["),
    ("]", "]"),
    ("{", "{"),
    ("}", "}"),

    // Assignment
    ("是", "="),

    // Arithmetic operations
    ("加", "+"),
    ("减", "-"),
    ("乘", "*"),
    ("除", "/"),
    ("整除", "//"),
    ("幂", "**"),
    ("模", "%"),
    ("加是", "+="),
    ("减是", "-="),
    ("乘是", "*="),
    ("除是", "/="),
    ("整除是", "//="),
    ("幂是", "**="),
    ("模是", "%="),

    // Binary operations
    ("位不", "~"),
    ("位和", "&"),
    ("位和是", "&="),
    ("位或", "|"),
    ("位或是", "|="),
    ("异或", "^"),
    ("异或是", "^="),
    ("位右", ">>"),
    ("位右是", ">>="),
    ("左移", "<<"),
    ("位左是", "<<="),

    // Comparators
    ("大于", ">"),
    ("大等于", ">="),
    ("等于", "=="),
    ("不等于", "!="),
    ("小等于", "<="),
    ("小于", "<"),

    // Word operators and literals, legal anywhere in a line
    ("和", "and"),
    ("或", "or"),
    ("不", "not"),
    ("里", "in"),
    ("真", "True"),
    ("假", "False"),
    ("无", "None"),
    ("进口", "import"),
];

/// Reserved statement words, matched only at the start of a line
const RESERVED_WORDS: &[(&str, &str)] = &[
    ("种类", "class"),
    ("定义", "def"),
    ("如果", "if"),
    ("否则如果", "elif"),
    ("否则", "else"),
    ("每", "for"),
    ("当", "while"),
    ("从", "from"),
    ("进口", "import"),
    ("返回", "return"),
    ("尝试", "try"),
    ("除了", "except"),
    ("最后", "finally"),
    ("与", "with"),
    ("全局", "global"),
    ("非局部", "nonlocal"),
    ("通过", "pass"),
    ("跳出", "break"),
    ("继续", "continue"),
    ("提出", "raise"),
    ("断言", "assert"),
    ("删除", "del"),
    ("让出", "yield"),
];

/// Host renderings that always take a space on both sides
const NEEDS_SPACE: &[&str] = &[
    // Assignment and augmented assignment
    "=", "+=", "-=", "*=", "/=", "//=", "**=", "%=", "&=", "|=", "^=", ">>=", "<<=",
    // Arithmetic
    "+", "-", "*", "/", "//", "**", "%",
    // Bitwise
    "&", "|", "^", ">>", "<<",
    // Comparison
    ">", ">=", "==", "!=", "<=", "<",
    // Word operators
    "and", "or", "not", "in",
    // Statement keywords
    "class", "def", "if", "elif", "else", "for", "while", "from", "import",
    "return", "try", "except", "finally", "with", "global", "nonlocal",
    "raise", "assert", "del", "yield",
];

/// Immutable lookup tables shared by the tokenizer and renderer
pub struct Tables {
    symbols: Vec<(&'static str, &'static str)>,
    reserved: Vec<(&'static str, &'static str)>,
    needs_space: HashSet<&'static str>,
}

impl Tables {
    pub fn new() -> Self {
        let mut symbols = SYMBOLS.to_vec();
        symbols.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then(a.0.cmp(b.0))
        });

        let mut reserved = RESERVED_WORDS.to_vec();
        reserved.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then(a.0.cmp(b.0))
        });

        Self {
            symbols,
            reserved,
            needs_space: NEEDS_SPACE.iter().copied().collect(),
        }
    }

    /// Symbol keys, longest first, for greedy substitution
    pub fn symbols(&self) -> &[(&'static str, &'static str)] {
        &self.symbols
    }

    /// Reserved statement words, longest first
    pub fn reserved_words(&self) -> &[(&'static str, &'static str)] {
        &self.reserved
    }

    /// Host rendering of a symbol key
    pub fn symbol_host(&self, raw: &str) -> Option<&'static str> {
        self.symbols
            .iter()
            .find(|(key, _)| *key == raw)
            .map(|(_, host)| *host)
    }

    /// Host rendering of a reserved word key
    pub fn reserved_host(&self, raw: &str) -> Option<&'static str> {
        self.reserved
            .iter()
            .find(|(key, _)| *key == raw)
            .map(|(_, host)| *host)
    }

    /// Whether a rendering belongs to the always-needs-space set
    pub fn needs_space(&self, rendering: &str) -> bool {
        self.needs_space.contains(rendering)
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}
