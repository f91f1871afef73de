//! Line assembly helpers: structural rewrites and the spacing policy
//!
//! The converter renders tokens left to right; this module owns the
//! decisions that shape the final text: the forced base-class injection on
//! class headers, the one-space rule between adjacent renderings, and the
//! trailing-comment layout.

use crate::config::constants::compile_time::conversion::BASE_CLASS;
use crate::tables::Tables;
use crate::tokens::Token;

/// Rewrite a class header so every class inherits the common base type
///
/// With an explicit base list the base type becomes its first element;
/// without one, a synthetic single-element list follows the class name.
pub fn inject_base_class(tokens: &mut Vec<Token>, tables: &Tables) {
    let is_class = matches!(
        tokens.get(1),
        Some(Token::ReservedWord(raw)) if tables.reserved_host(raw) == Some("class")
    );
    if !is_class || tokens.len() < 4 {
        return;
    }

    let has_base_list = matches!(
        tokens.get(3),
        Some(Token::Symbol(raw)) if tables.symbol_host(raw) == Some("(")
    );
    if has_base_list {
        tokens.insert(4, Token::Injected(format!("{}, ", BASE_CLASS)));
    } else {
        tokens.insert(3, Token::Injected(format!("({})", BASE_CLASS)));
    }
}

/// Whether one space belongs between two adjacent renderings
///
/// Injected text never participates; the pair ("else", ":") is never
/// spaced; a rendered ":" or "," always forces a following space; otherwise
/// either side being in the always-needs-space set decides.
pub fn needs_space_between(
    tables: &Tables,
    left_token: &Token,
    left: &str,
    right_token: &Token,
    right: &str,
) -> bool {
    if left_token.is_injected() || right_token.is_injected() {
        return false;
    }
    if left == "else" && right == ":" {
        return false;
    }
    if left == ":" || left == "," {
        return true;
    }
    tables.needs_space(left) || tables.needs_space(right)
}

/// Append a trailing comment: two spaces of separation after code, flush
/// after the indentation on a comment-only line
pub fn append_comment(out: &mut String, comment: &str) {
    if !out.trim().is_empty() {
        out.push_str("  ");
    }
    out.push('#');
    out.push_str(comment);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws() -> Token {
        Token::Whitespace(String::new())
    }

    fn end() -> Token {
        Token::End { comment: None }
    }

    #[test]
    fn class_without_base_list_gets_synthetic_one() {
        let tables = Tables::new();
        let mut tokens = vec![
            ws(),
            Token::ReservedWord("种类".into()),
            Token::Variable("人".into()),
            Token::Symbol(":".into()),
            end(),
        ];
        inject_base_class(&mut tokens, &tables);
        assert_eq!(tokens[3], Token::Injected("(HanObject)".into()));
        assert_eq!(tokens[4], Token::Symbol(":".into()));
    }

    #[test]
    fn class_with_base_list_gets_first_element() {
        let tables = Tables::new();
        let mut tokens = vec![
            ws(),
            Token::ReservedWord("种类".into()),
            Token::Variable("人".into()),
            Token::Symbol("（".into()),
            Token::Variable("动物".into()),
            Token::Symbol("）".into()),
            Token::Symbol(":".into()),
            end(),
        ];
        inject_base_class(&mut tokens, &tables);
        assert_eq!(tokens[4], Token::Injected("HanObject, ".into()));
        assert_eq!(tokens[5], Token::Variable("动物".into()));
    }

    #[test]
    fn non_class_lines_are_untouched() {
        let tables = Tables::new();
        let mut tokens = vec![
            ws(),
            Token::ReservedWord("定义".into()),
            Token::Variable("走".into()),
            Token::Symbol(":".into()),
            end(),
        ];
        let before = tokens.clone();
        inject_base_class(&mut tokens, &tables);
        assert_eq!(tokens, before);
    }

    #[test]
    fn operators_are_spaced_on_both_sides() {
        let tables = Tables::new();
        let var = Token::Variable("甲".into());
        let sym = Token::Symbol("加".into());
        assert!(needs_space_between(&tables, &var, "jiǎ", &sym, "+"));
        assert!(needs_space_between(&tables, &sym, "+", &var, "jiǎ"));
    }

    #[test]
    fn plain_adjacency_is_not_spaced() {
        let tables = Tables::new();
        let var = Token::Variable("甲".into());
        let paren = Token::Symbol("（".into());
        assert!(!needs_space_between(&tables, &var, "jiǎ", &paren, "("));
    }

    #[test]
    fn else_colon_is_never_spaced() {
        let tables = Tables::new();
        let word = Token::ReservedWord("否则".into());
        let colon = Token::Symbol(":".into());
        assert!(!needs_space_between(&tables, &word, "else", &colon, ":"));
    }

    #[test]
    fn colon_and_comma_force_a_following_space() {
        let tables = Tables::new();
        let colon = Token::Symbol(":".into());
        let comma = Token::Symbol(",".into());
        let var = Token::Variable("甲".into());
        assert!(needs_space_between(&tables, &colon, ":", &var, "jiǎ"));
        assert!(needs_space_between(&tables, &comma, ",", &var, "jiǎ"));
    }

    #[test]
    fn injected_text_is_invisible_to_spacing() {
        let tables = Tables::new();
        let injected = Token::Injected("(HanObject)".into());
        let colon = Token::Symbol(":".into());
        let name = Token::Variable("人".into());
        assert!(!needs_space_between(&tables, &name, "rén", &injected, "(HanObject)"));
        assert!(!needs_space_between(&tables, &injected, "(HanObject)", &colon, ":"));
    }

    #[test]
    fn comment_layout() {
        let mut code = "x = 1".to_string();
        append_comment(&mut code, "说明");
        assert_eq!(code, "x = 1  #说明");

        let mut indent_only = "  ".to_string();
        append_comment(&mut indent_only, "只有说明");
        assert_eq!(indent_only, "  #只有说明");
    }
}
