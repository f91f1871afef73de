//! Session-scoped identifier transliteration
//!
//! Every ideographic identifier spelling maps to exactly one rendered host
//! name for the lifetime of a conversion session, and no two spellings may
//! share a rendered name. Both directions are kept so collisions can be
//! detected when a new spelling transliterates onto a taken name.

use pinyin::ToPinyin;
use std::collections::HashMap;

/// Glyph rendered as an underscore, allowing dunder-style names
const UNDERSCORE_GLYPH: char = '艹';

/// Builtin aliases provided by the han_runtime support module
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("艹艹初始艹艹", "__chūshǐ__"),
    ("自己", "zìjǐ"),
    ("都", "dōu"),
    ("任何", "rènhé"),
    ("打印", "dǎyìn"),
];

/// Mutually-inverse spelling maps owned by one conversion session
#[derive(Debug, Clone)]
pub struct IdentifierMap {
    to_host: HashMap<String, String>,
    to_source: HashMap<String, String>,
}

impl IdentifierMap {
    /// A fresh per-session map holding only the builtin aliases
    pub fn new() -> Self {
        let mut map = Self {
            to_host: HashMap::new(),
            to_source: HashMap::new(),
        };
        for (source, host) in BUILTIN_ALIASES {
            map.insert(source.to_string(), host.to_string());
        }
        map
    }

    fn insert(&mut self, source: String, host: String) {
        self.to_source.insert(host.clone(), source.clone());
        self.to_host.insert(source, host);
    }

    /// Rendered name for a spelling, creating and recording it on first use
    ///
    /// Renders identically for every later occurrence of the same spelling
    /// and never reuses a name already held by a different spelling.
    pub fn render(&mut self, source: &str) -> String {
        if let Some(existing) = self.to_host.get(source) {
            return existing.clone();
        }

        let base = transliterate(source);
        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while self.to_source.contains_key(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.insert(source.to_string(), candidate.clone());
        candidate
    }

    /// Rendered name for a spelling, if the session has seen it
    pub fn lookup(&self, source: &str) -> Option<&str> {
        self.to_host.get(source).map(String::as_str)
    }

    /// Source spelling behind a rendered name, if any
    pub fn lookup_source(&self, host: &str) -> Option<&str> {
        self.to_source.get(host).map(String::as_str)
    }

    /// Number of known spellings, builtin aliases included
    pub fn len(&self) -> usize {
        self.to_host.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_host.is_empty()
    }
}

impl Default for IdentifierMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-character transliteration: Han glyphs become tone-marked pinyin,
/// 艹 becomes an underscore, anything else passes through verbatim
fn transliterate(source: &str) -> String {
    let mut out = String::new();
    for glyph in source.chars() {
        if glyph == UNDERSCORE_GLYPH {
            out.push('_');
        } else if let Some(p) = glyph.to_pinyin() {
            out.push_str(p.with_tone());
        } else {
            out.push(glyph);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_aliases_are_seeded() {
        let mut map = IdentifierMap::new();
        assert_eq!(map.render("自己"), "zìjǐ");
        assert_eq!(map.render("打印"), "dǎyìn");
        assert_eq!(map.render("艹艹初始艹艹"), "__chūshǐ__");
    }

    #[test]
    fn rendering_is_stable_within_a_session() {
        let mut map = IdentifierMap::new();
        let first = map.render("人");
        let second = map.render("人");
        assert_eq!(first, second);
        assert_eq!(first, "rén");
    }

    #[test]
    fn multi_glyph_spellings_concatenate() {
        let mut map = IdentifierMap::new();
        assert_eq!(map.render("第一"), "dìyī");
    }

    #[test]
    fn underscore_glyph_and_ascii_pass_through() {
        let mut map = IdentifierMap::new();
        assert_eq!(map.render("艹人"), "_rén");
        assert_eq!(map.render("x人"), "xrén");
    }

    #[test]
    fn homophones_get_collision_suffixes() {
        let mut map = IdentifierMap::new();
        let ta1 = map.render("他");
        let ta2 = map.render("她");
        let ta3 = map.render("它");
        assert_eq!(ta1, "tā");
        assert_eq!(ta2, "tā2");
        assert_eq!(ta3, "tā3");
        // Stability still holds per spelling
        assert_eq!(map.render("她"), "tā2");
    }

    #[test]
    fn distinct_spellings_never_share_a_name() {
        let mut map = IdentifierMap::new();
        let names: Vec<String> = ["他", "她", "它", "塔", "人", "第一"]
            .iter()
            .map(|s| map.render(s))
            .collect();
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn reverse_lookup_stays_inverse() {
        let mut map = IdentifierMap::new();
        let rendered = map.render("人");
        assert_eq!(map.lookup_source(&rendered), Some("人"));
        assert_eq!(map.lookup("人"), Some(rendered.as_str()));
    }
}
