//! File converter: one session, one identifier namespace
//!
//! A `Converter` owns everything a conversion session shares: the
//! translation tables, the tokenizer with its cross-line string flag, the
//! identifier maps, and the visited-file set. Importing a module is a
//! nested, blocking call back into `convert`, so every file touched by one
//! top-level invocation sees the same identifier namespace. A fresh
//! `Converter` must be built per independent invocation.

pub mod error;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assembler;
use crate::config::constants::compile_time::conversion::{
    DEST_EXTENSION, MAX_IMPORT_DEPTH, PRELUDE_LINE, SOURCE_EXTENSION,
};
use crate::config::runtime::ConversionPreferences;
use crate::file_processor::{self, SourceFile};
use crate::identifiers::IdentifierMap;
use crate::lexical::LineTokenizer;
use crate::logging::codes;
use crate::tables::Tables;
use crate::tokens::{RenderError, Token};
use crate::{log_debug, log_success};

pub use error::ConvertError;

/// What happened to one conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionOutcome {
    Converted { dest: String, lines: usize },
    /// The path was already converted earlier in this session
    SkippedAlreadyConverted,
    /// The destination is newer than the source and the converter
    SkippedUpToDate,
}

/// One conversion session
pub struct Converter {
    tables: Tables,
    tokenizer: LineTokenizer,
    idents: IdentifierMap,
    visited: HashSet<PathBuf>,
    preferences: ConversionPreferences,
    depth: usize,
}

impl Converter {
    pub fn new() -> Self {
        Self::with_preferences(ConversionPreferences::default())
    }

    pub fn with_preferences(preferences: ConversionPreferences) -> Self {
        // Indentation options are accepted and reported but rendering still
        // emits source indentation verbatim
        log_debug!("Session preferences",
            "force_update" => preferences.force_update,
            "spaces_per_indent" => preferences.spaces_per_indent,
            "use_tabs" => preferences.use_tabs
        );
        Self {
            tables: Tables::new(),
            tokenizer: LineTokenizer::new(),
            idents: IdentifierMap::new(),
            visited: HashSet::new(),
            preferences,
            depth: 0,
        }
    }

    /// The session identifier map, mainly for inspection in tests and tools
    pub fn identifiers(&self) -> &IdentifierMap {
        &self.idents
    }

    /// Convert one source file, recursing into any modules it imports
    pub fn convert(&mut self, source: &Path, dest: &Path) -> Result<ConversionOutcome, ConvertError> {
        let (source, dest) = self.apply_prefix(source, dest);
        let source = source.as_path();
        let dest = dest.as_path();

        let key = fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        if self.visited.contains(&key) {
            log_debug!("Already converted this session", "file" => source.display());
            return Ok(ConversionOutcome::SkippedAlreadyConverted);
        }
        self.visited.insert(key);

        if dest.exists()
            && !self.preferences.force_update
            && file_processor::destination_up_to_date(source, dest)
        {
            log_success!(codes::success::CONVERSION_SKIPPED,
                "Destination already up to date",
                "source" => source.display(),
                "dest" => dest.display()
            );
            return Ok(ConversionOutcome::SkippedUpToDate);
        }

        if self.depth >= MAX_IMPORT_DEPTH {
            return Err(ConvertError::ImportDepthExceeded {
                depth: self.depth,
                max: MAX_IMPORT_DEPTH,
            });
        }

        let source_file = file_processor::read_source(source)?;

        // The tokenizer is shared with nested conversions; park this file's
        // multi-line string state for the duration
        let saved_inside = self.tokenizer.still_inside();
        self.tokenizer.reset();
        self.depth += 1;

        let result = self.convert_lines(&source_file);

        self.depth -= 1;
        self.tokenizer.set_inside(saved_inside);

        let output = result?;
        fs::write(dest, output).map_err(|e| ConvertError::DestinationWrite {
            path: dest.display().to_string(),
            message: e.to_string(),
        })?;

        log_success!(codes::success::CONVERSION_COMPLETE,
            "Conversion finished",
            "source" => source.display(),
            "dest" => dest.display(),
            "lines" => source_file.metadata.line_count
        );

        Ok(ConversionOutcome::Converted {
            dest: dest.display().to_string(),
            lines: source_file.metadata.line_count,
        })
    }

    /// Render the whole destination text in memory; nothing touches disk
    /// until every line (and every nested import) has succeeded
    fn convert_lines(&mut self, source_file: &SourceFile) -> Result<String, ConvertError> {
        let file_label = source_file.metadata.path.display().to_string();
        let dir = source_file
            .metadata
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let mut output = String::with_capacity(source_file.source.len() * 2);
        output.push_str(PRELUDE_LINE);
        output.push('\n');

        for (index, line) in source_file.source.lines().enumerate() {
            let line_no = index + 1;
            let tokens = self
                .tokenizer
                .tokenize_line(&self.tables, line)
                .map_err(|e| ConvertError::Lex {
                    source: e,
                    file: file_label.clone(),
                    line: line_no,
                })?;
            let rendered = self.render_line(tokens, &dir, &file_label, line_no)?;
            output.push_str(&rendered);
            output.push('\n');
        }

        Ok(output)
    }

    /// Assemble one token sequence into host text, resolving imports as
    /// they are discovered
    fn render_line(
        &mut self,
        mut tokens: Vec<Token>,
        dir: &Path,
        file: &str,
        line_no: usize,
    ) -> Result<String, ConvertError> {
        assembler::inject_base_class(&mut tokens, &self.tables);

        let n = tokens.len();
        let mut cache: Vec<Option<String>> = vec![None; n];
        let mut out = self.render_at(&tokens, &mut cache, 0, file, line_no)?;
        let mut seen_from = false;

        for i in 1..n.saturating_sub(1) {
            let piece = self.render_at(&tokens, &mut cache, i, file, line_no)?;

            if i == n - 2 {
                out.push_str(&piece);
                continue;
            }

            if piece == "from" || (!seen_from && piece == "import") {
                seen_from = piece == "from";
                if let Token::Variable(raw) = &tokens[i + 1] {
                    let target = self.render_at(&tokens, &mut cache, i + 1, file, line_no)?;
                    if raw != &target {
                        self.convert_import(dir, raw, &target)?;
                    }
                }
            } else if piece == "import" {
                seen_from = false;
            }

            out.push_str(&piece);

            let right = self.render_at(&tokens, &mut cache, i + 1, file, line_no)?;
            if assembler::needs_space_between(&self.tables, &tokens[i], &piece, &tokens[i + 1], &right)
            {
                out.push(' ');
            }
        }

        if let Some(Token::End {
            comment: Some(text),
        }) = tokens.last()
        {
            assembler::append_comment(&mut out, text);
        }

        Ok(out)
    }

    /// Render one token with memoization so session side effects (identifier
    /// registration) happen exactly once and in source order
    fn render_at(
        &mut self,
        tokens: &[Token],
        cache: &mut [Option<String>],
        index: usize,
        file: &str,
        line_no: usize,
    ) -> Result<String, ConvertError> {
        if let Some(existing) = &cache[index] {
            return Ok(existing.clone());
        }
        let rendered = tokens[index]
            .render(&self.tables, &mut self.idents)
            .map_err(|e: RenderError| ConvertError::Render {
                source: e,
                file: file.to_string(),
                line: line_no,
            })?;
        cache[index] = Some(rendered.clone());
        Ok(rendered)
    }

    /// Convert the module a from/import line references, before the line's
    /// own rendering proceeds
    fn convert_import(
        &mut self,
        dir: &Path,
        raw_name: &str,
        rendered_name: &str,
    ) -> Result<(), ConvertError> {
        let source = dir.join(format!("{}.{}", raw_name, SOURCE_EXTENSION));
        let dest = dir.join(format!("{}.{}", rendered_name, DEST_EXTENSION));

        if !source.exists() {
            return Err(ConvertError::MissingImportTarget {
                path: source.display().to_string(),
            });
        }

        log_debug!("Resolving imported module",
            "module" => raw_name,
            "source" => source.display()
        );
        self.convert(&source, &dest)?;
        log_success!(codes::success::IMPORT_RESOLVED,
            "Imported module converted",
            "module" => rendered_name
        );
        Ok(())
    }

    /// Join the configured working-directory prefix onto relative top-level
    /// paths; nested imports always resolve against the importing file
    fn apply_prefix(&self, source: &Path, dest: &Path) -> (PathBuf, PathBuf) {
        let prefix = &self.preferences.working_dir_prefix;
        if self.depth == 0 && !prefix.is_empty() {
            let base = Path::new(prefix);
            let source = if source.is_relative() {
                base.join(source)
            } else {
                source.to_path_buf()
            };
            let dest = if dest.is_relative() {
                base.join(dest)
            } else {
                dest.to_path_buf()
            };
            (source, dest)
        } else {
            (source.to_path_buf(), dest.to_path_buf())
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn parse_line(converter: &mut Converter, line: &str) -> String {
        let tokens = converter
            .tokenizer
            .tokenize_line(&Tables::new(), line)
            .unwrap();
        converter
            .render_line(tokens, Path::new("."), "test.han", 1)
            .unwrap()
    }

    #[test]
    fn class_without_base_list() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "种类人:"), "class rén(HanObject):");
    }

    #[test]
    fn class_with_base_list() {
        let mut converter = Converter::new();
        assert_eq!(
            parse_line(&mut converter, "种类人（动物）:"),
            "class rén(HanObject, dòngwù):"
        );
    }

    #[test]
    fn class_name_registers_in_the_session() {
        let mut converter = Converter::new();
        assert_eq!(converter.identifiers().lookup("人"), None);
        parse_line(&mut converter, "种类人:");
        assert_eq!(converter.identifiers().lookup("人"), Some("rén"));
    }

    #[test]
    fn basic_arithmetic() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "一加一"), "1 + 1");
    }

    #[test]
    fn numbers_as_identifier_heads_stay_identifiers() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "第一是一"), "dìyī = 1");
    }

    #[test]
    fn identifier_renders_identically_and_operators_are_spaced() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "甲是甲加一"), "jiǎ = jiǎ + 1");
    }

    #[test]
    fn else_line_is_tight() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "否则:"), "else:");
    }

    #[test]
    fn indentation_survives() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "  返回 真"), "  return True");
    }

    #[test]
    fn trailing_comment_is_separated() {
        let mut converter = Converter::new();
        assert_eq!(parse_line(&mut converter, "一加一 #说明"), "1 + 1  #说明");
    }

    #[test]
    fn string_line_round_trips_quotes() {
        let mut converter = Converter::new();
        assert_eq!(
            parse_line(&mut converter, "打印（“你好”）"),
            "dǎyìn(\"你好\")"
        );
    }

    #[test]
    fn convert_writes_prelude_and_lines() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("例.han");
        let dest = dir.path().join("例.py");
        fs::write(&source, "种类人:\n").unwrap();

        let mut converter = Converter::new();
        let outcome = converter.convert(&source, &dest).unwrap();
        assert_matches!(outcome, ConversionOutcome::Converted { lines: 1, .. });

        let output = fs::read_to_string(&dest).unwrap();
        assert_eq!(output, "from han_runtime import *\nclass rén(HanObject):\n");
    }

    #[test]
    fn second_conversion_of_the_same_path_is_a_no_op() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("甲.han");
        let dest = dir.path().join("甲.py");
        fs::write(&source, "一\n").unwrap();

        let mut converter = Converter::new();
        converter.convert(&source, &dest).unwrap();
        let second = converter.convert(&source, &dest).unwrap();
        assert_eq!(second, ConversionOutcome::SkippedAlreadyConverted);
    }

    #[test]
    fn import_line_converts_the_referenced_module() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("人人.han"), "我们是一\n").unwrap();
        let source = dir.path().join("主.han");
        let dest = dir.path().join("主.py");
        fs::write(&source, "从人人进口我们\n").unwrap();

        let mut converter = Converter::new();
        converter.convert(&source, &dest).unwrap();

        let main_output = fs::read_to_string(&dest).unwrap();
        assert_eq!(
            main_output,
            "from han_runtime import *\nfrom rénrén import wǒmen\n"
        );

        let module_output = fs::read_to_string(dir.path().join("rénrén.py")).unwrap();
        assert_eq!(
            module_output,
            "from han_runtime import *\nwǒmen = 1\n"
        );
    }

    #[test]
    fn imported_identifiers_share_the_session_namespace() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("他.han"), "她是一\n").unwrap();
        let source = dir.path().join("主.han");
        fs::write(&source, "从他进口她\n她是二\n").unwrap();

        let mut converter = Converter::new();
        converter
            .convert(&source, &dir.path().join("主.py"))
            .unwrap();

        // 她 was first rendered inside the imported module; the importing
        // file must agree with that rendering
        let main_output = fs::read_to_string(dir.path().join("主.py")).unwrap();
        let module_rendered = converter.identifiers().lookup("她").unwrap().to_string();
        assert!(main_output.contains(&format!("{} = 2", module_rendered)));
    }

    #[test]
    fn missing_import_target_fails_before_any_write() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("主.han");
        let dest = dir.path().join("主.py");
        fs::write(&source, "从没有进口什么\n").unwrap();

        let mut converter = Converter::new();
        let error = converter.convert(&source, &dest).unwrap_err();
        assert_matches!(error, ConvertError::MissingImportTarget { .. });
        assert!(!dest.exists());
    }

    #[test]
    fn import_cycles_terminate() {
        let dir = tempdir().unwrap();
        // 甲乙 imports 丙丁 imports 甲乙
        fs::write(dir.path().join("甲乙.han"), "从丙丁进口人\n").unwrap();
        fs::write(dir.path().join("丙丁.han"), "从甲乙进口人\n").unwrap();

        let mut converter = Converter::new();
        converter
            .convert(&dir.path().join("甲乙.han"), &dir.path().join("out.py"))
            .unwrap();

        assert!(dir.path().join("out.py").exists());
        // The nested conversion of 丙丁 wrote its own destination
        let nested: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".py"))
            .collect();
        assert!(nested.len() >= 2, "expected both files converted: {:?}", nested);
    }

    #[test]
    fn failed_line_leaves_no_destination() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("坏.han");
        let dest = dir.path().join("坏.py");
        fs::write(&source, "一是一\n甲是“没结束\n").unwrap();

        let mut converter = Converter::new();
        let error = converter.convert(&source, &dest).unwrap_err();
        assert_matches!(error, ConvertError::Lex { line: 2, .. });
        assert!(!dest.exists());
    }

    #[test]
    fn up_to_date_destination_is_skipped() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("旧.han");
        let dest = dir.path().join("旧.py");
        fs::write(&source, "一\n").unwrap();

        let mut first = Converter::new();
        first.convert(&source, &dest).unwrap();

        // Fresh session, same paths: the destination was written after the
        // source, so nothing should happen unless forced. The binary mtime
        // check can keep this live on freshly-built test runners, so accept
        // either skip or reconvert but require identical output.
        let before = fs::read_to_string(&dest).unwrap();
        let mut second = Converter::new();
        let outcome = second.convert(&source, &dest).unwrap();
        match outcome {
            ConversionOutcome::SkippedUpToDate => {}
            ConversionOutcome::Converted { .. } => {
                assert_eq!(fs::read_to_string(&dest).unwrap(), before);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn force_update_reconverts() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("新.han");
        let dest = dir.path().join("新.py");
        fs::write(&source, "一\n").unwrap();
        fs::write(&dest, "stale\n").unwrap();

        let mut preferences = ConversionPreferences::default();
        preferences.force_update = true;
        let mut converter = Converter::with_preferences(preferences);
        let outcome = converter.convert(&source, &dest).unwrap();
        assert_matches!(outcome, ConversionOutcome::Converted { .. });
        assert!(fs::read_to_string(&dest).unwrap().starts_with(PRELUDE_LINE));
    }

    #[test]
    fn working_dir_prefix_applies_to_top_level_paths() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("前.han"), "一\n").unwrap();

        let mut preferences = ConversionPreferences::default();
        preferences.working_dir_prefix = dir.path().display().to_string();
        let mut converter = Converter::with_preferences(preferences);
        converter
            .convert(Path::new("前.han"), Path::new("前.py"))
            .unwrap();
        assert!(dir.path().join("前.py").exists());
    }
}
