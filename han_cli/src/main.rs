//! # han converter CLI
//!
//! Converts a `.han` source file (and everything it imports) into Python.

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use han_compiler::config::constants::compile_time::conversion::{
    DEST_EXTENSION, SOURCE_EXTENSION,
};
use han_compiler::logging::{self, LogLevel};
use han_compiler::{log_error, ConversionOutcome, ConversionPreferences, Converter};

#[derive(Debug, Parser)]
#[command(
    name = "han",
    version,
    about = "Converts a .han source file into a (roughly) equivalent .py file"
)]
struct Cli {
    /// Source file to convert (.han)
    source: PathBuf,

    /// Destination file; defaults to the source with a .py extension
    dest: Option<PathBuf>,

    /// Overwrite an existing destination without asking
    #[arg(short, long)]
    force: bool,

    /// Convert even when the destination is newer than the source
    #[arg(short, long)]
    update: bool,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Use tabs instead of spaces (overrides --indent)
    #[arg(long)]
    tabs: bool,

    /// Print the conversion summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConversionSummary {
    source: String,
    dest: String,
    outcome: ConversionOutcome,
}

fn main() {
    let cli = Cli::parse();

    if let Err(message) = logging::init_global_logging() {
        eprintln!("Failed to initialize logging: {}", message);
        std::process::exit(1);
    }
    if cli.verbose {
        logging::set_min_log_level(LogLevel::Debug);
    }

    if cli.source.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
        eprintln!(
            "Error: source file must end with .{}: {}",
            SOURCE_EXTENSION,
            cli.source.display()
        );
        std::process::exit(1);
    }

    let dest = cli
        .dest
        .clone()
        .unwrap_or_else(|| cli.source.with_extension(DEST_EXTENSION));
    if cli.dest.is_none() {
        println!("Exporting to default: {}", dest.display());
    } else {
        println!("Exporting to {}", dest.display());
    }

    if cli.indent == 0 || cli.indent > 16 {
        eprintln!("Error: --indent must be between 1 and 16");
        std::process::exit(1);
    }

    if dest.exists() && !cli.force && !confirm_overwrite(&dest) {
        println!("Not overriding file, aborting");
        return;
    }

    let preferences = ConversionPreferences {
        force_overwrite: cli.force,
        force_update: cli.update,
        spaces_per_indent: cli.indent,
        use_tabs: cli.tabs,
        ..ConversionPreferences::default()
    };

    let mut converter = Converter::with_preferences(preferences);
    match converter.convert(&cli.source, &dest) {
        Ok(outcome) => {
            let summary = ConversionSummary {
                source: cli.source.display().to_string(),
                dest: dest.display().to_string(),
                outcome,
            };
            if cli.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Failed to serialize summary: {}", e),
                }
            } else {
                match &summary.outcome {
                    ConversionOutcome::Converted { dest, lines } => {
                        println!("Converted {} lines into {}", lines, dest);
                    }
                    ConversionOutcome::SkippedAlreadyConverted => {
                        println!("{} was already converted this session", summary.source);
                    }
                    ConversionOutcome::SkippedUpToDate => {
                        println!("{} is already up to date", summary.dest);
                    }
                }
            }
        }
        Err(error) => {
            log_error!(error.error_code(), "Conversion failed", "detail" => error);
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    }
}

/// Ask on stdin before clobbering an existing destination
fn confirm_overwrite(dest: &std::path::Path) -> bool {
    print!("{} already exists, proceed and overwrite? [y|N]: ", dest.display());
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().to_lowercase().starts_with('y')
}
