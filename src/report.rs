//! Output formatting for codeport results.
//!
//! Analysis results come in two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//!
//! Conversion runs get a short pretty summary.

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyze::{FunctionMatch, ImportMatch};
use crate::convert::ConversionSummary;

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report for one analysis run.
#[derive(Serialize, Deserialize)]
pub struct AnalysisReport {
    pub version: String,
    pub path: String,
    pub functions: Vec<JsonMatch>,
    pub imports: Vec<JsonMatch>,
}

/// One matched line. `file` is relative to the analyzed root.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct JsonMatch {
    pub file: String,
    pub line: usize,
    pub text: String,
}

impl AnalysisReport {
    pub fn new(root: &Path, functions: &[FunctionMatch], imports: &[ImportMatch]) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: root.display().to_string(),
            functions: functions
                .iter()
                .map(|f| to_json_match(&f.file, f.line, &f.text, root))
                .collect(),
            imports: imports
                .iter()
                .map(|i| to_json_match(&i.file, i.line, &i.text, root))
                .collect(),
        }
    }
}

fn to_json_match(file: &Path, line: usize, text: &str, root: &Path) -> JsonMatch {
    JsonMatch {
        file: make_relative_path(file, root),
        line,
        text: text.to_string(),
    }
}

/// Write analysis results in JSON format.
pub fn write_json_analysis(
    root: &Path,
    functions: &[FunctionMatch],
    imports: &[ImportMatch],
) -> anyhow::Result<()> {
    let report = AnalysisReport::new(root, functions, imports);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

/// Path of `file` relative to `base`, with forward slashes.
fn make_relative_path(file: &Path, base: &Path) -> String {
    let rel = file.strip_prefix(base).unwrap_or(file);
    let s = rel.to_string_lossy().replace('\\', "/");
    if s.is_empty() {
        // A single-file analysis root
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(s)
    } else {
        s
    }
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write analysis results in pretty (human-readable) format.
pub fn write_pretty_analysis(root: &Path, functions: &[FunctionMatch], imports: &[ImportMatch]) {
    write_header();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", root.display());
    println!();

    println!("  {} ({}):", "Functions".bold(), functions.len());
    if functions.is_empty() {
        println!("    {}", "(none found)".dimmed());
    }
    for f in functions {
        write_location(&make_relative_path(&f.file, root), f.line);
        println!("{}", f.text);
    }
    println!();

    println!("  {} ({}):", "Imports".bold(), imports.len());
    if imports.is_empty() {
        println!("    {}", "(none found)".dimmed());
    }
    for i in imports {
        write_location(&make_relative_path(&i.file, root), i.line);
        println!("{}", i.text);
    }
    println!();
}

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "codeport".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn write_location(file: &str, line: usize) {
    print!("    {}", file.blue());
    print!("{}", format!(":{}", line).dimmed());
    print!("  ");
}

/// Summary line for one converted input path.
pub fn write_conversion_summary(input: &Path, summary: &ConversionSummary) {
    print!("  {} ", "✓".green());
    print!("{}", input.display());
    println!(
        "  {}",
        format!(
            "({} converted, {} copied)",
            summary.converted, summary.copied
        )
        .dimmed()
    );
}

/// Per-input failure line. Printed to stderr so stdout stays clean.
pub fn write_conversion_failure(input: &Path, err: &dyn std::fmt::Display) {
    eprintln!("  {} {}: {}", "✗".red(), input.display(), err);
}

/// Final line of a `convert` run.
pub fn write_conversion_complete(total: &ConversionSummary, failed: usize) {
    println!();
    if failed == 0 {
        println!("{}", "Conversion completed successfully!".green());
    } else {
        let plural = if failed != 1 { "s" } else { "" };
        println!(
            "{}",
            format!("Conversion completed with {} failed input{}.", failed, plural).yellow()
        );
    }
    println!(
        "  {}",
        format!("{} converted, {} copied", total.converted, total.copied).dimmed()
    );
}
