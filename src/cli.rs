//! Command-line interface for codeport.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analyze::PatternAnalyzer;
use crate::config::Config;
use crate::convert::{ConversionSummary, FileTranspiler, TreeWalker};
use crate::error::{Error, Result};
use crate::language::output_extension;
use crate::report;
use crate::transform::ChatCompletionBackend;
use crate::walk::PathFilter;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Port source trees between programming languages.
///
/// Source files are rewritten into the target language by a chat
/// completion model; every other file is copied unchanged so the output
/// tree mirrors the input tree.
#[derive(Parser)]
#[command(name = "codeport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert files or directory trees to another language
    Convert(ConvertArgs),
    /// List function definitions and imports found by line heuristics
    Analyze(AnalyzeArgs),
}

/// Arguments for the convert command.
#[derive(Parser)]
pub struct ConvertArgs {
    /// Comma-separated list of input files or directories
    #[arg(short, long)]
    pub input: String,

    /// Output directory
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target language (e.g. python, go, rust)
    #[arg(short, long)]
    pub lang: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Split a comma-separated `--input` value. Blank entries are dropped.
pub fn split_inputs(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Convert each input into `output`, continuing past failed inputs.
///
/// Directories are mirrored into `output`; single files land directly in
/// it. Returns the combined summary and the inputs that failed.
pub fn convert_inputs(
    walker: &TreeWalker,
    inputs: &[PathBuf],
    output: &Path,
) -> (ConversionSummary, Vec<(PathBuf, Error)>) {
    let mut total = ConversionSummary::new();
    let mut failures = Vec::new();

    for input in inputs {
        match convert_input(walker, input, output) {
            Ok(summary) => {
                report::write_conversion_summary(input, &summary);
                for out in &summary.outputs {
                    debug!("Wrote {}", out.display());
                }
                total.merge(summary);
            }
            Err(e) => {
                report::write_conversion_failure(input, &e);
                failures.push((input.clone(), e));
            }
        }
    }

    (total, failures)
}

fn convert_input(walker: &TreeWalker, input: &Path, output: &Path) -> Result<ConversionSummary> {
    let metadata = fs::metadata(input).map_err(|e| Error::stat(input, e))?;

    if metadata.is_dir() {
        walker.traverse(input, output)
    } else {
        let mut summary = ConversionSummary::new();
        summary.record(walker.convert_one(input, output)?);
        Ok(summary)
    }
}

/// Run the convert command.
pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<i32> {
    let inputs = split_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("Error: --input must name at least one path");
        return Ok(EXIT_ERROR);
    }

    let lang = args.lang.trim();
    if lang.is_empty() {
        eprintln!("Error: --lang must not be empty");
        return Ok(EXIT_ERROR);
    }
    if output_extension(lang).is_none() {
        warn!(
            "Unknown target language {:?}, converted files keep their extension",
            lang
        );
    }

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let filter = match PathFilter::new(&config.excluded_paths) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = fs::create_dir_all(&args.output) {
        eprintln!(
            "Error: failed to create output directory {}: {}",
            args.output.display(),
            e
        );
        return Ok(EXIT_ERROR);
    }

    let backend = match ChatCompletionBackend::new(config.backend) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: failed to set up backend: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    info!("Converting {} input(s) to {}", inputs.len(), lang);
    info!("Output will be saved to {}", args.output.display());

    let walker = TreeWalker::new(FileTranspiler::new(Box::new(backend), lang)).with_filter(filter);
    let (total, failures) = convert_inputs(&walker, &inputs, &args.output);

    report::write_conversion_complete(&total, failures.len());
    Ok(EXIT_SUCCESS)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if !args.path.exists() {
        eprintln!("Error: path does not exist: {}", args.path.display());
        return Ok(EXIT_ERROR);
    }

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let filter = match PathFilter::new(&config.excluded_paths) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let mut analyzer = PatternAnalyzer::new().with_filter(filter);
    analyzer.initialize()?;

    let functions = analyzer.find_function_definitions(&args.path)?;
    let imports = analyzer.find_imports(&args.path)?;

    match args.format.as_str() {
        "json" => report::write_json_analysis(&args.path, &functions, &imports)?,
        _ => report::write_pretty_analysis(&args.path, &functions, &imports),
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::transform::TransformError;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn stub_walker() -> TreeWalker {
        let transform =
            |_: &str, _: Language, _: &str| -> std::result::Result<String, TransformError> {
                Ok("converted".to_string())
            };
        TreeWalker::new(FileTranspiler::new(Box::new(transform), "python"))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_inputs() {
        assert_eq!(
            split_inputs(" src , lib/main.go,,"),
            vec![PathBuf::from("src"), PathBuf::from("lib/main.go")]
        );
        assert!(split_inputs(" , ").is_empty());
    }

    #[test]
    fn test_convert_requires_flags() {
        assert!(Cli::try_parse_from(["codeport", "convert", "--input", "a"]).is_err());
        let cli = Cli::try_parse_from([
            "codeport", "convert", "--input", "a,b", "--output", "out", "--lang", "python", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, "a,b");
                assert_eq!(args.lang, "python");
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_inputs_continues_after_failure() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::create_dir(input.path().join("tree")).unwrap();
        fs::write(input.path().join("tree/a.go"), "package a").unwrap();
        fs::write(input.path().join("single.js"), "let x = 1").unwrap();

        let inputs = vec![
            input.path().join("missing"),
            input.path().join("tree"),
            input.path().join("single.js"),
        ];
        let (total, failures) = convert_inputs(&stub_walker(), &inputs, output.path());

        assert_eq!(failures.len(), 1);
        match &failures[0].1 {
            Error::Stat { path, source } => {
                assert!(path.ends_with("missing"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(total.converted, 2);
        assert!(output.path().join("a.py").is_file());
        assert!(output.path().join("single.py").is_file());
    }

    #[test]
    fn test_run_analyze_rejects_bad_format() {
        let temp = TempDir::new().unwrap();
        let args = AnalyzeArgs {
            path: temp.path().to_path_buf(),
            format: "xml".to_string(),
            config: None,
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }
}
