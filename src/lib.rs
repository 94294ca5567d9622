//! codeport - port source trees between programming languages.
//!
//! codeport walks a directory tree, sends every recognized source file
//! through a text transform (by default a chat completion model) and
//! writes the result under an output root with the target language's
//! extension. Non-source files are copied unchanged. A separate,
//! read-only analyzer lists function definitions and imports using
//! per-language line heuristics.
//!
//! # Architecture
//!
//! - `language`: extension classification and target extension tables
//! - `walk`: pruned, sorted directory traversal shared by both capabilities
//! - `transform`: the `Transform` seam and the chat completion backend
//! - `convert`: per-file transpiler, response sanitizer, and tree walker
//! - `analyze`: heuristic function and import finder
//! - `config`: optional YAML configuration
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Language
//!
//! Add the extensions to the tables in `language.rs`. For analysis
//! support, add rows to the rule tables in `analyze/rules.rs`.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod language;
pub mod logging;
pub mod report;
pub mod transform;
pub mod walk;

pub use analyze::{FunctionMatch, ImportMatch, PatternAnalyzer};
pub use config::{BackendConfig, Config};
pub use convert::{sanitize, ConversionJob, ConversionSummary, FileOutcome, FileTranspiler, TreeWalker};
pub use error::{Error, Result};
pub use language::{classify, detect_language, Classification, Language};
pub use transform::{ChatCompletionBackend, Transform, TransformError};
pub use walk::PathFilter;
