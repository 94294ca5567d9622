//! Source tree conversion.
//!
//! - `walker`: mirrors an input tree into an output root
//! - `file`: converts or copies one file
//! - `sanitize`: strips fence lines from generated text

mod file;
mod sanitize;
mod walker;

pub use file::{ConversionJob, FileOutcome, FileTranspiler};
pub use sanitize::{sanitize, FENCE_MARKER};
pub use walker::{ConversionSummary, TreeWalker};
