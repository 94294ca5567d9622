//! Recursive conversion of a directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::file::{FileOutcome, FileTranspiler};
use crate::error::{Error, Result};
use crate::walk::{walk, PathFilter};

/// Counts and outputs for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub copied: usize,
    pub outputs: Vec<PathBuf>,
}

impl ConversionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one file.
    pub fn record(&mut self, outcome: FileOutcome) {
        match &outcome {
            FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Copied { .. } => self.copied += 1,
        }
        self.outputs.push(outcome.output().to_path_buf());
    }

    /// Merge another summary into this one.
    pub fn merge(&mut self, other: ConversionSummary) {
        self.converted += other.converted;
        self.copied += other.copied;
        self.outputs.extend(other.outputs);
    }

    pub fn total(&self) -> usize {
        self.converted + self.copied
    }
}

/// Mirrors an input tree into an output root, converting files on the way.
pub struct TreeWalker {
    transpiler: FileTranspiler,
    filter: PathFilter,
}

impl TreeWalker {
    pub fn new(transpiler: FileTranspiler) -> Self {
        Self {
            transpiler,
            filter: PathFilter::default(),
        }
    }

    /// Prune additional paths during traversal.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Convert every file under `input_root` into the same relative location
    /// under `output_root`.
    ///
    /// Output directories are created before their contents are visited.
    /// An output root inside the input tree is never walked. The first
    /// failing file aborts the traversal.
    pub fn traverse(&self, input_root: &Path, output_root: &Path) -> Result<ConversionSummary> {
        let mut summary = ConversionSummary::new();

        let filter = match nested_output_dir(input_root, output_root)? {
            Some(dir) => self.filter.clone().skipping(dir),
            None => self.filter.clone(),
        };

        for entry in walk(input_root, &filter) {
            let entry = entry?;
            let rel = entry
                .path()
                .strip_prefix(input_root)
                .unwrap_or_else(|_| Path::new(entry.file_name()));
            let out = output_root.join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&out).map_err(|e| Error::create_dir(&out, e))?;
                debug!("Created {}", out.display());
            } else if entry.file_type().is_file() {
                summary.record(self.transpiler.process(entry.path(), &out)?);
            }
        }

        Ok(summary)
    }

    /// Convert a lone file into `output_dir` without mirroring any of its
    /// parent directories.
    pub fn convert_one(&self, path: &Path, output_dir: &Path) -> Result<FileOutcome> {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Usage(format!("not a file path: {}", path.display())))?;

        fs::create_dir_all(output_dir).map_err(|e| Error::create_dir(output_dir, e))?;
        self.transpiler.process(path, &output_dir.join(file_name))
    }
}

/// `output_root` spelled under `input_root`, when it lies inside it.
fn nested_output_dir(input_root: &Path, output_root: &Path) -> Result<Option<PathBuf>> {
    // A missing input root is reported by the walk itself.
    let Ok(input) = input_root.canonicalize() else {
        return Ok(None);
    };

    fs::create_dir_all(output_root).map_err(|e| Error::create_dir(output_root, e))?;
    let output = output_root
        .canonicalize()
        .map_err(|e| Error::stat(output_root, e))?;

    match output.strip_prefix(&input) {
        Ok(rel) if !rel.as_os_str().is_empty() => Ok(Some(input_root.join(rel))),
        _ => Ok(None),
    }
}
