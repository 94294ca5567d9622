//! Naive inventory of function definitions and imports.
//!
//! The analyzer walks a tree with the same pruning and classification as
//! conversion, then applies the line heuristics in [`rules`] to every source
//! file. Nothing is parsed; a match is a line that looks right.

pub mod rules;

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::language::{classify, Language};
use crate::walk::{walk, PathFilter};

/// A line that looks like a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionMatch {
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// The trimmed line
    pub text: String,
}

impl std::fmt::Display for FunctionMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.text)
    }
}

/// A line that looks like an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportMatch {
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// The import text after per-language cleanup
    pub text: String,
}

/// Heuristic function and import finder.
#[derive(Debug, Default)]
pub struct PatternAnalyzer {
    initialized: bool,
    filter: PathFilter,
}

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prune additional paths during traversal.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Prepare the analyzer. Must be called before any scan.
    pub fn initialize(&mut self) -> Result<()> {
        info!("Analyzing source code using simple pattern matching...");
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Every function-definition line under `root`, in traversal order then
    /// line order.
    pub fn find_function_definitions(&self, root: &Path) -> Result<Vec<FunctionMatch>> {
        self.ensure_initialized()?;

        let per_file = self.scan(root, |path, content, language| {
            rules::find_functions(content, language)
                .into_iter()
                .map(|(line, text)| FunctionMatch {
                    file: path.to_path_buf(),
                    line,
                    text,
                })
                .collect::<Vec<_>>()
        })?;

        Ok(per_file.into_iter().flatten().collect())
    }

    /// Every import line under `root`, in traversal order then line order.
    pub fn find_imports(&self, root: &Path) -> Result<Vec<ImportMatch>> {
        self.ensure_initialized()?;

        let per_file = self.scan(root, |path, content, language| {
            rules::find_imports(content, language)
                .into_iter()
                .map(|(line, text)| ImportMatch {
                    file: path.to_path_buf(),
                    line,
                    text,
                })
                .collect::<Vec<_>>()
        })?;

        Ok(per_file.into_iter().flatten().collect())
    }

    /// Import lines grouped by root-relative file path. Files without
    /// imports are left out. A single-file root is keyed by its file name.
    pub fn find_imports_and_dependencies(
        &self,
        root: &Path,
    ) -> Result<BTreeMap<String, Vec<String>>> {
        let mut dependencies: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for import in self.find_imports(root)? {
            let rel = relative_key(&import.file, root);
            dependencies.entry(rel).or_default().push(import.text);
        }

        Ok(dependencies)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Collect source files under `root`, then run `extract` on each in
    /// parallel. The output keeps traversal order.
    fn scan<T, F>(&self, root: &Path, extract: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&Path, &str, Language) -> T + Sync,
    {
        let mut sources = Vec::new();
        for entry in walk(root, &self.filter) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(language) = classify(entry.path()).language {
                sources.push((entry.into_path(), language));
            }
        }
        debug!("Scanning {} source files under {}", sources.len(), root.display());

        sources
            .par_iter()
            .map(|(path, language)| {
                let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
                Ok(extract(path.as_path(), &content, *language))
            })
            .collect()
    }
}

fn relative_key(file: &Path, root: &Path) -> String {
    match file.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
        Ok(_) => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string_lossy().into_owned()),
        Err(_) => file.to_string_lossy().into_owned(),
    }
}
