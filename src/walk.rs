//! Directory traversal shared by conversion and analysis.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::language::is_ignored_dir;

/// Decides which entries below a root are visited.
///
/// Directories named in [`crate::language::IGNORED_DIRS`] are always pruned.
/// Extra glob patterns (matched against the root-relative path) prune
/// matching files and directories as well, and so does a single skipped
/// path set with [`PathFilter::skipping`].
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    excluded: Option<GlobSet>,
    skipped: Option<PathBuf>,
}

impl PathFilter {
    /// Build a filter from `excluded_paths` glob patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| Error::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            source,
        })?;

        Ok(Self {
            excluded: Some(set),
            skipped: None,
        })
    }

    /// Also prune `path`. It must be spelled the way the walk will see it,
    /// i.e. joined onto the traversal root.
    pub fn skipping(mut self, path: impl Into<PathBuf>) -> Self {
        self.skipped = Some(path.into());
        self
    }

    /// Whether `entry`, found under `root`, should be visited.
    pub fn allows(&self, root: &Path, entry: &DirEntry) -> bool {
        // The root itself is never pruned by name.
        if entry.depth() == 0 {
            return true;
        }

        if self.skipped.as_deref() == Some(entry.path()) {
            debug!("Skipping output directory: {}", entry.path().display());
            return false;
        }

        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if is_ignored_dir(&name) {
                debug!("Skipping directory: {}", entry.path().display());
                return false;
            }
        }

        if let Some(set) = &self.excluded {
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if set.is_match(rel) {
                debug!("Skipping excluded path: {}", entry.path().display());
                return false;
            }
        }

        true
    }
}

/// Walk `root` depth-first in file-name order, applying `filter`.
///
/// Directories are yielded before their contents. Symlinks that loop back
/// to an ancestor are skipped with a warning.
pub fn walk<'a>(
    root: &'a Path,
    filter: &'a PathFilter,
) -> impl Iterator<Item = Result<DirEntry>> + 'a {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| filter.allows(root, e))
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(Ok(entry)),
            Err(err) if err.loop_ancestor().is_some() => {
                if let Some(path) = err.path() {
                    warn!("Skipping symlink loop: {}", path.display());
                }
                None
            }
            Err(source) => Some(Err(Error::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })),
        })
}
