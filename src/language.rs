//! Language lookup tables.
//!
//! Maps file extensions to languages, target language names to output
//! extensions, and holds the directory names skipped during traversal.
//! Everything here is a pure lookup with no state.

use phf::phf_map;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A programming language recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Go,
    JavaScript,
    TypeScript,
    Python,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Rust,
    Swift,
    Kotlin,
}

impl Language {
    /// Human-readable name, as used in prompts and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Ruby => "Ruby",
            Language::Php => "PHP",
            Language::Rust => "Rust",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
        }
    }

    /// The extension written for files converted into this language.
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Language::Go => ".go",
            Language::JavaScript => ".js",
            Language::TypeScript => ".ts",
            Language::Python => ".py",
            Language::Java => ".java",
            Language::C => ".c",
            Language::Cpp => ".cpp",
            Language::CSharp => ".cs",
            Language::Ruby => ".rb",
            Language::Php => ".php",
            Language::Rust => ".rs",
            Language::Swift => ".swift",
            Language::Kotlin => ".kt",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Source extensions (lower-case, with the dot). Several extensions may
/// share a language.
static SOURCE_EXTENSIONS: phf::Map<&'static str, Language> = phf_map! {
    ".go" => Language::Go,
    ".js" => Language::JavaScript,
    ".ts" => Language::TypeScript,
    ".py" => Language::Python,
    ".java" => Language::Java,
    ".c" => Language::C,
    ".cpp" => Language::Cpp,
    ".cs" => Language::CSharp,
    ".rb" => Language::Ruby,
    ".php" => Language::Php,
    ".rs" => Language::Rust,
    ".swift" => Language::Swift,
    ".kt" => Language::Kotlin,
};

/// Target language names (lower-case) to output extensions.
static TARGET_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "go" => ".go",
    "golang" => ".go",
    "javascript" => ".js",
    "typescript" => ".ts",
    "python" => ".py",
    "java" => ".java",
    "c" => ".c",
    "c++" => ".cpp",
    "csharp" => ".cs",
    "c#" => ".cs",
    "ruby" => ".rb",
    "php" => ".php",
    "rust" => ".rs",
    "swift" => ".swift",
    "kotlin" => ".kt",
};

/// Directory names whose whole subtree is skipped.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "dist",
    "build",
    ".idea",
    ".vscode",
];

/// Result of classifying a path by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub language: Option<Language>,
    pub is_source: bool,
}

/// Classify a file from its extension alone, case-insensitively.
pub fn classify<P: AsRef<Path>>(path: P) -> Classification {
    let language = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| SOURCE_EXTENSIONS.get(format!(".{}", ext.to_lowercase()).as_str()))
        .copied();

    Classification {
        language,
        is_source: language.is_some(),
    }
}

/// Tuple form of [`classify`].
pub fn detect_language<P: AsRef<Path>>(path: P) -> (Option<Language>, bool) {
    let c = classify(path);
    (c.language, c.is_source)
}

/// Output extension for a target language name, if the name is known.
pub fn output_extension(target: &str) -> Option<&'static str> {
    TARGET_EXTENSIONS.get(target.to_lowercase().as_str()).copied()
}

/// Replace the final extension segment of `path` with `ext`.
///
/// `ext` may be given with or without the leading dot. A path without an
/// extension gets one appended.
pub fn change_extension<P: AsRef<Path>>(path: P, ext: &str) -> PathBuf {
    path.as_ref().with_extension(ext.trim_start_matches('.'))
}

/// Whether a directory with this base name is pruned from traversal.
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(&name)
}
