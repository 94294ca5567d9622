//! Per-language line heuristics.
//!
//! Each rule is plain data: adding a language means adding a table row.
//! Rules are applied to a single trimmed line at a time.

use crate::language::Language;

/// A literal test against one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    StartsWith(&'static str),
    Contains(&'static str),
}

impl Matcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::StartsWith(prefix) => line.starts_with(*prefix),
            Matcher::Contains(needle) => line.contains(*needle),
        }
    }
}

/// Matches when at least one of `any` matches (or `any` is empty) and
/// every matcher in `all` matches.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub any: &'static [Matcher],
    pub all: &'static [Matcher],
}

impl LineRule {
    pub fn matches(&self, line: &str) -> bool {
        (self.any.is_empty() || self.any.iter().any(|m| m.matches(line)))
            && self.all.iter().all(|m| m.matches(line))
    }
}

/// How the recorded text of an import line is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Keep the trimmed line as is.
    Verbatim,
    /// Remove the prefix, then trim surrounding `"` characters.
    StripPrefixUnquote(&'static str),
    /// Remove the prefix, then one trailing occurrence of the suffix.
    StripPrefixAndSuffix(&'static str, &'static str),
}

impl Extract {
    pub fn apply<'a>(&self, line: &'a str) -> &'a str {
        match self {
            Extract::Verbatim => line,
            Extract::StripPrefixUnquote(prefix) => {
                line.strip_prefix(*prefix).unwrap_or(line).trim_matches('"')
            }
            Extract::StripPrefixAndSuffix(prefix, suffix) => {
                let rest = line.strip_prefix(*prefix).unwrap_or(line);
                rest.strip_suffix(*suffix).unwrap_or(rest)
            }
        }
    }
}

/// An import rule: which lines count and what text is recorded.
#[derive(Debug, Clone, Copy)]
pub struct ImportRule {
    pub rule: LineRule,
    pub extract: Extract,
}

const GO_FUNC: LineRule = LineRule {
    any: &[Matcher::StartsWith("func ")],
    all: &[],
};

const JS_FUNC: LineRule = LineRule {
    any: &[
        Matcher::StartsWith("function "),
        Matcher::Contains(" function("),
    ],
    all: &[],
};

const PY_FUNC: LineRule = LineRule {
    any: &[Matcher::StartsWith("def ")],
    all: &[],
};

const JVM_FUNC: LineRule = LineRule {
    any: &[
        Matcher::Contains("public "),
        Matcher::Contains("private "),
        Matcher::Contains("protected "),
    ],
    all: &[Matcher::Contains("(")],
};

/// Function-definition rules by language.
pub static FUNCTION_RULES: &[(Language, LineRule)] = &[
    (Language::Go, GO_FUNC),
    (Language::JavaScript, JS_FUNC),
    (Language::TypeScript, JS_FUNC),
    (Language::Python, PY_FUNC),
    (Language::Java, JVM_FUNC),
    (Language::Kotlin, JVM_FUNC),
];

const GO_IMPORT: ImportRule = ImportRule {
    rule: LineRule {
        any: &[Matcher::StartsWith("import ")],
        all: &[],
    },
    extract: Extract::StripPrefixUnquote("import "),
};

const JS_IMPORT: ImportRule = ImportRule {
    rule: LineRule {
        any: &[Matcher::StartsWith("import ")],
        all: &[],
    },
    extract: Extract::Verbatim,
};

const PY_IMPORT: ImportRule = ImportRule {
    rule: LineRule {
        any: &[Matcher::StartsWith("import "), Matcher::StartsWith("from ")],
        all: &[],
    },
    extract: Extract::Verbatim,
};

const JAVA_IMPORT: ImportRule = ImportRule {
    rule: LineRule {
        any: &[Matcher::StartsWith("import ")],
        all: &[],
    },
    extract: Extract::StripPrefixAndSuffix("import ", ";"),
};

/// Import rules by language.
pub static IMPORT_RULES: &[(Language, ImportRule)] = &[
    (Language::Go, GO_IMPORT),
    (Language::JavaScript, JS_IMPORT),
    (Language::TypeScript, JS_IMPORT),
    (Language::Python, PY_IMPORT),
    (Language::Java, JAVA_IMPORT),
];

pub fn function_rule(language: Language) -> Option<&'static LineRule> {
    FUNCTION_RULES
        .iter()
        .find(|(l, _)| *l == language)
        .map(|(_, r)| r)
}

pub fn import_rule(language: Language) -> Option<&'static ImportRule> {
    IMPORT_RULES
        .iter()
        .find(|(l, _)| *l == language)
        .map(|(_, r)| r)
}

/// 1-based line numbers and trimmed text of function definitions.
pub fn find_functions(content: &str, language: Language) -> Vec<(usize, String)> {
    let Some(rule) = function_rule(language) else {
        return Vec::new();
    };

    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| rule.matches(line))
        .map(|(n, line)| (n, line.to_string()))
        .collect()
}

/// 1-based line numbers and extracted text of import lines.
pub fn find_imports(content: &str, language: Language) -> Vec<(usize, String)> {
    let Some(import) = import_rule(language) else {
        return Vec::new();
    };

    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| import.rule.matches(line))
        .map(|(n, line)| (n, import.extract.apply(line).to_string()))
        .collect()
}
