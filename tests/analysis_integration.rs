//! Integration tests for the heuristic analyzer.
//!
//! These tests run the analyzer against the `testdata/project` fixture,
//! which mixes several languages with vendored directories that must be
//! pruned.

use std::path::{Path, PathBuf};

use codeport::{Error, PatternAnalyzer};

fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("project")
}

fn analyzer() -> PatternAnalyzer {
    let mut analyzer = PatternAnalyzer::new();
    analyzer.initialize().expect("initialize should succeed");
    analyzer
}

fn rel(path: &Path) -> String {
    path.strip_prefix(project_path())
        .expect("match should be under the fixture root")
        .to_string_lossy()
        .replace('\\', "/")
}

#[test]
fn test_functions_in_traversal_order() {
    let functions = analyzer()
        .find_function_definitions(&project_path())
        .expect("scan should succeed");

    let found: Vec<(String, usize, String)> = functions
        .into_iter()
        .map(|f| (rel(&f.file), f.line, f.text))
        .collect();

    let expected: Vec<(String, usize, String)> = [
        ("java/App.java", 8, "public App(List<String> names) {"),
        ("java/App.java", 12, "public static void main(String[] args) {"),
        ("java/App.java", 16, "private void run() {"),
        ("main.go", 5, "func main() {"),
        ("scripts/tool.py", 5, "def list_files(root):"),
        ("subdir/utils.go", 7, "func greet(name string) string {"),
        ("web/app.js", 3, "function mount(root) {"),
        ("web/app.js", 7, "const onClick = function(event) {"),
    ]
    .into_iter()
    .map(|(f, l, t)| (f.to_string(), l, t.to_string()))
    .collect();

    assert_eq!(found, expected);
}

#[test]
fn test_vendored_and_non_source_files_ignored() {
    let analyzer = analyzer();
    let root = project_path();

    let functions = analyzer.find_function_definitions(&root).unwrap();
    let imports = analyzer.find_imports(&root).unwrap();

    for file in functions
        .iter()
        .map(|f| &f.file)
        .chain(imports.iter().map(|i| &i.file))
    {
        let rel = rel(file);
        assert!(!rel.starts_with("node_modules"), "unexpected match in {}", rel);
        assert!(!rel.starts_with("vendor"), "unexpected match in {}", rel);
        assert!(!rel.ends_with(".md"), "unexpected match in {}", rel);
    }
}

#[test]
fn test_imports_and_dependencies() {
    let deps = analyzer()
        .find_imports_and_dependencies(&project_path())
        .expect("scan should succeed");

    let key = |p: &str| PathBuf::from(p).to_string_lossy().into_owned();

    assert_eq!(deps.len(), 5);
    assert_eq!(deps[&key("main.go")], vec!["fmt"]);
    // Grouped Go imports only yield the opening line
    assert_eq!(deps[&key("subdir/utils.go")], vec!["("]);
    assert_eq!(deps[&key("java/App.java")], vec!["java.util.List"]);
    assert_eq!(
        deps[&key("scripts/tool.py")],
        vec!["import os", "from pathlib import Path"]
    );
    assert_eq!(
        deps[&key("web/app.js")],
        vec!["import { render } from './render.js';"]
    );
}

#[test]
fn test_single_file_root() {
    let file = project_path().join("main.go");
    let functions = analyzer().find_function_definitions(&file).unwrap();

    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].file, file);
    assert_eq!(functions[0].line, 5);
}

#[test]
fn test_uninitialized_analyzer_fails() {
    let analyzer = PatternAnalyzer::new();
    let err = analyzer
        .find_imports(&project_path())
        .expect_err("uninitialized analyzer should fail");
    assert!(matches!(err, Error::NotInitialized));
    assert_eq!(
        err.to_string(),
        "analyzer not initialized, call initialize() first"
    );
}
