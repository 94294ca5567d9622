//! Conversion of a single file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::sanitize::sanitize;
use crate::error::{Error, Result};
use crate::language::{change_extension, classify, output_extension, Language};
use crate::transform::Transform;

/// One source file scheduled for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    /// Destination, with the target language's extension when it is known.
    pub output_path: PathBuf,
    pub source_language: Language,
    pub target_language: String,
}

impl ConversionJob {
    pub fn new(
        input_path: impl Into<PathBuf>,
        mirrored_output: impl AsRef<Path>,
        source_language: Language,
        target_language: impl Into<String>,
    ) -> Self {
        let target_language = target_language.into();
        let output_path = match output_extension(&target_language) {
            Some(ext) => change_extension(mirrored_output, ext),
            None => mirrored_output.as_ref().to_path_buf(),
        };

        Self {
            input_path: input_path.into(),
            output_path,
            source_language,
            target_language,
        }
    }
}

/// What happened to a processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Source file sent through the transform and written to `output`.
    Converted { output: PathBuf, language: Language },
    /// Non-source file copied verbatim to `output`.
    Copied { output: PathBuf },
}

impl FileOutcome {
    pub fn output(&self) -> &Path {
        match self {
            FileOutcome::Converted { output, .. } | FileOutcome::Copied { output } => output,
        }
    }
}

/// Converts individual files through an injected [`Transform`].
pub struct FileTranspiler {
    transform: Box<dyn Transform>,
    target_language: String,
}

impl FileTranspiler {
    pub fn new(transform: Box<dyn Transform>, target_language: impl Into<String>) -> Self {
        Self {
            transform,
            target_language: target_language.into(),
        }
    }

    /// Convert or copy `input` to `output`.
    ///
    /// Source files are transformed, sanitized, and written with the target
    /// extension. Everything else is copied byte for byte. Parent
    /// directories of the destination are created as needed.
    pub fn process(&self, input: &Path, output: &Path) -> Result<FileOutcome> {
        let language = match classify(input).language {
            Some(language) => language,
            None => {
                copy_file(input, output)?;
                debug!("Copied {}", input.display());
                return Ok(FileOutcome::Copied {
                    output: output.to_path_buf(),
                });
            }
        };

        let job = ConversionJob::new(input, output, language, self.target_language.as_str());
        self.run(&job)?;

        Ok(FileOutcome::Converted {
            output: job.output_path,
            language,
        })
    }

    fn run(&self, job: &ConversionJob) -> Result<()> {
        info!(
            "Converting {} from {} to {}",
            job.input_path.display(),
            job.source_language,
            job.target_language
        );

        let source =
            fs::read_to_string(&job.input_path).map_err(|e| Error::read(&job.input_path, e))?;

        let generated = self
            .transform
            .transform(&source, job.source_language, &job.target_language)
            .map_err(|e| Error::transform(&job.input_path, e))?;

        write_file(&job.output_path, sanitize(&generated).as_bytes())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::create_dir(parent, e))
        }
        _ => Ok(()),
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    fs::copy(from, to).map_err(|source| Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| Error::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fixed(response: &'static str) -> Box<dyn Transform> {
        Box::new(
            move |_: &str, _: Language, _: &str| -> std::result::Result<String, TransformError> {
                Ok(response.to_string())
            },
        )
    }

    #[test]
    fn test_conversion_job_rewrites_extension() {
        let job = ConversionJob::new("in/main.go", "out/main.go", Language::Go, "Python");
        assert_eq!(job.output_path, PathBuf::from("out/main.py"));
        assert_eq!(job.target_language, "Python");
    }

    #[test]
    fn test_conversion_job_unknown_target_keeps_extension() {
        let job = ConversionJob::new("in/main.go", "out/main.go", Language::Go, "cobol");
        assert_eq!(job.output_path, PathBuf::from("out/main.go"));
    }

    #[test]
    fn test_process_converts_source() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("hello.go");
        fs::write(&input, "func helloWorld() {\n\tfmt.Println(\"Hello, World!\")\n}").unwrap();

        let response = "```python\ndef hello_world():\n    print('Hello, World!')\n```";
        let transpiler = FileTranspiler::new(fixed(response), "python");
        let output = temp.path().join("out").join("hello.go");

        let outcome = transpiler.process(&input, &output).unwrap();
        let expected = temp.path().join("out").join("hello.py");
        assert_eq!(
            outcome,
            FileOutcome::Converted {
                output: expected.clone(),
                language: Language::Go
            }
        );
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            "def hello_world():\n    print('Hello, World!')"
        );
    }

    #[test]
    fn test_process_passes_content_and_languages() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("app.PY");
        fs::write(&input, "print(1)").unwrap();

        let transform = |source: &str,
                         from: Language,
                         to: &str|
         -> std::result::Result<String, TransformError> {
            Ok(format!("{}|{}|{}", source, from, to))
        };
        let transpiler = FileTranspiler::new(Box::new(transform), "Java");
        let outcome = transpiler
            .process(&input, &temp.path().join("out/app.PY"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(outcome.output()).unwrap(),
            "print(1)|Python|Java"
        );
        assert!(outcome.output().ends_with("out/app.java"));
    }

    #[test]
    fn test_process_copies_non_source_without_transform() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("logo.css");
        let bytes: Vec<u8> = vec![0, 159, 146, 150, b'\n', b'a'];
        fs::write(&input, &bytes).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let transform =
            move |_: &str, _: Language, _: &str| -> std::result::Result<String, TransformError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(String::new())
            };

        let transpiler = FileTranspiler::new(Box::new(transform), "python");
        let output = temp.path().join("nested/dir/logo.css");
        let outcome = transpiler.process(&input, &output).unwrap();

        assert_eq!(outcome, FileOutcome::Copied { output: output.clone() });
        assert_eq!(fs::read(&output).unwrap(), bytes);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_transform_failure_names_input() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("main.go");
        fs::write(&input, "package main").unwrap();

        let failing =
            |_: &str, _: Language, _: &str| -> std::result::Result<String, TransformError> {
                Err(TransformError::RateLimited)
            };
        let transpiler = FileTranspiler::new(Box::new(failing), "python");
        let output = temp.path().join("out/main.go");

        let err = transpiler.process(&input, &output).unwrap_err();
        match &err {
            Error::Transform { path, source } => {
                assert_eq!(path, &input);
                assert!(matches!(source, TransformError::RateLimited));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!temp.path().join("out/main.py").exists());
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let temp = TempDir::new().unwrap();
        let transpiler = FileTranspiler::new(fixed("x"), "python");
        let err = transpiler
            .process(&temp.path().join("gone.go"), &temp.path().join("out/gone.go"))
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_rerun_overwrites_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("main.go");
        fs::write(&input, "package main").unwrap();
        let output = temp.path().join("main.go.out");

        FileTranspiler::new(fixed("first"), "python")
            .process(&input, &output)
            .unwrap();
        FileTranspiler::new(fixed("second"), "python")
            .process(&input, &output)
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("main.go.py")).unwrap(),
            "second"
        );
    }
}
