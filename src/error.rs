//! Library error type.

use std::path::PathBuf;
use thiserror::Error;

use crate::transform::TransformError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("analyzer not initialized, call initialize() first")]
    NotInitialized,

    #[error("cannot access '{path}': {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to convert '{path}': {source}")]
    Transform {
        path: PathBuf,
        source: TransformError,
    },

    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn transform(path: impl Into<PathBuf>, source: TransformError) -> Self {
        Self::Transform {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = Error::read(
            "/path/to/main.go",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.to_string().starts_with("failed to read '/path/to/main.go'"));
    }

    #[test]
    fn test_transform_error_carries_path() {
        let err = Error::transform("src/app.py", TransformError::MissingApiKey("KEY".into()));
        let msg = err.to_string();
        assert!(msg.contains("src/app.py"));
        assert!(msg.contains("KEY"));
    }

    #[test]
    fn test_stat_error_keeps_cause() {
        let err = Error::stat(
            "inputs/missing",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("cannot access 'inputs/missing'"));
        assert!(msg.to_lowercase().contains("permission denied"));
    }

    #[test]
    fn test_not_initialized_display() {
        assert_eq!(
            Error::NotInitialized.to_string(),
            "analyzer not initialized, call initialize() first"
        );
    }
}
