//! Configuration file for codeport.
//!
//! The config file is optional. When present it sets up the generation
//! backend and extra paths to exclude from traversal.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file names looked up in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codeport.yaml", ".codeport.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Glob patterns for paths to exclude, relative to the traversal root
    /// (e.g., "docs/**", "**/*_test.go")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config from `explicit` if given, otherwise from the first
    /// discovered file, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Usage(format!(
                    "config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::parse_file(path);
        }

        match discover_config() {
            Some(path) => {
                tracing::debug!("Using config {}", path.display());
                Self::parse_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Look for a config file in the working directory, then in the user
/// config directory.
pub fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .or_else(|| {
            ProjectDirs::from("", "", "codeport")
                .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]))
                .filter(|p| p.is_file())
        })
}

/// Settings for the chat completion backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Chat completions URL (default: OpenAI)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name (default: gpt-4o)
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key (default: OPENAI_API_KEY)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Per-request timeout in seconds (default: 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on generated tokens (default: backend decides)
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
        }
    }
}
