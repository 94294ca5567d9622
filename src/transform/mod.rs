//! Text transformation seam.
//!
//! The conversion pipeline hands each source file to a [`Transform`] and
//! treats the returned text as code in the target language. The production
//! implementation is [`ChatCompletionBackend`], which forwards a prompt to an
//! OpenAI-compatible chat endpoint. Tests inject closures instead.

mod openai;

pub use openai::ChatCompletionBackend;

use thiserror::Error;

use crate::language::Language;

/// Errors raised by a transform backend.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited by backend")]
    RateLimited,
    #[error("backend returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Turns source code in one language into code in another.
pub trait Transform: Send + Sync {
    fn transform(&self, source: &str, from: Language, to: &str) -> Result<String, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&str, Language, &str) -> Result<String, TransformError> + Send + Sync,
{
    fn transform(&self, source: &str, from: Language, to: &str) -> Result<String, TransformError> {
        self(source, from, to)
    }
}

/// Build the instruction sent to the generation backend.
pub fn build_prompt(source: &str, from: Language, to: &str) -> String {
    format!(
        "Convert the following {} code to {}:\n\n{}. Just return the converted code, no other text.",
        from.name(),
        to,
        source
    )
}
