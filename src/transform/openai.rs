//! OpenAI-compatible chat completion backend.
//!
//! Sends the conversion prompt as a single user message:
//! POST {endpoint} with `{"model": ..., "messages": [{"role": "user", ...}]}`
//! and returns `choices[0].message.content`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

use super::{build_prompt, Transform, TransformError};
use crate::config::BackendConfig;
use crate::language::Language;

/// Blocking [`Transform`] backed by a chat completions endpoint.
pub struct ChatCompletionBackend {
    http: Client,
    runtime: Runtime,
    config: BackendConfig,
    api_key: Option<String>,
}

impl ChatCompletionBackend {
    /// Create a backend, reading the API key from the environment variable
    /// named by `config.api_key_env`.
    ///
    /// A missing key is not an error here; it is reported by the first
    /// [`Transform::transform`] call, so runs that only copy files still work.
    pub fn new(config: BackendConfig) -> Result<Self, TransformError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::with_api_key(config, api_key)
    }

    /// Create a backend with an explicit API key.
    pub fn with_api_key(
        config: BackendConfig,
        api_key: Option<String>,
    ) -> Result<Self, TransformError> {
        let http = Client::builder()
            .user_agent(concat!("codeport/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let runtime = Runtime::new().map_err(TransformError::Runtime)?;

        Ok(Self {
            http,
            runtime,
            config,
            api_key,
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, TransformError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransformError::Timeout
                } else {
                    TransformError::Network(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        match status.as_u16() {
            200..=299 => parse_response(&body),
            429 => Err(TransformError::RateLimited),
            code => Err(TransformError::Api { status: code, body }),
        }
    }
}

impl Transform for ChatCompletionBackend {
    fn transform(&self, source: &str, from: Language, to: &str) -> Result<String, TransformError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TransformError::MissingApiKey(self.config.api_key_env.clone()))?;

        let prompt = build_prompt(source, from, to);
        debug!(
            "Chat request: model={} prompt_bytes={}",
            self.config.model,
            prompt.len()
        );

        self.runtime.block_on(self.complete(api_key, &prompt))
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract the first choice's message content from a response body.
fn parse_response(body: &str) -> Result<String, TransformError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| TransformError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| TransformError::MalformedResponse("no content in first choice".to_string()))
}
