//! External text generation.
//!
//! [`Generator`] is the seam between the summary pipeline and whatever
//! produces free text. [`OllamaClient`] is the production implementation: it
//! posts a prompt to an Ollama-compatible `/api/generate` endpoint with
//! streaming disabled and returns the `response` field.

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};

/// Boxed future returned by [`Generator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Something that turns a prompt into free text.
///
/// Implementations must report an unreachable backend as
/// [`Error::GenerationUnavailable`] and a backend that answered without a
/// usable result as [`Error::GenerationFailed`]. Dropping the returned
/// future cancels the call.
pub trait Generator: Send + Sync {
    /// Uses a boxed future so that the trait is dyn-compatible.
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

/// Request body for `/api/generate`.
#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Deserialize, Debug)]
struct RawGenerateResponse {
    response: Option<String>,
    error: Option<String>,
    eval_count: Option<u32>,
}

/// Async HTTP client for an Ollama-compatible generate endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    config: GeneratorConfig,
}

impl OllamaClient {
    /// Build a client. The configured timeout bounds each whole request.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rollcall/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::GenerationUnavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Send one non-streaming generate request and return the raw text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };
        debug!(
            "generate request: endpoint={}, model={}, prompt={} chars",
            self.config.endpoint,
            self.config.model,
            prompt.len()
        );

        let start = Instant::now();
        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(unavailable)?;

        let status = resp.status();
        let text = resp.text().await.map_err(unavailable)?;

        debug!(
            "generate response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        parse_generate_body(status.as_u16(), &text)
    }
}

impl Generator for OllamaClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_text(prompt))
    }
}

fn unavailable(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    warn!("text generator {kind}: {err}");
    Error::GenerationUnavailable(format!("{kind}: {err}"))
}

/// Interpret a generate response that did arrive.
fn parse_generate_body(status: u16, text: &str) -> Result<String> {
    let failed = |message: String| {
        warn!("text generator returned HTTP {status}: {message}");
        Error::GenerationFailed { status, message }
    };

    if !(200..300).contains(&status) {
        return Err(failed(text.to_string()));
    }

    let parsed: RawGenerateResponse = serde_json::from_str(text)
        .map_err(|e| failed(format!("malformed response: {e}")))?;

    if let Some(err) = parsed.error {
        return Err(failed(err));
    }
    if let Some(count) = parsed.eval_count {
        trace!("generated {count} tokens");
    }
    parsed
        .response
        .ok_or_else(|| failed("response field missing".to_string()))
}
