//! Settings for the external text generator.

use std::time::Duration;

use crate::{DEFAULT_GENERATE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// How to reach the text generator used for summaries.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Full URL of the generate endpoint. Default: [`DEFAULT_GENERATE_URL`].
    pub endpoint: String,
    /// Model name sent with every request. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Upper bound on a single generate call, connect through body.
    /// Default: 30 seconds.
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GENERATE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeneratorConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let config = GeneratorConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn builders_override_fields() {
        let config = GeneratorConfig::default()
            .with_endpoint("http://10.0.0.5:11434/api/generate")
            .with_model("mistral")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.endpoint, "http://10.0.0.5:11434/api/generate");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
