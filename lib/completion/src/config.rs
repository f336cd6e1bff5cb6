//! Backend configuration.
//!
//! Deserialized by the binary from `OPENAI_*` environment variables via the
//! `config` crate; library code only ever receives it as a value.

use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible completion backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL for the API, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as a bearer token, if the server requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl BackendConfig {
    /// Creates a configuration pointing at the public OpenAI API.
    #[must_use]
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_key: Some(api_key.into()),
            model: model.into(),
            temperature: 0.0,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns the chat completions endpoint for this configuration.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
