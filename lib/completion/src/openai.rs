//! OpenAI-compatible chat completions backend.

use crate::backend::{
    CompletionBackend, CompletionProvider, CompletionRequest, CompletionResponse, PromptMessage,
    TokenUsage,
};
use crate::config::BackendConfig;
use crate::error::CompletionError;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wire body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [PromptMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Backend speaking the OpenAI chat completions protocol.
///
/// Model and temperature come from each [`CompletionRequest`]; the backend
/// itself only owns the endpoint and credentials.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    provider: CompletionProvider,
}

impl OpenAiBackend {
    /// Creates a backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be
    /// built.
    pub fn new(config: &BackendConfig) -> Result<Self, CompletionError> {
        if config.base_url.trim().is_empty() {
            return Err(CompletionError::InvalidConfig {
                reason: "base_url must not be empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CompletionError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let provider = if config.base_url.starts_with("https://api.openai.com") {
            CompletionProvider::OpenAi
        } else {
            CompletionProvider::OpenAiCompatible
        };

        Ok(Self {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            provider,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = ChatCompletionBody {
            model: &request.model,
            temperature: request.temperature,
            messages: &request.messages,
        };

        let mut builder = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CompletionError::ProviderUnavailable {
                provider: format!("{:?}", self.provider),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);
            return Err(CompletionError::RateLimited { retry_after_secs });
        }

        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::ResponseParseFailed {
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(CompletionError::RequestFailed {
                status: Some(status.as_u16()),
                reason: text,
            });
        }

        let reply = parse_reply(&text, &request.model)?;
        debug!(
            input_tokens = reply.usage.input_tokens,
            output_tokens = reply.usage.output_tokens,
            "completion received"
        );
        Ok(reply)
    }

    fn provider(&self) -> CompletionProvider {
        self.provider
    }
}

/// Decodes a chat completions body, taking the first choice.
fn parse_reply(body: &str, requested_model: &str) -> Result<CompletionResponse, CompletionError> {
    let reply: ChatCompletionReply =
        serde_json::from_str(body).map_err(|e| CompletionError::ResponseParseFailed {
            reason: e.to_string(),
        })?;

    let choice = reply
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::NoChoices)?;

    let content = choice
        .message
        .content
        .ok_or_else(|| CompletionError::ResponseParseFailed {
            reason: "first choice has no message content".to_string(),
        })?;

    let usage = reply
        .usage
        .map(|u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        model: reply.model.unwrap_or_else(|| requested_model.to_string()),
        usage,
    })
}

fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
