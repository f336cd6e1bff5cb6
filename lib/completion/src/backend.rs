//! Completion backend abstraction.
//!
//! A completion call is the whole transcript plus sampling parameters in,
//! one assistant reply out. Transport, auth and retry policy belong to the
//! backend implementation.

use crate::error::CompletionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Available completion providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionProvider {
    /// OpenAI API.
    OpenAi,
    /// Any server speaking the OpenAI chat completions protocol.
    OpenAiCompatible,
    /// In-process backend (tests, replays).
    Local,
}

/// The role of a message sender, as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// System instructions.
    System,
    /// User/human message.
    User,
    /// Assistant/AI message.
    Assistant,
}

/// A single message in a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    /// The role of the message sender.
    pub role: PromptRole,
    /// The content of the message.
    pub content: String,
}

impl PromptMessage {
    /// Creates a new prompt message.
    #[must_use]
    pub fn new(role: PromptRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(PromptRole::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(PromptRole::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(PromptRole::Assistant, content)
    }
}

/// A request to a completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// The full ordered conversation.
    pub messages: Vec<PromptMessage>,
}

impl CompletionRequest {
    /// Creates a request with no messages yet.
    #[must_use]
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            messages: Vec::new(),
        }
    }

    /// Appends a message.
    #[must_use]
    pub fn with_message(mut self, message: PromptMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends several messages in order.
    #[must_use]
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = PromptMessage>) -> Self {
        self.messages.extend(messages);
        self
    }
}

/// A response from a completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The assistant reply text.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
    /// Token usage statistics.
    #[serde(default)]
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Creates a response with no usage information.
    #[must_use]
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: TokenUsage::default(),
        }
    }
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens.
    pub input_tokens: u32,
    /// Number of output tokens.
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Returns the total number of tokens.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Trait for completion backends.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produces the next assistant reply for the given conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached, rejects the request,
    /// or answers without a usable choice.
    async fn complete(&self, request: &CompletionRequest)
    -> Result<CompletionResponse, CompletionError>;

    /// Returns the provider type.
    fn provider(&self) -> CompletionProvider;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u32::MAX,
            output_tokens: 7,
        };
        assert_eq!(usage.total(), u32::MAX);

        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 30,
        };
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn request_builder_keeps_order() {
        let request = CompletionRequest::new("gpt-4o-mini", 0.0)
            .with_message(PromptMessage::system("be terse"))
            .with_messages([PromptMessage::user("hi"), PromptMessage::assistant("hello")]);

        assert_eq!(request.model, "gpt-4o-mini");
        let roles: Vec<_> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![PromptRole::System, PromptRole::User, PromptRole::Assistant]
        );
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(PromptMessage::assistant("ok")).expect("serialize");
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
