//! Conversation session.
//!
//! A session owns one transcript and one handle to a completion backend.
//! Model and temperature are fixed at construction.

use crate::error::SessionError;
use crate::message::Message;
use crate::transcript::Transcript;
use loan_agent_completion::{CompletionBackend, CompletionRequest};
use loan_agent_core::{ConversationSessionId, Result};
use rootcause::prelude::ResultExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sampling parameters sent with every completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f32,
}

impl SessionConfig {
    /// Creates a session configuration.
    #[must_use]
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }
}

/// A conversation with the completion service.
pub struct ConversationSession {
    id: ConversationSessionId,
    config: SessionConfig,
    backend: Arc<dyn CompletionBackend>,
    transcript: Transcript,
}

impl fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("provider", &self.backend.provider())
            .field("messages", &self.transcript.len())
            .finish()
    }
}

impl ConversationSession {
    /// Starts a session whose transcript holds only `system_prompt`.
    #[must_use]
    pub fn new(
        system_prompt: impl Into<String>,
        config: SessionConfig,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            id: ConversationSessionId::new(),
            config,
            backend,
            transcript: Transcript::new(system_prompt),
        }
    }

    /// Sends `user_text` and returns the assistant reply.
    ///
    /// The completion service sees the whole transcript followed by the new
    /// user message. On success both messages are appended; on failure the
    /// transcript is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ServiceUnavailable`] if the backend fails for
    /// any reason. The call is not retried.
    #[instrument(skip(self, user_text), fields(session = %self.id, turn = self.transcript.exchange_count() + 1))]
    pub async fn send(&mut self, user_text: &str) -> Result<String, SessionError> {
        let user = Message::user(user_text);

        let request = CompletionRequest::new(self.config.model.clone(), self.config.temperature)
            .with_messages(self.transcript.to_prompts())
            .with_message(user.to_prompt());

        let response = self
            .backend
            .complete(&request)
            .await
            .context(SessionError::ServiceUnavailable {
                session_id: self.id,
                model: self.config.model.clone(),
            })?;

        debug!(
            chars = response.content.len(),
            tokens = response.usage.total(),
            "assistant replied"
        );

        let reply = response.content;
        self.transcript
            .push_exchange(user, Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Drops every exchange, leaving only the system prompt.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new(self.transcript.system_prompt());
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> ConversationSessionId {
        self.id
    }

    /// Returns the sampling configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Returns the conversation so far.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRole;
    use loan_agent_completion::{CompletionError, PromptRole, ScriptedBackend};

    fn session_with(backend: Arc<ScriptedBackend>) -> ConversationSession {
        ConversationSession::new("You are a loan officer.", SessionConfig::new("test-model", 0.2), backend)
    }

    #[test]
    fn initialize_holds_one_system_message() {
        let session = session_with(Arc::new(ScriptedBackend::new(Vec::<String>::new())));

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().messages()[0].role, MessageRole::System);
        assert_eq!(session.transcript().system_prompt(), "You are a loan officer.");
    }

    #[tokio::test]
    async fn send_appends_exactly_two_messages() {
        let backend = Arc::new(ScriptedBackend::new(["reply one", "reply two"]));
        let mut session = session_with(backend.clone());

        let first = session.send("question").await.expect("reply");
        assert_eq!(first, "reply one");
        assert_eq!(session.transcript().len(), 3);

        let second = session.send("Observation: CIBIL Score: 780").await.expect("reply");
        assert_eq!(second, "reply two");
        assert_eq!(session.transcript().len(), 5);

        let roles: Vec<_> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
    }

    #[tokio::test]
    async fn request_carries_config_and_full_transcript() {
        let backend = Arc::new(ScriptedBackend::new(["a1", "a2"]));
        let mut session = session_with(backend.clone());

        session.send("q1").await.expect("reply");
        session.send("q2").await.expect("reply");

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);

        let last = &requests[1];
        assert_eq!(last.model, "test-model");
        assert_eq!(last.temperature, 0.2);
        let sent: Vec<_> = last
            .messages
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            sent,
            vec![
                (PromptRole::System, "You are a loan officer."),
                (PromptRole::User, "q1"),
                (PromptRole::Assistant, "a1"),
                (PromptRole::User, "q2"),
            ]
        );
    }

    #[tokio::test]
    async fn backend_failure_is_service_unavailable_and_leaves_transcript() {
        let backend = Arc::new(
            ScriptedBackend::new(["fine"]).then_fail(CompletionError::ProviderUnavailable {
                provider: "openai".to_string(),
                reason: "connection refused".to_string(),
            }),
        );
        let mut session = session_with(backend.clone());
        session.send("q1").await.expect("reply");

        let err = session.send("q2").await.unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("completion service unavailable"));
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(session.transcript().last_reply(), Some("fine"));
    }

    #[tokio::test]
    async fn reset_keeps_only_the_system_prompt() {
        let backend = Arc::new(ScriptedBackend::new(["a1", "a2"]));
        let mut session = session_with(backend.clone());
        session.send("q1").await.expect("reply");

        session.reset();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript().system_prompt(), "You are a loan officer.");

        session.send("q2").await.expect("reply");
        let sent: Vec<_> = backend.requests()[1]
            .messages
            .iter()
            .map(|m| m.content.clone())
            .collect();
        assert_eq!(sent, vec!["You are a loan officer.", "q2"]);
    }

    #[tokio::test]
    async fn empty_choice_is_service_unavailable() {
        let mut session = session_with(Arc::new(ScriptedBackend::new(Vec::<String>::new())));

        let err = session.send("q").await.unwrap_err();
        assert!(err.to_string().contains("completion service unavailable"));
        assert_eq!(session.transcript().len(), 1);
    }
}
