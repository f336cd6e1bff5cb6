//! Ordered conversation history.
//!
//! A transcript always starts with exactly one system message and then grows
//! by whole exchanges only, so user and assistant messages strictly alternate
//! after the system prompt. Nothing outside this module can reorder, remove or
//! edit a message once it is in.

use crate::message::{Message, MessageRole};
use loan_agent_completion::PromptMessage;
use serde::Serialize;

/// The ordered message history exchanged with the completion service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates a transcript holding only the system prompt.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Appends one user prompt and the assistant reply it produced.
    pub(crate) fn push_exchange(&mut self, user: Message, assistant: Message) {
        debug_assert_eq!(user.role, MessageRole::User);
        debug_assert_eq!(assistant.role, MessageRole::Assistant);
        self.messages.push(user);
        self.messages.push(assistant);
    }

    /// Returns the system prompt.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        // Invariant: index 0 is the system message, set in `new`.
        &self.messages[0].content
    }

    /// Returns every message in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates over messages in order.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Returns the number of messages, including the system prompt.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; a transcript holds at least its system prompt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of completed user/assistant exchanges.
    #[must_use]
    pub fn exchange_count(&self) -> usize {
        (self.messages.len() - 1) / 2
    }

    /// Returns the most recent assistant reply, if any.
    #[must_use]
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.as_str())
    }

    /// Converts the whole history to wire messages.
    #[must_use]
    pub fn to_prompts(&self) -> Vec<PromptMessage> {
        self.messages.iter().map(Message::to_prompt).collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transcript_holds_only_system_prompt() {
        let transcript = Transcript::new("rules");

        assert_eq!(transcript.len(), 1);
        assert!(!transcript.is_empty());
        assert_eq!(transcript.system_prompt(), "rules");
        assert_eq!(transcript.messages()[0].role, MessageRole::System);
        assert_eq!(transcript.exchange_count(), 0);
        assert_eq!(transcript.last_reply(), None);
    }

    #[test]
    fn exchanges_alternate_after_system_prompt() {
        let mut transcript = Transcript::new("rules");
        transcript.push_exchange(Message::user("q1"), Message::assistant("a1"));
        transcript.push_exchange(Message::user("q2"), Message::assistant("a2"));

        let roles: Vec<_> = transcript.iter().map(|m| m.role).collect();
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
        assert_eq!(transcript.exchange_count(), 2);
        assert_eq!(transcript.last_reply(), Some("a2"));
    }

    #[test]
    fn to_prompts_preserves_order() {
        let mut transcript = Transcript::new("rules");
        transcript.push_exchange(Message::user("q"), Message::assistant("a"));

        let contents: Vec<_> = transcript
            .to_prompts()
            .into_iter()
            .map(|p| p.content)
            .collect();
        assert_eq!(contents, vec!["rules", "q", "a"]);
    }
}
