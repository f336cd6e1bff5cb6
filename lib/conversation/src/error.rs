//! Error types for the conversation crate.
//!
//! Backend failures arrive as `CompletionError` and are wrapped with
//! rootcause's `.context()` so the report keeps the transport cause.

use loan_agent_core::ConversationSessionId;
use std::fmt;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The completion service could not produce a reply.
    ServiceUnavailable {
        session_id: ConversationSessionId,
        model: String,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceUnavailable { session_id, model } => {
                write!(
                    f,
                    "completion service unavailable for session {session_id} (model {model})"
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}
