//! Conversation session for the loan agent.
//!
//! This crate provides:
//!
//! - **Messages**: role-tagged, immutable transcript entries
//! - **Transcript**: the ordered history sent to the model every turn
//! - **Session**: appends exchanges and asks the completion backend for the
//!   next assistant reply

pub mod error;
pub mod message;
pub mod session;
pub mod transcript;

pub use error::SessionError;
pub use message::{Message, MessageRole};
pub use session::{ConversationSession, SessionConfig};
pub use transcript::Transcript;
