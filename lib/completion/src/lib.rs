//! Completion service boundary.
//!
//! This crate provides:
//!
//! - **Request/response types**: model identifier, temperature and the ordered
//!   message list that make up one completion call
//! - **Backend trait**: the seam the conversation session talks through
//! - **OpenAI backend**: an OpenAI-compatible `chat/completions` client
//! - **Scripted backend**: canned replies for tests and offline replays

pub mod backend;
pub mod config;
pub mod error;
pub mod openai;
pub mod scripted;

pub use backend::{
    CompletionBackend, CompletionProvider, CompletionRequest, CompletionResponse, PromptMessage,
    PromptRole, TokenUsage,
};
pub use config::BackendConfig;
pub use error::CompletionError;
pub use openai::OpenAiBackend;
pub use scripted::ScriptedBackend;
