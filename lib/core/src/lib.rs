//! Core types shared by the loan-agent crates.
//!
//! This crate only carries the pieces every layer needs: the rootcause-backed
//! `Result` alias and strongly-typed identifiers.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ConversationSessionId, MessageId, ParseIdError, RunId};
