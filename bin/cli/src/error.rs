//! Top-level errors for the binary.

use std::fmt;

/// What the binary was doing when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Environment configuration could not be loaded.
    Config,
    /// The completion backend could not be constructed.
    Backend,
    /// The default capabilities could not be registered.
    Capabilities,
    /// The agent loop aborted.
    Run,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "failed to load configuration"),
            Self::Backend => write!(f, "failed to create completion backend"),
            Self::Capabilities => write!(f, "failed to register capabilities"),
            Self::Run => write!(f, "agent run aborted"),
        }
    }
}

impl std::error::Error for CliError {}
