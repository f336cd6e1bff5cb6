//! Error types for the completion crate.

use std::fmt;

/// Errors from completion backend operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The service could not be reached.
    ProviderUnavailable { provider: String, reason: String },
    /// The service rejected the request.
    RequestFailed { status: Option<u16>, reason: String },
    /// The response body could not be decoded.
    ResponseParseFailed { reason: String },
    /// The response carried no choice to read a reply from.
    NoChoices,
    /// Rate limit exceeded.
    RateLimited { retry_after_secs: Option<u64> },
    /// Invalid configuration.
    InvalidConfig { reason: String },
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderUnavailable { provider, reason } => {
                write!(f, "completion provider '{provider}' unavailable: {reason}")
            }
            Self::RequestFailed {
                status: Some(status),
                reason,
            } => write!(f, "completion request failed with status {status}: {reason}"),
            Self::RequestFailed {
                status: None,
                reason,
            } => write!(f, "completion request failed: {reason}"),
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse completion response: {reason}")
            }
            Self::NoChoices => write!(f, "completion response contained no choices"),
            Self::RateLimited { retry_after_secs } => {
                if let Some(secs) = retry_after_secs {
                    write!(f, "rate limited, retry after {secs}s")
                } else {
                    write!(f, "rate limited")
                }
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid completion configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for CompletionError {}
