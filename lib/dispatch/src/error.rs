//! Error types for the dispatch crate.
//!
//! - `CapabilityError`: raised by argument decoding, registration, or the
//!   capability itself
//! - `LoopError`: fatal conditions that end a run; lower-level reports are
//!   attached as causes with `.context()`
//!
//! Clean stops (no directive, turn budget) are not errors; see
//! [`StopReason`](crate::action_loop::StopReason).

use std::fmt;

/// Errors from capabilities and the capability table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The raw argument text did not fit the capability's convention.
    InvalidArgument { reason: String },
    /// The capability ran and failed.
    ExecutionFailed { reason: String },
    /// A capability with this name is already registered.
    DuplicateName { name: String },
}

impl CapabilityError {
    /// Shorthand for [`CapabilityError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::DuplicateName { name } => {
                write!(f, "capability '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Fatal errors that end a loop run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopError {
    /// The conversation session could not get a reply.
    ServiceUnavailable { turn: usize },
    /// The reply named an action that is not in the capability table.
    UnknownAction { name: String, raw_argument: String },
    /// A capability or its argument decoding failed.
    CapabilityFailed { name: String, raw_argument: String },
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceUnavailable { turn } => {
                write!(f, "completion service unavailable at turn {turn}")
            }
            Self::UnknownAction { name, raw_argument } => {
                write!(f, "unknown action: {name}: {raw_argument}")
            }
            Self::CapabilityFailed { name, raw_argument } => {
                write!(f, "capability '{name}' failed on input: {raw_argument}")
            }
        }
    }
}

impl std::error::Error for LoopError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_names_action_and_argument() {
        let err = LoopError::UnknownAction {
            name: "approve_everything".to_string(),
            raw_argument: "now".to_string(),
        };
        assert_eq!(err.to_string(), "unknown action: approve_everything: now");
    }

    #[test]
    fn capability_error_display() {
        let err = CapabilityError::invalid_argument("expected 2 fields, got 1");
        assert!(err.to_string().contains("expected 2 fields"));

        let err = CapabilityError::DuplicateName {
            name: "check_cibil_score".to_string(),
        };
        assert!(err.to_string().contains("check_cibil_score"));
    }
}
