//! Reply grammar.
//!
//! A model reply is read with two rules, tried in order:
//!
//! 1. `action`: the first line of the form `Action: <name>: <argument>`, where
//!    `<name>` is one run of word characters and `<argument>` is the rest of
//!    the line, verbatim.
//! 2. `final`: the reply contains the literal `Final Decision:` anywhere.
//!
//! Rule 1 wins if both apply. Only one action is honored per reply; later
//! action lines are ignored.

use regex::Regex;
use std::sync::LazyLock;

/// Marker that ends the loop successfully.
pub const FINAL_DECISION_MARKER: &str = "Final Decision:";

static ACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Action: (\w+): (.*)").expect("action line pattern is valid")
});

/// An action parsed from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Capability name, case-sensitive.
    pub name: String,
    /// Everything after `<name>: ` on the same line.
    pub raw_argument: String,
}

impl ActionRequest {
    /// Creates an action request.
    #[must_use]
    pub fn new(name: impl Into<String>, raw_argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_argument: raw_argument.into(),
        }
    }

    /// Matches a single line against the action rule.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let caps = ACTION_LINE.captures(line)?;
        Some(Self::new(&caps[1], &caps[2]))
    }
}

/// What a reply asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyDirective {
    /// Run one capability.
    Action(ActionRequest),
    /// Stop and hand back the reply verbatim.
    FinalDecision(String),
    /// Neither rule matched.
    Unrecognized,
}

impl ReplyDirective {
    /// Classifies a reply.
    #[must_use]
    pub fn parse(reply: &str) -> Self {
        if let Some(action) = reply.lines().find_map(ActionRequest::from_line) {
            return Self::Action(action);
        }

        if reply.contains(FINAL_DECISION_MARKER) {
            Self::FinalDecision(reply.to_string())
        } else {
            Self::Unrecognized
        }
    }
}
