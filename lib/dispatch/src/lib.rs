//! Action-dispatch loop for the loan agent.
//!
//! The model answers in free text. Each turn the loop looks for one
//! `Action: <name>: <argument>` line, runs the named capability and feeds
//! `Observation: <result>` back, until the reply carries `Final Decision:` or
//! the turn budget runs out.
//!
//! - [`grammar`]: the two-rule reply matcher
//! - [`argument`]: per-capability argument decoding
//! - [`capability`]: the capability trait and the name-keyed table
//! - [`action_loop`]: the loop state machine

pub mod action_loop;
pub mod argument;
pub mod capability;
pub mod error;
pub mod grammar;

pub use action_loop::{
    ActionLoop, LoopConfig, LoopOutcome, LoopState, OBSERVATION_PREFIX, Step, StopReason,
};
pub use argument::{ArgumentConvention, ArgumentValue, Arguments, ExtraFields, FieldKind};
pub use capability::{Capability, CapabilityTable, Observation, Registration};
pub use error::{CapabilityError, LoopError};
pub use grammar::{ActionRequest, FINAL_DECISION_MARKER, ReplyDirective};
