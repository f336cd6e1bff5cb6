//! The action-dispatch loop.
//!
//! Each iteration sends the pending prompt, reads the reply with
//! [`ReplyDirective`], and either finishes or runs one capability and turns
//! its result into the next prompt:
//!
//! ```text
//! RUNNING(n) --Action, n+1 <  max--> RUNNING(n+1)
//! RUNNING(n) --Action, n+1 == max--> ABORTED(turn budget exhausted)
//! RUNNING(n) --Final Decision:-----> DONE(reply)
//! RUNNING(n) --neither-------------> ABORTED(no action or decision found)
//! RUNNING(n) --unknown action------> error
//! ```
//!
//! Iterations are strictly sequential; the completion call is the only
//! suspension point.

use crate::capability::CapabilityTable;
use crate::error::LoopError;
use crate::grammar::ReplyDirective;
use loan_agent_conversation::ConversationSession;
use loan_agent_core::{Result, RunId};
use rootcause::prelude::ResultExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Prefix of every prompt that carries a capability result.
pub const OBSERVATION_PREFIX: &str = "Observation: ";

/// Loop limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Maximum number of completion calls in one run.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
}

fn default_max_turns() -> usize {
    10
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
        }
    }
}

impl LoopConfig {
    /// Sets the turn budget.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Why a run ended without a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The reply had no action line and no final decision.
    NoActionOrDecision,
    /// `max_turns` actions ran without a final decision.
    TurnBudgetExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActionOrDecision => f.write_str("no action or decision found"),
            Self::TurnBudgetExhausted => f.write_str("turn budget exhausted"),
        }
    }
}

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model produced a final decision; `decision` is its reply verbatim.
    Decided { decision: String, turns: usize },
    /// The run stopped cleanly without a result.
    Stopped { reason: StopReason, turns: usize },
}

impl LoopOutcome {
    /// The final decision text, if the run succeeded.
    #[must_use]
    pub fn decision(&self) -> Option<&str> {
        match self {
            Self::Decided { decision, .. } => Some(decision),
            Self::Stopped { .. } => None,
        }
    }

    /// Number of actions dispatched before the run ended.
    #[must_use]
    pub fn turns(&self) -> usize {
        match self {
            Self::Decided { turns, .. } | Self::Stopped { turns, .. } => *turns,
        }
    }
}

/// Mutable per-run state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoopState {
    /// Actions dispatched so far.
    pub turn_index: usize,
    /// What will be sent on the next completion call.
    pub next_prompt: String,
    /// The final decision, once reached.
    pub terminal_result: Option<String>,
}

impl LoopState {
    /// State at the start of a run.
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            turn_index: 0,
            next_prompt: question.into(),
            terminal_result: None,
        }
    }
}

/// Result of one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An action ran; call [`ActionLoop::step`] again.
    Continue,
    /// The run is over.
    Finished(LoopOutcome),
}

/// Drives a conversation session against a capability table.
#[derive(Debug)]
pub struct ActionLoop {
    id: RunId,
    session: ConversationSession,
    capabilities: CapabilityTable,
    config: LoopConfig,
    state: LoopState,
    finished: Option<LoopOutcome>,
}

impl ActionLoop {
    /// Creates a loop. The session and table are owned for the whole run.
    #[must_use]
    pub fn new(session: ConversationSession, capabilities: CapabilityTable, config: LoopConfig) -> Self {
        Self {
            id: RunId::new(),
            session,
            capabilities,
            config,
            state: LoopState::default(),
            finished: None,
        }
    }

    /// Runs until a decision, a clean stop, or a fatal error.
    ///
    /// # Errors
    ///
    /// - [`LoopError::ServiceUnavailable`] if a completion call fails
    /// - [`LoopError::UnknownAction`] if the model names an unregistered action
    /// - [`LoopError::CapabilityFailed`] if argument decoding or the capability
    ///   itself fails
    #[instrument(skip_all, fields(run = %self.id, max_turns = self.config.max_turns))]
    pub async fn run(&mut self, question: &str) -> Result<LoopOutcome, LoopError> {
        self.begin(question);
        loop {
            if let Step::Finished(outcome) = self.step().await? {
                match &outcome {
                    LoopOutcome::Decided { turns, .. } => {
                        info!(turns, "final decision reached");
                    }
                    LoopOutcome::Stopped { reason, turns } => {
                        warn!(turns, %reason, "run stopped without a decision");
                    }
                }
                return Ok(outcome);
            }
        }
    }

    /// Starts a fresh run: the transcript is cut back to the system prompt
    /// and the next [`step`](Self::step) sends `question`.
    pub fn begin(&mut self, question: impl Into<String>) {
        self.session.reset();
        self.state = LoopState::new(question);
        self.finished = None;
    }

    /// Performs one iteration.
    ///
    /// Once the run has finished, returns the same outcome again without
    /// contacting the completion service.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn step(&mut self) -> Result<Step, LoopError> {
        if let Some(outcome) = &self.finished {
            return Ok(Step::Finished(outcome.clone()));
        }
        let step = self.advance().await?;
        if let Step::Finished(outcome) = &step {
            self.finished = Some(outcome.clone());
        }
        Ok(step)
    }

    async fn advance(&mut self) -> Result<Step, LoopError> {
        let turn = self.state.turn_index;
        if turn >= self.config.max_turns {
            return Ok(self.stop(StopReason::TurnBudgetExhausted));
        }

        info!(step = turn + 1, "requesting completion");
        let reply = self
            .session
            .send(&self.state.next_prompt)
            .await
            .context(LoopError::ServiceUnavailable { turn: turn + 1 })?;
        debug!(%reply, "model reply");

        let action = match ReplyDirective::parse(&reply) {
            ReplyDirective::Action(action) => action,
            ReplyDirective::FinalDecision(decision) => {
                self.state.terminal_result = Some(decision.clone());
                return Ok(Step::Finished(LoopOutcome::Decided {
                    decision,
                    turns: turn,
                }));
            }
            ReplyDirective::Unrecognized => {
                return Ok(self.stop(StopReason::NoActionOrDecision));
            }
        };

        let Some(registration) = self.capabilities.get(&action.name) else {
            return Err(LoopError::UnknownAction {
                name: action.name,
                raw_argument: action.raw_argument,
            }
            .into());
        };

        info!(action = %action.name, input = %action.raw_argument, "executing action");
        let observation = registration
            .dispatch(&action.raw_argument)
            .context(LoopError::CapabilityFailed {
                name: action.name.clone(),
                raw_argument: action.raw_argument.clone(),
            })?;
        info!(%observation, "observation");

        self.state.next_prompt = format!("{OBSERVATION_PREFIX}{observation}");
        self.state.turn_index += 1;

        if self.state.turn_index == self.config.max_turns {
            return Ok(self.stop(StopReason::TurnBudgetExhausted));
        }
        Ok(Step::Continue)
    }

    fn stop(&self, reason: StopReason) -> Step {
        Step::Finished(LoopOutcome::Stopped {
            reason,
            turns: self.state.turn_index,
        })
    }

    /// The run identifier used in log spans.
    #[must_use]
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// The underlying session, e.g. to inspect the transcript after a run.
    #[must_use]
    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// The capability table.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }
}
