//! Process configuration.
//!
//! Loaded via the `config` crate from environment variables:
//!
//! - `OPENAI_MODEL`, `OPENAI_TEMPERATURE`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`
//!   configure the completion backend
//! - `AGENT_MAX_TURNS` bounds the loop (default 10)
//!
//! Command line flags override both.

use loan_agent_completion::BackendConfig;
use loan_agent_conversation::SessionConfig;
use loan_agent_dispatch::LoopConfig;

/// Everything the binary needs to run one application.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    /// Completion backend settings.
    pub backend: BackendConfig,
    /// Loop limits.
    pub agent: LoopConfig,
}

impl AgentConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_MODEL` is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_sources(
            config::Environment::with_prefix("OPENAI"),
            config::Environment::with_prefix("AGENT"),
        )
    }

    fn from_sources(
        backend: config::Environment,
        agent: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let backend: BackendConfig = config::Config::builder()
            .add_source(backend.try_parsing(true))
            .build()?
            .try_deserialize()?;

        let agent: LoopConfig = config::Config::builder()
            .add_source(agent.try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(Self { backend, agent })
    }

    /// Session parameters derived from the backend settings.
    #[must_use]
    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(self.backend.model.clone(), self.backend.temperature)
    }
}
