//! Loan eligibility agent.
//!
//! Runs one application through the action loop and prints the decision.

mod config;
mod error;

use clap::Parser;
use crate::config::AgentConfig;
use crate::error::CliError;
use loan_agent_completion::OpenAiBackend;
use loan_agent_conversation::ConversationSession;
use loan_agent_dispatch::{ActionLoop, LoopOutcome};
use loan_agent_lending::{SAMPLE_APPLICATION, SYSTEM_PROMPT};
use rootcause::prelude::{Report, ResultExt};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when the loop stops without a decision.
const EXIT_UNDECIDED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "loan-agent", version, about = "Loan eligibility agent")]
struct Cli {
    /// Application to assess. Defaults to a built-in sample.
    question: Option<String>,

    /// Maximum number of completion calls; overrides AGENT_MAX_TURNS.
    #[arg(long)]
    max_turns: Option<usize>,

    /// Model identifier; overrides OPENAI_MODEL.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Report<CliError>> {
    let mut config = AgentConfig::from_env().context(CliError::Config)?;
    if let Some(max_turns) = cli.max_turns {
        config.agent = config.agent.with_max_turns(max_turns);
    }
    if let Some(model) = cli.model {
        config.backend.model = model;
    }
    info!(
        model = %config.backend.model,
        max_turns = config.agent.max_turns,
        "Loaded configuration"
    );

    let backend = OpenAiBackend::new(&config.backend).context(CliError::Backend)?;
    let session = ConversationSession::new(SYSTEM_PROMPT, config.session(), Arc::new(backend));
    let capabilities = loan_agent_lending::default_table().context(CliError::Capabilities)?;

    let mut agent = ActionLoop::new(session, capabilities, config.agent);
    let question = cli.question.as_deref().unwrap_or(SAMPLE_APPLICATION);
    let outcome = agent.run(question).await.context(CliError::Run)?;

    match outcome {
        LoopOutcome::Decided { decision, turns } => {
            info!(turns, "Decision reached");
            println!("{decision}");
            Ok(ExitCode::SUCCESS)
        }
        LoopOutcome::Stopped { reason, turns } => {
            warn!(turns, %reason, "Stopped without a decision");
            Ok(ExitCode::from(EXIT_UNDECIDED))
        }
    }
}
