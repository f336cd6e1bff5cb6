//! Reference lending capabilities.
//!
//! Simulated stand-ins for the services a loan officer agent would call:
//! a credit bureau, identity checks, an eligibility calculator and an
//! employment registry. All data is canned.

pub mod credit;
pub mod eligibility;
pub mod employment;
pub mod identity;
pub mod prompt;

use loan_agent_dispatch::{ArgumentConvention, CapabilityError, CapabilityTable};

pub use prompt::{SAMPLE_APPLICATION, SYSTEM_PROMPT};

/// Registers every lending capability under the name the system prompt uses.
///
/// # Errors
///
/// Returns [`CapabilityError::DuplicateName`] if `table` already holds one of
/// the names.
pub fn register_defaults(table: &mut CapabilityTable) -> Result<(), CapabilityError> {
    table
        .register(
            credit::NAME,
            ArgumentConvention::SingleText,
            credit::check_cibil_score,
        )?
        .register(
            identity::NAME,
            ArgumentConvention::labeled_triple(),
            identity::verify_age_and_documents,
        )?
        .register(
            eligibility::NAME,
            ArgumentConvention::numeric_pair(),
            eligibility::calculate_loan_eligibility,
        )?
        .register(
            employment::NAME,
            ArgumentConvention::SingleText,
            employment::check_employment_history,
        )?;
    Ok(())
}

/// A table holding only the lending capabilities.
///
/// # Errors
///
/// Cannot fail in practice; the names are distinct.
pub fn default_table() -> Result<CapabilityTable, CapabilityError> {
    let mut table = CapabilityTable::new();
    register_defaults(&mut table)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_registers_four_capabilities() {
        let table = default_table().expect("table");
        assert_eq!(
            table.names(),
            vec![
                "calculate_loan_eligibility",
                "check_cibil_score",
                "check_employment_history",
                "verify_age_and_documents",
            ]
        );
    }

    #[test]
    fn registering_twice_fails() {
        let mut table = default_table().expect("table");
        assert!(matches!(
            register_defaults(&mut table),
            Err(CapabilityError::DuplicateName { .. })
        ));
    }

    #[test]
    fn every_capability_is_named_in_the_system_prompt() {
        let table = default_table().expect("table");
        for name in table.names() {
            assert!(SYSTEM_PROMPT.contains(name), "{name} missing from prompt");
        }
    }

    #[test]
    fn conventions_match_argument_shapes() {
        let table = default_table().expect("table");
        let observation = table
            .get("verify_age_and_documents")
            .expect("registered")
            .dispatch("Aadhaar 123456789012, PAN ABCDE1234F, DOB 1990-05-15")
            .expect("dispatch");
        assert!(!observation.to_string().is_empty());

        let observation = table
            .get("calculate_loan_eligibility")
            .expect("registered")
            .dispatch("60000, 15000")
            .expect("dispatch");
        assert!(observation.to_string().contains("max_loan_amount"));
    }

    #[tokio::test]
    async fn scripted_application_reaches_a_decision() {
        use loan_agent_completion::ScriptedBackend;
        use loan_agent_conversation::{ConversationSession, SessionConfig};
        use loan_agent_dispatch::{ActionLoop, LoopConfig};
        use std::sync::Arc;

        let backend = Arc::new(ScriptedBackend::new([
            "Thought: credit first.\nAction: check_cibil_score: LMNOP9012H\nPAUSE",
            "Thought: now employment.\nAction: check_employment_history: LMNOP9012H\nPAUSE",
            "Thought: income.\nAction: calculate_loan_eligibility: 60000, 15000\nPAUSE",
            "Final Decision: Rejected. CIBIL score 550 is below 750.",
        ]));
        let session = ConversationSession::new(
            SYSTEM_PROMPT,
            SessionConfig::new("test-model", 0.0),
            backend.clone(),
        );
        let mut agent =
            ActionLoop::new(session, default_table().expect("table"), LoopConfig::default());

        let outcome = agent.run(SAMPLE_APPLICATION).await.expect("run");

        assert_eq!(
            outcome.decision(),
            Some("Final Decision: Rejected. CIBIL score 550 is below 750.")
        );
        assert_eq!(outcome.turns(), 3);

        let prompts: Vec<_> = backend
            .requests()
            .iter()
            .map(|r| r.messages.last().expect("prompt").content.clone())
            .collect();
        assert_eq!(prompts[1], "Observation: CIBIL Score: 550");
        assert_eq!(
            prompts[2],
            "Observation: Insufficient work experience (minimum 2 years required)"
        );
        assert_eq!(
            prompts[3],
            r#"Observation: {"max_emi_allowed":15000.0,"max_loan_amount":1502434.11}"#
        );
    }
}
