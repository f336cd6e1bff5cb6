//! Simulated credit bureau lookup.

use loan_agent_dispatch::{Arguments, CapabilityError, Observation};

/// Action name.
pub const NAME: &str = "check_cibil_score";

/// Score reported for a PAN the bureau has no file on.
pub const DEFAULT_SCORE: u16 = 600;

const SCORES: &[(&str, u16)] = &[
    ("ABCDE1234F", 780),
    ("PQRST5678G", 680),
    ("LMNOP9012H", 550),
];

/// Returns the CIBIL score on file for a PAN.
#[must_use]
pub fn cibil_score(pan: &str) -> u16 {
    SCORES
        .iter()
        .find(|(known, _)| *known == pan)
        .map_or(DEFAULT_SCORE, |(_, score)| *score)
}

/// `check_cibil_score: <PAN>`
///
/// # Errors
///
/// Fails only if called without a text argument.
pub fn check_cibil_score(args: &Arguments) -> Result<Observation, CapabilityError> {
    let pan = args.text(0)?;
    Ok(Observation::text(format!("CIBIL Score: {}", cibil_score(pan))))
}
