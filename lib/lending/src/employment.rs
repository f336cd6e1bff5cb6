//! Simulated employment registry.

use loan_agent_dispatch::{Arguments, CapabilityError, Observation};
use std::fmt;

/// Action name.
pub const NAME: &str = "check_employment_history";

/// Minimum years of experience for salaried applicants.
pub const MIN_SALARIED_EXPERIENCE_YEARS: u32 = 2;

/// How the applicant earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentStatus {
    Salaried,
    SelfEmployed,
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salaried => f.write_str("Salaried"),
            Self::SelfEmployed => f.write_str("Self-Employed"),
        }
    }
}

/// What the registry knows about one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmploymentRecord {
    pub status: EmploymentStatus,
    /// Total years of experience.
    pub experience_years: u32,
    /// Years with the current employer, or in business for the self-employed.
    pub tenure_years: u32,
}

const RECORDS: &[(&str, EmploymentRecord)] = &[
    (
        "ABCDE1234F",
        EmploymentRecord {
            status: EmploymentStatus::Salaried,
            experience_years: 5,
            tenure_years: 3,
        },
    ),
    (
        "PQRST5678G",
        EmploymentRecord {
            status: EmploymentStatus::SelfEmployed,
            experience_years: 4,
            tenure_years: 4,
        },
    ),
    (
        "LMNOP9012H",
        EmploymentRecord {
            status: EmploymentStatus::Salaried,
            experience_years: 1,
            tenure_years: 1,
        },
    ),
];

/// Looks up the employment record for a PAN.
#[must_use]
pub fn lookup(pan: &str) -> Option<EmploymentRecord> {
    RECORDS
        .iter()
        .find(|(known, _)| *known == pan)
        .map(|(_, record)| *record)
}

/// `check_employment_history: <PAN>`
///
/// # Errors
///
/// Fails only if called without a text argument.
pub fn check_employment_history(args: &Arguments) -> Result<Observation, CapabilityError> {
    let pan = args.text(0)?;

    let Some(record) = lookup(pan) else {
        return Ok(Observation::text("Employment history not found"));
    };

    if record.status == EmploymentStatus::Salaried
        && record.experience_years < MIN_SALARIED_EXPERIENCE_YEARS
    {
        return Ok(Observation::text(
            "Insufficient work experience (minimum 2 years required)",
        ));
    }

    Ok(Observation::text(format!(
        "Employment verified - {} with {} years experience",
        record.status, record.experience_years
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_agent_dispatch::ArgumentConvention;

    fn run(pan: &str) -> String {
        let args = ArgumentConvention::SingleText.decode(pan).expect("decode");
        check_employment_history(&args).expect("invoke").to_string()
    }

    #[test]
    fn salaried_with_experience_is_verified() {
        assert_eq!(
            run("ABCDE1234F"),
            "Employment verified - Salaried with 5 years experience"
        );
    }

    #[test]
    fn self_employed_is_verified_regardless_of_minimum() {
        assert_eq!(
            run("PQRST5678G"),
            "Employment verified - Self-Employed with 4 years experience"
        );
    }

    #[test]
    fn junior_salaried_is_rejected() {
        assert_eq!(
            run("LMNOP9012H"),
            "Insufficient work experience (minimum 2 years required)"
        );
    }

    #[test]
    fn unknown_pan_is_not_found() {
        assert_eq!(run("ZZZZZ0000Z"), "Employment history not found");
    }
}
