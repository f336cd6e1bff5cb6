//! Simulated age and document verification.

use chrono::{Datelike, Utc};
use loan_agent_dispatch::{Arguments, CapabilityError, Observation};
use regex::Regex;
use std::sync::LazyLock;

/// Action name.
pub const NAME: &str = "verify_age_and_documents";

/// Youngest eligible age, inclusive.
pub const MIN_AGE: i32 = 21;
/// Oldest eligible age, inclusive.
pub const MAX_AGE: i32 = 58;

static PAN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]").expect("PAN pattern is valid"));

/// `verify_age_and_documents: Aadhaar <n>, PAN <pan>, DOB <YYYY-MM-DD>`
///
/// # Errors
///
/// Returns [`CapabilityError::InvalidArgument`] if an argument is missing or the
/// DOB year is not a number.
pub fn verify_age_and_documents(args: &Arguments) -> Result<Observation, CapabilityError> {
    verify_age_and_documents_at(args, Utc::now().year())
}

/// Same as [`verify_age_and_documents`], with the current year supplied.
///
/// # Errors
///
/// See [`verify_age_and_documents`].
pub fn verify_age_and_documents_at(
    args: &Arguments,
    current_year: i32,
) -> Result<Observation, CapabilityError> {
    let aadhaar = args.text(0)?;
    let pan = args.text(1)?;
    let dob = args.text(2)?;

    let birth_year = birth_year(dob)?;
    let age = current_year - birth_year;

    let verdict = if !(MIN_AGE..=MAX_AGE).contains(&age) {
        "Age not within eligible range (21-58 years)"
    } else if !is_valid_aadhaar(aadhaar) {
        "Invalid Aadhaar number"
    } else if !is_valid_pan(pan) {
        "Invalid PAN format"
    } else {
        "Age and documents verified successfully"
    };

    Ok(Observation::text(verdict))
}

/// Year component of a `YYYY-MM-DD` date; month and day are not checked.
fn birth_year(dob: &str) -> Result<i32, CapabilityError> {
    let year = dob.split('-').next().unwrap_or_default();
    year.parse().map_err(|_| {
        CapabilityError::invalid_argument(format!("date of birth '{dob}' has no numeric year"))
    })
}

/// Twelve ASCII digits.
#[must_use]
pub fn is_valid_aadhaar(aadhaar: &str) -> bool {
    aadhaar.len() == 12 && aadhaar.bytes().all(|b| b.is_ascii_digit())
}

/// Five capitals, four digits, one capital, checked from the start.
#[must_use]
pub fn is_valid_pan(pan: &str) -> bool {
    PAN_FORMAT.is_match(pan)
}
