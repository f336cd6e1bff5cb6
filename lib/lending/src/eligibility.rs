//! Loan eligibility calculator.
//!
//! Fixed terms: 10.5% annual interest over 240 months, EMIs capped at half of
//! monthly income, principal capped at ₹40,00,000.

use loan_agent_dispatch::{Arguments, CapabilityError, Observation};
use serde_json::{Map, json};

/// Action name.
pub const NAME: &str = "calculate_loan_eligibility";

/// Minimum monthly income in rupees.
pub const MIN_MONTHLY_INCOME: f64 = 25_000.0;
/// Annual interest rate.
pub const ANNUAL_INTEREST_RATE: f64 = 0.105;
/// Loan tenure in months.
pub const TENURE_MONTHS: i32 = 240;
/// Largest principal offered.
pub const MAX_LOAN_AMOUNT: f64 = 4_000_000.0;

/// Result of an eligibility calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eligibility {
    /// Largest new EMI the applicant can carry.
    pub max_emi_allowed: f64,
    /// Largest principal that EMI pays off over the tenure, capped.
    pub max_loan_amount: f64,
}

/// Computes eligibility, or `None` if income is below the minimum.
#[must_use]
pub fn eligibility(monthly_income: f64, existing_emis: f64) -> Option<Eligibility> {
    if monthly_income < MIN_MONTHLY_INCOME {
        return None;
    }

    let max_emi = monthly_income * 0.5 - existing_emis;
    let r = ANNUAL_INTEREST_RATE / 12.0;
    let growth = (1.0 + r).powi(TENURE_MONTHS);
    let max_loan = max_emi * (growth - 1.0) / (r * growth);

    Some(Eligibility {
        max_emi_allowed: round2(max_emi),
        max_loan_amount: round2(max_loan.min(MAX_LOAN_AMOUNT)),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `calculate_loan_eligibility: <monthly income>, <existing EMIs>`
///
/// # Errors
///
/// Fails if either argument is missing or not a number.
pub fn calculate_loan_eligibility(args: &Arguments) -> Result<Observation, CapabilityError> {
    let income = args.number(0)?;
    let emis = args.number(1)?;

    let Some(result) = eligibility(income, emis) else {
        return Ok(Observation::text(
            "Income below minimum requirement of ₹25,000",
        ));
    };

    let mut record = Map::new();
    record.insert("max_emi_allowed".to_string(), json!(result.max_emi_allowed));
    record.insert("max_loan_amount".to_string(), json!(result.max_loan_amount));
    Ok(Observation::Record(record))
}
