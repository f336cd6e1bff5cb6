//! Error handling foundation for loan-agent.
//!
//! Only the `Result` alias lives here. Each crate defines its own error enum
//! in its `error` module and wraps lower-level reports with rootcause's
//! `.context()` as they cross a layer boundary.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
