//! Settlement domain errors

use thiserror::Error;

/// Errors that can occur in the settlement domain
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("Labor cost for {grade} must not be negative (got {amount})")]
    NegativeLaborCost {
        grade: &'static str,
        amount: String,
    },

    #[error("Invalid settlement month: {0} (expected YYYY-MM)")]
    InvalidMonthKey(String),
}
