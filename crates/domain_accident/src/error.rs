//! Accident domain errors

use thiserror::Error;

/// Errors that can occur in the accident domain
#[derive(Debug, Error)]
pub enum AccidentError {
    /// No alias for the case number resolved to a value
    #[error("Case number (접수번호) is missing")]
    MissingCaseNo,

    #[error("Invalid timestamp in field {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Record already deleted: {0}")]
    AlreadyDeleted(String),
}
