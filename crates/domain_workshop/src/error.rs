//! Workshop domain errors

use thiserror::Error;

/// Errors that can occur in the workshop domain
#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("Workshop name is required")]
    MissingName,

    #[error("Address is required for geocoding")]
    MissingAddress,

    #[error("Geocoding failed: {0}")]
    Geocoding(String),

    #[error("Sheet error: {0}")]
    Sheet(#[from] csv::Error),
}
