//! Vehicle domain errors

use thiserror::Error;

/// Errors that can occur in the vehicle domain
#[derive(Debug, Error)]
pub enum VehicleError {
    /// Grade outside the closed {소형, 중형, 대형} set
    #[error("Invalid vehicle grade: {0}")]
    InvalidGrade(String),

    #[error("Manufacturer is required")]
    MissingManufacturer,

    #[error("Model is required")]
    MissingModel,

    #[error("Sheet error: {0}")]
    Sheet(#[from] csv::Error),
}
