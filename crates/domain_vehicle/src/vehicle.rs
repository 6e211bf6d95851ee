//! Vehicle entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::VehicleId;

use crate::error::VehicleError;
use crate::grade::VehicleGrade;

/// One row of the vehicle reference table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub manufacturer: String,
    pub model: String,
    pub grade: VehicleGrade,
    /// Free-text notes
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Creates a vehicle after validating the required fields
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        grade: VehicleGrade,
    ) -> Result<Self, VehicleError> {
        let manufacturer = manufacturer.into().trim().to_string();
        let model = model.into().trim().to_string();
        if manufacturer.is_empty() {
            return Err(VehicleError::MissingManufacturer);
        }
        if model.is_empty() {
            return Err(VehicleError::MissingModel);
        }
        let now = Utc::now();
        Ok(Self {
            id: VehicleId::new_v7(),
            manufacturer,
            model,
            grade,
            memo: None,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_validates() {
        let vehicle = Vehicle::new(" 현대 ", " 아반떼 ", VehicleGrade::Small).unwrap();
        assert_eq!(vehicle.manufacturer, "현대");
        assert_eq!(vehicle.model, "아반떼");
    }

    #[test]
    fn test_required_fields() {
        assert!(Vehicle::new("", "아반떼", VehicleGrade::Small).is_err());
        assert!(Vehicle::new("현대", "  ", VehicleGrade::Small).is_err());
    }
}
