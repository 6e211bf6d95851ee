//! Vehicle sheet import/export
//!
//! Bulk loads use the legacy sheet layout with Korean column headers. Rows
//! missing a manufacturer or model are skipped on import, matching how the
//! old bulk loader behaved; an invalid grade rejects the row before any
//! write happens.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::VehicleError;
use crate::grade::VehicleGrade;
use crate::vehicle::Vehicle;

/// One sheet row in the legacy column layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSheetRow {
    #[serde(rename = "제조사")]
    pub manufacturer: String,
    #[serde(rename = "차량명")]
    pub model: String,
    #[serde(rename = "차급")]
    pub grade: String,
}

impl From<&Vehicle> for VehicleSheetRow {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            manufacturer: vehicle.manufacturer.clone(),
            model: vehicle.model.clone(),
            grade: vehicle.grade.label().to_string(),
        }
    }
}

/// Reads vehicles from a sheet
///
/// Rows without both manufacturer and model are skipped; a row with an
/// unrecognized grade fails the whole import so a typo never lands a bad
/// grade in the table.
pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<Vehicle>, VehicleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut vehicles = Vec::new();
    for row in csv_reader.deserialize::<VehicleSheetRow>() {
        let row = row?;
        if row.manufacturer.trim().is_empty() || row.model.trim().is_empty() {
            warn!("skipping vehicle sheet row without manufacturer/model");
            continue;
        }
        let grade = VehicleGrade::parse(&row.grade)?;
        vehicles.push(Vehicle::new(row.manufacturer, row.model, grade)?);
    }
    Ok(vehicles)
}

/// Writes the current vehicle view back out in the same layout
pub fn write_vehicles<W: Write>(writer: W, vehicles: &[Vehicle]) -> Result<(), VehicleError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for vehicle in vehicles {
        csv_writer.serialize(VehicleSheetRow::from(vehicle))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_skips_incomplete_rows() {
        let sheet = "제조사,차량명,차급\n현대,아반떼,소형\n,그랜저,대형\n기아,,중형\n기아,K5,중형\n";
        let vehicles = read_vehicles(sheet.as_bytes()).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].model, "아반떼");
        assert_eq!(vehicles[1].grade, VehicleGrade::Medium);
    }

    #[test]
    fn test_import_rejects_invalid_grade() {
        let sheet = "제조사,차량명,차급\n현대,아반떼,경차\n";
        assert!(matches!(
            read_vehicles(sheet.as_bytes()),
            Err(VehicleError::InvalidGrade(_))
        ));
    }

    #[test]
    fn test_export_round_trip() {
        let vehicles = vec![
            Vehicle::new("현대", "그랜저", VehicleGrade::Large).unwrap(),
            Vehicle::new("기아", "모닝", VehicleGrade::Small).unwrap(),
        ];
        let mut buffer = Vec::new();
        write_vehicles(&mut buffer, &vehicles).unwrap();
        let reread = read_vehicles(buffer.as_slice()).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread[0].grade, VehicleGrade::Large);
        assert_eq!(reread[1].manufacturer, "기아");
    }
}
