//! Workshop sheet import/export
//!
//! Same legacy layout as the vehicle sheets: Korean headers, one row per
//! workshop. Import keeps only rows that carry an address, since an address
//! is what the geocoding pass needs.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::WorkshopError;
use crate::workshop::InstallerLocation;

/// One sheet row in the legacy column layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkshopSheetRow {
    #[serde(rename = "상호")]
    pub name: String,
    #[serde(rename = "주소")]
    pub address: String,
    #[serde(rename = "전화번호")]
    pub phone: String,
}

impl From<&InstallerLocation> for WorkshopSheetRow {
    fn from(workshop: &InstallerLocation) -> Self {
        Self {
            name: workshop.name.clone(),
            address: workshop.address.clone().unwrap_or_default(),
            phone: workshop.phone.clone().unwrap_or_default(),
        }
    }
}

/// Reads workshops from a sheet; rows without an address are skipped
pub fn read_workshops<R: Read>(reader: R) -> Result<Vec<InstallerLocation>, WorkshopError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut workshops = Vec::new();
    for row in csv_reader.deserialize::<WorkshopSheetRow>() {
        let row = row?;
        if row.address.trim().is_empty() {
            warn!(name = %row.name, "skipping workshop sheet row without address");
            continue;
        }
        let name = if row.name.trim().is_empty() {
            // Legacy sheets sometimes left 상호 blank; fall back to the address
            row.address.trim().to_string()
        } else {
            row.name.trim().to_string()
        };
        let mut workshop = InstallerLocation::new(name)?;
        workshop.address = Some(row.address.trim().to_string());
        let phone = row.phone.trim();
        workshop.phone = (!phone.is_empty()).then(|| phone.to_string());
        workshops.push(workshop);
    }
    Ok(workshops)
}

/// Writes the current workshop view back out in the same layout
pub fn write_workshops<W: Write>(
    writer: W,
    workshops: &[InstallerLocation],
) -> Result<(), WorkshopError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for workshop in workshops {
        csv_writer.serialize(WorkshopSheetRow::from(workshop))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_requires_address() {
        let sheet = "상호,주소,전화번호\n강남점,서울시 강남구 테헤란로 1,02-111-2222\n무주소점,,02-333-4444\n";
        let workshops = read_workshops(sheet.as_bytes()).unwrap();
        assert_eq!(workshops.len(), 1);
        assert_eq!(workshops[0].name, "강남점");
        assert_eq!(workshops[0].phone.as_deref(), Some("02-111-2222"));
    }

    #[test]
    fn test_blank_name_falls_back_to_address() {
        let sheet = "상호,주소,전화번호\n,서울시 서초구 반포대로 2,\n";
        let workshops = read_workshops(sheet.as_bytes()).unwrap();
        assert_eq!(workshops[0].name, "서울시 서초구 반포대로 2");
        assert!(workshops[0].phone.is_none());
    }

    #[test]
    fn test_export_round_trip() {
        let mut workshop = InstallerLocation::new("부산점").unwrap();
        workshop.address = Some("부산시 해운대구 센텀로 5".to_string());
        workshop.phone = Some("051-777-8888".to_string());
        let mut buffer = Vec::new();
        write_workshops(&mut buffer, &[workshop]).unwrap();
        let reread = read_workshops(buffer.as_slice()).unwrap();
        assert_eq!(reread.len(), 1);
        assert_eq!(reread[0].name, "부산점");
    }
}
