//! Installer location entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::WorkshopId;

use crate::error::WorkshopError;
use crate::geocode::GeoPoint;

/// One installer workshop (시공점)
///
/// Coordinates stay null until the address has been geocoded; the map view
/// and nearest-workshop picker only consider locations with coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerLocation {
    pub id: WorkshopId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub is_active: bool,
    /// Sort weight; lower shows first in assignment lists
    pub priority: i32,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstallerLocation {
    /// Creates an active workshop with default priority
    pub fn new(name: impl Into<String>) -> Result<Self, WorkshopError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(WorkshopError::MissingName);
        }
        let now = Utc::now();
        Ok(Self {
            id: WorkshopId::new_v7(),
            name,
            address: None,
            phone: None,
            lat: None,
            lng: None,
            is_active: true,
            priority: 100,
            memo: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// True once the address has been geocoded
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }

    /// Stores freshly geocoded coordinates
    pub fn set_coordinates(&mut self, point: GeoPoint) {
        self.lat = Some(point.lat);
        self.lng = Some(point.lng);
        self.updated_at = Utc::now();
    }

    /// Deactivates the workshop without removing it
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Sorts the assignment list: priority ascending, then name
pub fn sort_for_assignment(workshops: &mut [InstallerLocation]) {
    workshops.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
}
