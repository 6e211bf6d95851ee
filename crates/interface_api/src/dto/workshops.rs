//! Installer location DTOs

use serde::{Deserialize, Serialize};

use domain_workshop::InstallerLocation;

/// Create or update an installer location
#[derive(Debug, Deserialize)]
pub struct UpsertWorkshopRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<i32>,
    pub memo: Option<String>,
}

/// Location listing
#[derive(Debug, Serialize)]
pub struct WorkshopListResponse {
    pub workshops: Vec<InstallerLocation>,
}

/// Sheet import outcome
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: u32,
}

/// Outcome of a coordinate regeneration pass
#[derive(Debug, Serialize)]
pub struct RegenerateCoordsResponse {
    pub geocoded: u32,
    pub unmatched: u32,
}
