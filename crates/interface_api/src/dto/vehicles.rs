//! Vehicle catalog DTOs

use serde::{Deserialize, Serialize};

use domain_vehicle::Vehicle;

/// Create or update a catalog entry
#[derive(Debug, Deserialize)]
pub struct UpsertVehicleRequest {
    pub manufacturer: String,
    pub model: String,
    /// 소형, 중형 or 대형
    pub grade: String,
    pub memo: Option<String>,
}

/// Catalog listing
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<Vehicle>,
}

/// Sheet import outcome
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: u64,
}
