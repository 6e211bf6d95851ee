//! Vehicle catalog handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use core_kernel::VehicleId;
use domain_vehicle::sheet::{read_vehicles, write_vehicles};
use domain_vehicle::{Vehicle, VehicleGrade};
use infra_db::VehicleRepository;

use crate::dto::vehicles::*;
use crate::error::ApiError;
use crate::AppState;

/// Whole catalog
pub async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<VehicleListResponse>, ApiError> {
    let vehicles = VehicleRepository::new(state.pool.clone()).list().await?;
    Ok(Json(VehicleListResponse { vehicles }))
}

/// Creates or updates one catalog entry
pub async fn upsert_vehicle(
    State(state): State<AppState>,
    Json(request): Json<UpsertVehicleRequest>,
) -> Result<Json<Vehicle>, ApiError> {
    let grade = VehicleGrade::parse(&request.grade)?;
    let mut vehicle = Vehicle::new(request.manufacturer, request.model, grade)?;
    vehicle.memo = request.memo;
    let saved = VehicleRepository::new(state.pool.clone())
        .upsert(&vehicle)
        .await?;
    Ok(Json(saved))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<VehicleId>,
) -> Result<Json<Value>, ApiError> {
    VehicleRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Imports the legacy sheet format (제조사/차량명/차급 headers)
///
/// Rows without a manufacturer or model are skipped; an unknown grade fails
/// the whole import so a typo never silently drops pricing.
pub async fn import_sheet(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let vehicles = read_vehicles(body.as_bytes())?;
    let imported = VehicleRepository::new(state.pool.clone())
        .import(&vehicles)
        .await?;
    Ok(Json(ImportResponse { imported }))
}

/// Exports the catalog in the same sheet format imports accept
pub async fn export_sheet(State(state): State<AppState>) -> Result<String, ApiError> {
    let vehicles = VehicleRepository::new(state.pool.clone()).list().await?;
    let mut out = Vec::new();
    write_vehicles(&mut out, &vehicles)?;
    String::from_utf8(out).map_err(|e| ApiError::Internal(e.to_string()))
}
