//! Installer location handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::warn;

use core_kernel::WorkshopId;
use domain_workshop::sheet::{read_workshops, write_workshops};
use domain_workshop::{sort_for_assignment, Geocoder, InstallerLocation};
use infra_db::WorkshopRepository;

use crate::dto::workshops::*;
use crate::error::ApiError;
use crate::AppState;

/// Every location, assignment order
pub async fn list_workshops(
    State(state): State<AppState>,
) -> Result<Json<WorkshopListResponse>, ApiError> {
    let mut workshops = WorkshopRepository::new(state.pool.clone()).list_all().await?;
    sort_for_assignment(&mut workshops);
    Ok(Json(WorkshopListResponse { workshops }))
}

/// Creates or updates a location, keyed by name
///
/// An address change clears stored coordinates; the next regeneration pass
/// fills them back in.
pub async fn upsert_workshop(
    State(state): State<AppState>,
    Json(request): Json<UpsertWorkshopRequest>,
) -> Result<Json<InstallerLocation>, ApiError> {
    let mut workshop = InstallerLocation::new(request.name)?;
    workshop.address = request.address;
    workshop.phone = request.phone;
    if let Some(is_active) = request.is_active {
        workshop.is_active = is_active;
    }
    if let Some(priority) = request.priority {
        workshop.priority = priority;
    }
    workshop.memo = request.memo;

    let saved = WorkshopRepository::new(state.pool.clone())
        .upsert(&workshop)
        .await?;
    Ok(Json(saved))
}

pub async fn delete_workshop(
    State(state): State<AppState>,
    Path(id): Path<WorkshopId>,
) -> Result<Json<Value>, ApiError> {
    WorkshopRepository::new(state.pool.clone()).delete(id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Imports the legacy sheet format (상호/주소/전화번호 headers)
///
/// Rows without an address are skipped; existing names are updated in place.
pub async fn import_sheet(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>, ApiError> {
    let workshops = read_workshops(body.as_bytes())?;
    let repo = WorkshopRepository::new(state.pool.clone());
    let mut imported = 0;
    for workshop in &workshops {
        repo.upsert(workshop).await?;
        imported += 1;
    }
    Ok(Json(ImportResponse { imported }))
}

/// Exports all locations in the same sheet format imports accept
pub async fn export_sheet(State(state): State<AppState>) -> Result<String, ApiError> {
    let workshops = WorkshopRepository::new(state.pool.clone()).list_all().await?;
    let mut out = Vec::new();
    write_workshops(&mut out, &workshops)?;
    String::from_utf8(out).map_err(|e| ApiError::Internal(e.to_string()))
}

/// Geocodes every location that has an address but no coordinates
///
/// One failed lookup does not abort the pass; unmatched addresses are
/// reported in the response and logged.
pub async fn regenerate_coordinates(
    State(state): State<AppState>,
) -> Result<Json<RegenerateCoordsResponse>, ApiError> {
    let Some(geocoder) = state.geocoder.clone() else {
        return Err(ApiError::Internal(
            "Geocoding is not configured (missing Kakao REST key)".to_string(),
        ));
    };

    let repo = WorkshopRepository::new(state.pool.clone());
    let pending = repo.missing_coordinates().await?;

    let mut geocoded = 0;
    let mut unmatched = 0;
    for workshop in pending {
        let Some(address) = workshop.address.as_deref() else {
            continue;
        };
        match geocoder.geocode(address).await {
            Ok(Some(point)) => {
                repo.set_coordinates(workshop.id, point).await?;
                geocoded += 1;
            }
            Ok(None) => {
                warn!(workshop = %workshop.name, "No geocoding match");
                unmatched += 1;
            }
            Err(e) => {
                warn!(workshop = %workshop.name, error = %e, "Geocoding failed");
                unmatched += 1;
            }
        }
    }

    Ok(Json(RegenerateCoordsResponse { geocoded, unmatched }))
}
