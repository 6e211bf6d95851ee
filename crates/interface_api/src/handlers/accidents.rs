//! Accident record handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use domain_accident::normalize::canonicalize;
use domain_accident::{parse_message, AccidentStatus};
use core_kernel::RecordId;
use infra_db::{AccidentRepository, RecordFilter, StatusFilter};

use crate::dto::accidents::*;
use crate::error::ApiError;
use crate::AppState;

/// The pseudo-status the settlement screens filter on
const UNSETTLED_FILTER: &str = "미정산";

/// Saves a record from an arbitrary legacy-shaped payload
///
/// The body goes through the field-alias normalizer, so sheet imports and
/// the web form hit the same path. Saving an existing case number updates it.
pub async fn save_record(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<RecordResponse>, ApiError> {
    let record = canonicalize(&payload)?;
    let saved = AccidentRepository::new(state.pool.clone())
        .upsert(&record)
        .await?;
    Ok(Json(saved.into()))
}

/// Lists records, filtered and paginated
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<Json<RecordPageResponse>, ApiError> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(UNSETTLED_FILTER) => Some(StatusFilter::PreSettlement),
        Some(raw) => {
            let status = AccidentStatus::from_label(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{raw}'")))?;
            Some(StatusFilter::Exact(status))
        }
    };

    let filter = RecordFilter {
        status,
        search: query.search,
        insurer: query.insurer,
        workshop: query.workshop,
        manager: query.manager,
        accident_from: query.accident_from,
        accident_to: query.accident_to,
    };

    let page = AccidentRepository::new(state.pool.clone())
        .list(&filter, query.page.unwrap_or(1), query.per_page.unwrap_or(50))
        .await?;
    Ok(Json(page.into()))
}

/// Fetches one record by id
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<RecordResponse>, ApiError> {
    let record = AccidentRepository::new(state.pool.clone())
        .get_by_id(id)
        .await?;
    Ok(Json(record.into()))
}

/// Looks up a live record by case number; a miss serves `null`
pub async fn get_by_case_no(
    State(state): State<AppState>,
    Path(case_no): Path<String>,
) -> Result<Json<Option<RecordResponse>>, ApiError> {
    let record = AccidentRepository::new(state.pool.clone())
        .find_by_case_no(&case_no)
        .await?;
    Ok(Json(record.map(Into::into)))
}

/// Moves a record one step along its lifecycle
///
/// Skips and backward moves are rejected; bulk settlement has its own
/// endpoint.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let target = AccidentStatus::from_label(request.status.trim())
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown status '{}'", request.status)))?;

    let repo = AccidentRepository::new(state.pool.clone());
    let mut record = repo.get_by_id(id).await?;
    if record.is_deleted {
        return Err(ApiError::Conflict(format!(
            "Record {} has been deleted",
            record.case_no
        )));
    }
    record.transition_to(target)?;
    let updated = repo.update_status(id, target).await?;
    Ok(Json(updated.into()))
}

/// Soft-deletes a record
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<Value>, ApiError> {
    AccidentRepository::new(state.pool.clone())
        .soft_delete(id)
        .await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Parses a pasted insurer message into a draft
pub async fn parse_intake(
    Json(request): Json<ParseMessageRequest>,
) -> Result<Json<IntakeDraftResponse>, ApiError> {
    Ok(Json(parse_message(&request.message).into()))
}

/// The canonical status table in chain order
pub async fn list_statuses() -> Json<Vec<StatusInfoResponse>> {
    Json(AccidentStatus::ALL.into_iter().map(Into::into).collect())
}

/// Dashboard card counts, optionally scoped to a date range
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    let stats = AccidentRepository::new(state.pool.clone())
        .dashboard_stats(query.from, query.to)
        .await?;
    Ok(Json(stats.into()))
}
