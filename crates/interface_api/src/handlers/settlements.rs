//! Settlement handlers

use axum::{
    extract::{Query, State},
    Json,
};

use domain_accident::AccidentStatus;
use domain_settlement::{aggregate_by_month, aggregate_by_workshop, resolve_grade, LaborCostTable};
use domain_vehicle::VehicleGrade;
use infra_db::{AccidentRepository, VehicleRepository};

use crate::dto::settlements::*;
use crate::error::ApiError;
use crate::AppState;

/// Per-workshop settlement report over the current eligible snapshot
pub async fn workshop_report(
    State(state): State<AppState>,
) -> Result<Json<WorkshopReportResponse>, ApiError> {
    let records = AccidentRepository::new(state.pool.clone())
        .settlement_candidates(None)
        .await?;
    let grades = VehicleRepository::new(state.pool.clone())
        .grade_index()
        .await?;
    let costs = state.labor_costs.get().await;

    let workshops = aggregate_by_workshop(&records, &grades, &costs);
    Ok(Json(WorkshopReportResponse { workshops }))
}

/// Per-record detail rows behind the reports, each priced individually
pub async fn settlement_records(
    State(state): State<AppState>,
    Query(query): Query<SettlementRowsQuery>,
) -> Result<Json<SettlementRowsResponse>, ApiError> {
    let records = AccidentRepository::new(state.pool.clone())
        .settlement_candidates(query.workshop.as_deref())
        .await?;
    let grades = VehicleRepository::new(state.pool.clone())
        .grade_index()
        .await?;
    let costs = state.labor_costs.get().await;

    let rows = records
        .into_iter()
        .map(|record| {
            let grade = resolve_grade(&record, &grades);
            SettlementRowResponse {
                grade: grade.map(|g| g.label()),
                fee: costs.cost_of(grade),
                record,
            }
        })
        .collect();
    Ok(Json(SettlementRowsResponse { rows }))
}

/// Monthly settlement report
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlyReportResponse>, ApiError> {
    let records = AccidentRepository::new(state.pool.clone())
        .settlement_candidates(None)
        .await?;
    let grades = VehicleRepository::new(state.pool.clone())
        .grade_index()
        .await?;
    let costs = state.labor_costs.get().await;

    let aggregate = aggregate_by_month(&records, query.month, &grades, &costs);
    Ok(Json(MonthlyReportResponse { aggregate }))
}

/// Marks a batch of records 정산완료
pub async fn settle(
    State(state): State<AppState>,
    Json(request): Json<SettleRequest>,
) -> Result<Json<SettleResponse>, ApiError> {
    if request.record_ids.is_empty() {
        return Err(ApiError::BadRequest("No records to settle".to_string()));
    }
    let settled = AccidentRepository::new(state.pool.clone())
        .mark_settled(&request.record_ids)
        .await?;
    Ok(Json(SettleResponse { settled }))
}

/// Settles everything still open for one workshop in one month
///
/// Nothing to settle is not an error; the response reports zero.
pub async fn settle_workshop_month(
    State(state): State<AppState>,
    Json(request): Json<SettleWorkshopRequest>,
) -> Result<Json<SettleResponse>, ApiError> {
    let repo = AccidentRepository::new(state.pool.clone());
    let candidates = repo.settlement_candidates(Some(&request.workshop)).await?;

    let ids: Vec<_> = candidates
        .iter()
        .filter(|r| r.status != AccidentStatus::Settled)
        .filter(|r| request.month.contains(r.settlement_date()))
        .map(|r| r.id)
        .collect();

    let settled = repo.mark_settled(&ids).await?;
    Ok(Json(SettleResponse { settled }))
}

/// The operator's labor cost table
pub async fn get_labor_costs(State(state): State<AppState>) -> Json<LaborCostTable> {
    Json(state.labor_costs.get().await)
}

/// Replaces the labor cost table
///
/// Deserialization enforces the closed grade set; negative amounts are
/// rejected here.
pub async fn put_labor_costs(
    State(state): State<AppState>,
    Json(request): Json<LaborCostUpdateRequest>,
) -> Result<Json<LaborCostTable>, ApiError> {
    for grade in VehicleGrade::ALL {
        if request.table.cost_of(Some(grade)).is_negative() {
            return Err(ApiError::Validation(format!(
                "Labor cost for {grade} must not be negative"
            )));
        }
    }
    state.labor_costs.set(request.table.clone()).await?;
    Ok(Json(request.table))
}
