//! Settlement DTOs

use serde::{Deserialize, Serialize};

use core_kernel::{RecordId, Won};
use domain_accident::AccidentRecord;
use domain_settlement::{LaborCostTable, MonthKey, MonthlyAggregate, WorkshopAggregate};

/// Month selector for the monthly report
#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    /// `YYYY-MM`
    pub month: MonthKey,
}

/// Detail row listing criteria
#[derive(Debug, Default, Deserialize)]
pub struct SettlementRowsQuery {
    pub workshop: Option<String>,
}

/// One settlement candidate with its resolved grade and fee
#[derive(Debug, Serialize)]
pub struct SettlementRowResponse {
    #[serde(flatten)]
    pub record: AccidentRecord,
    /// Canonical grade label, absent when unresolved
    pub grade: Option<&'static str>,
    pub fee: Won,
}

/// Settlement detail rows
#[derive(Debug, Serialize)]
pub struct SettlementRowsResponse {
    pub rows: Vec<SettlementRowResponse>,
}

/// Bulk settle request
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub record_ids: Vec<RecordId>,
}

/// Settles one workshop's records for one month in a single action
#[derive(Debug, Deserialize)]
pub struct SettleWorkshopRequest {
    pub workshop: String,
    /// `YYYY-MM`
    pub month: MonthKey,
}

/// Bulk settle outcome
#[derive(Debug, Serialize)]
pub struct SettleResponse {
    pub settled: u64,
}

/// Per-workshop settlement report
#[derive(Debug, Serialize)]
pub struct WorkshopReportResponse {
    pub workshops: Vec<WorkshopAggregate>,
}

/// Monthly settlement report
#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    #[serde(flatten)]
    pub aggregate: MonthlyAggregate,
}

/// Labor cost table update
///
/// Full replacement; the table only has three entries.
#[derive(Debug, Deserialize)]
pub struct LaborCostUpdateRequest {
    #[serde(flatten)]
    pub table: LaborCostTable,
}
