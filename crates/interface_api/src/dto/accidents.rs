//! Accident record DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_accident::{AccidentRecord, AccidentStatus, IntakeDraft};
use infra_db::{DashboardStats, RecordPage};

/// Listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecordsQuery {
    /// Canonical status label, or the pseudo-value `미정산`
    pub status: Option<String>,
    pub search: Option<String>,
    pub insurer: Option<String>,
    pub workshop: Option<String>,
    pub manager: Option<String>,
    pub accident_from: Option<DateTime<Utc>>,
    pub accident_to: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Optional date range for the dashboard cards
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Intake message to parse into a draft
#[derive(Debug, Deserialize)]
pub struct ParseMessageRequest {
    pub message: String,
}

/// One record as served to clients
///
/// Adds the presentation fields (badge colors, priority) the board renders
/// from, so clients never hardcode the status table.
#[derive(Debug, Serialize)]
pub struct RecordResponse {
    #[serde(flatten)]
    pub record: AccidentRecord,
    pub status_style: StatusStyleResponse,
}

#[derive(Debug, Serialize)]
pub struct StatusStyleResponse {
    pub background: &'static str,
    pub text: &'static str,
    pub css_class: &'static str,
}

impl From<AccidentRecord> for RecordResponse {
    fn from(record: AccidentRecord) -> Self {
        let style = record.status.style();
        Self {
            record,
            status_style: StatusStyleResponse {
                background: style.background,
                text: style.text,
                css_class: style.css_class,
            },
        }
    }
}

/// One page of records
#[derive(Debug, Serialize)]
pub struct RecordPageResponse {
    pub records: Vec<RecordResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl From<RecordPage> for RecordPageResponse {
    fn from(page: RecordPage) -> Self {
        Self {
            records: page.records.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
        }
    }
}

/// Parsed intake draft
#[derive(Debug, Serialize)]
pub struct IntakeDraftResponse {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub car_number: Option<String>,
    pub car_model: Option<String>,
    pub damage_type: String,
    pub deductible: Option<String>,
    pub address: Option<String>,
}

impl From<IntakeDraft> for IntakeDraftResponse {
    fn from(draft: IntakeDraft) -> Self {
        Self {
            customer_name: draft.customer_name,
            phone: draft.phone,
            car_number: draft.car_number,
            car_model: draft.car_model,
            damage_type: draft.damage_type,
            deductible: draft.deductible,
            address: draft.address,
        }
    }
}

/// The canonical status table, served so clients render from one source
#[derive(Debug, Serialize)]
pub struct StatusInfoResponse {
    pub label: &'static str,
    pub priority: i16,
    pub is_terminal: bool,
    pub next: Option<&'static str>,
    pub style: StatusStyleResponse,
}

impl From<AccidentStatus> for StatusInfoResponse {
    fn from(status: AccidentStatus) -> Self {
        let style = status.style();
        Self {
            label: status.label(),
            priority: status.priority(),
            is_terminal: status.is_terminal(),
            next: status.next().map(|s| s.label()),
            style: StatusStyleResponse {
                background: style.background,
                text: style.text,
                css_class: style.css_class,
            },
        }
    }
}

/// Dashboard card counts
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub done: i64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total: stats.total,
            new: stats.new,
            in_progress: stats.in_progress,
            done: stats.done,
        }
    }
}
