//! Accident record repository
//!
//! Statuses are stored as their canonical Korean labels. Reads normalize the
//! stored value, so rows written before the status cleanup still come back
//! inside the canonical set.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use core_kernel::{CaseNo, RecordId, VehicleId};
use domain_accident::{AccidentRecord, AccidentStatus};

use crate::error::DatabaseError;

/// Repository for accident records
#[derive(Debug, Clone)]
pub struct AccidentRepository {
    pool: PgPool,
}

/// Status criterion for record listing
///
/// `PreSettlement` is the pseudo-filter the settlement screens use: every
/// status that has not yet reached 정산완료 or 종료.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Exact(AccidentStatus),
    PreSettlement,
}

/// Listing criteria; all fields combine with AND
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub status: Option<StatusFilter>,
    /// Case-insensitive match across case number, car number, customer name
    /// and phone
    pub search: Option<String>,
    pub insurer: Option<String>,
    pub workshop: Option<String>,
    pub manager: Option<String>,
    pub accident_from: Option<DateTime<Utc>>,
    pub accident_to: Option<DateTime<Utc>>,
}

/// One page of records plus the unpaged total
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub records: Vec<AccidentRecord>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct DashboardStats {
    pub total: i64,
    pub new: i64,
    pub in_progress: i64,
    pub done: i64,
}

#[derive(Debug, FromRow)]
struct AccidentRow {
    id: Uuid,
    case_no: String,
    accident_time: Option<DateTime<Utc>>,
    customer_name: Option<String>,
    phone: Option<String>,
    car_number: Option<String>,
    vin: Option<String>,
    car_model: Option<String>,
    insurer: Option<String>,
    damage_type: Option<String>,
    accident_location: Option<String>,
    manager: Option<String>,
    deductible: Option<String>,
    deductible_pay_type: Option<String>,
    vehicle_id: Option<Uuid>,
    assigned_workshop_name: Option<String>,
    assigned_workshop_address: Option<String>,
    assigned_workshop_phone: Option<String>,
    memo: Option<String>,
    status: String,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccidentRow> for AccidentRecord {
    type Error = DatabaseError;

    fn try_from(row: AccidentRow) -> Result<Self, Self::Error> {
        let case_no = CaseNo::new(&row.case_no)
            .map_err(|e| DatabaseError::CorruptRow(format!("case_no '{}': {e}", row.case_no)))?;
        let status = AccidentStatus::normalize(&row.status);
        Ok(AccidentRecord {
            id: RecordId::from_uuid(row.id),
            case_no,
            accident_time: row.accident_time,
            customer_name: row.customer_name,
            phone: row.phone,
            car_number: row.car_number,
            vin: row.vin,
            car_model: row.car_model,
            insurer: row.insurer,
            damage_type: row.damage_type,
            accident_location: row.accident_location,
            manager: row.manager,
            deductible: row.deductible,
            deductible_pay_type: row.deductible_pay_type,
            vehicle_id: row.vehicle_id.map(VehicleId::from_uuid),
            assigned_workshop_name: row.assigned_workshop_name,
            assigned_workshop_address: row.assigned_workshop_address,
            assigned_workshop_phone: row.assigned_workshop_phone,
            memo: row.memo,
            status,
            status_priority: status.priority(),
            is_deleted: row.is_deleted,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, case_no, accident_time, customer_name, phone, car_number, \
     vin, car_model, insurer, damage_type, accident_location, manager, deductible, \
     deductible_pay_type, vehicle_id, assigned_workshop_name, assigned_workshop_address, \
     assigned_workshop_phone, memo, status, is_deleted, deleted_at, created_at, updated_at";

impl AccidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or updates a record, keyed by case number
    ///
    /// The legacy `receipt_number` column is kept mirrored to `case_no` on
    /// every write. Saving an already-deleted case number revives it, same
    /// as re-importing a row always has.
    pub async fn upsert(&self, record: &AccidentRecord) -> Result<AccidentRecord, DatabaseError> {
        let row: AccidentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO accident_records (
                id, case_no, receipt_number, accident_time, customer_name, phone,
                car_number, vin, car_model, insurer, damage_type, accident_location,
                manager, deductible, deductible_pay_type, vehicle_id,
                assigned_workshop_name, assigned_workshop_address, assigned_workshop_phone,
                memo, status, status_priority, is_deleted, deleted_at, created_at, updated_at
            ) VALUES (
                $1, $2, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, false, NULL, $22, $23
            )
            ON CONFLICT (case_no) DO UPDATE SET
                receipt_number = EXCLUDED.case_no,
                accident_time = EXCLUDED.accident_time,
                customer_name = EXCLUDED.customer_name,
                phone = EXCLUDED.phone,
                car_number = EXCLUDED.car_number,
                vin = EXCLUDED.vin,
                car_model = EXCLUDED.car_model,
                insurer = EXCLUDED.insurer,
                damage_type = EXCLUDED.damage_type,
                accident_location = EXCLUDED.accident_location,
                manager = EXCLUDED.manager,
                deductible = EXCLUDED.deductible,
                deductible_pay_type = EXCLUDED.deductible_pay_type,
                vehicle_id = EXCLUDED.vehicle_id,
                assigned_workshop_name = EXCLUDED.assigned_workshop_name,
                assigned_workshop_address = EXCLUDED.assigned_workshop_address,
                assigned_workshop_phone = EXCLUDED.assigned_workshop_phone,
                memo = EXCLUDED.memo,
                status = EXCLUDED.status,
                status_priority = EXCLUDED.status_priority,
                is_deleted = false,
                deleted_at = NULL,
                updated_at = EXCLUDED.updated_at
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(record.id.as_uuid())
        .bind(record.case_no.as_str())
        .bind(record.accident_time)
        .bind(&record.customer_name)
        .bind(&record.phone)
        .bind(&record.car_number)
        .bind(&record.vin)
        .bind(&record.car_model)
        .bind(&record.insurer)
        .bind(&record.damage_type)
        .bind(&record.accident_location)
        .bind(&record.manager)
        .bind(&record.deductible)
        .bind(&record.deductible_pay_type)
        .bind(record.vehicle_id.map(|v| *v.as_uuid()))
        .bind(&record.assigned_workshop_name)
        .bind(&record.assigned_workshop_address)
        .bind(&record.assigned_workshop_phone)
        .bind(&record.memo)
        .bind(record.status.label())
        .bind(record.status.priority())
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Fetches a record by id, deleted or not
    pub async fn get_by_id(&self, id: RecordId) -> Result<AccidentRecord, DatabaseError> {
        let row: AccidentRow = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM accident_records WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("AccidentRecord", id))?;

        row.try_into()
    }

    /// Looks up a live record by case number
    ///
    /// Matches against `case_no` or the legacy `receipt_number` column;
    /// a miss is `Ok(None)`, not an error.
    pub async fn find_by_case_no(
        &self,
        case_no: &str,
    ) -> Result<Option<AccidentRecord>, DatabaseError> {
        let row: Option<AccidentRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM accident_records
            WHERE (case_no = $1 OR receipt_number = $1) AND is_deleted = false
            "#
        ))
        .bind(case_no)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Lists live records, filtered and paginated
    ///
    /// Ordering is the triage order the board uses: most urgent status first,
    /// then newest.
    pub async fn list(
        &self,
        filter: &RecordFilter,
        page: u32,
        per_page: u32,
    ) -> Result<RecordPage, DatabaseError> {
        let per_page = per_page.clamp(1, 200);
        let page = page.max(1);

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM accident_records");
        Self::push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build()
            .fetch_one(&self.pool)
            .await?
            .try_get(0)?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM accident_records"
        ));
        Self::push_filters(&mut query, filter);
        query.push(" ORDER BY status_priority ASC, created_at DESC");
        query.push(" LIMIT ").push_bind(per_page as i64);
        // Widen before multiplying so an absurd page number cannot overflow
        query
            .push(" OFFSET ")
            .push_bind((page as i64 - 1) * per_page as i64);

        let rows: Vec<AccidentRow> = query.build_query_as().fetch_all(&self.pool).await?;
        let records = rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordPage {
            records,
            total,
            page,
            per_page,
        })
    }

    fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
        query.push(" WHERE is_deleted = false");

        match filter.status {
            Some(StatusFilter::Exact(status)) => {
                query.push(" AND status = ").push_bind(status.label());
            }
            Some(StatusFilter::PreSettlement) => {
                let labels: Vec<&str> = AccidentStatus::PRE_SETTLEMENT
                    .iter()
                    .map(|s| s.label())
                    .collect();
                query.push(" AND status = ANY(").push_bind(labels).push(")");
            }
            None => {}
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", search.trim());
            query.push(" AND (");
            query.push("case_no ILIKE ").push_bind(pattern.clone());
            query
                .push(" OR receipt_number ILIKE ")
                .push_bind(pattern.clone());
            query.push(" OR car_number ILIKE ").push_bind(pattern.clone());
            query
                .push(" OR customer_name ILIKE ")
                .push_bind(pattern.clone());
            query.push(" OR phone ILIKE ").push_bind(pattern);
            query.push(")");
        }
        if let Some(insurer) = &filter.insurer {
            query.push(" AND insurer = ").push_bind(insurer.clone());
        }
        if let Some(workshop) = &filter.workshop {
            query
                .push(" AND assigned_workshop_name = ")
                .push_bind(workshop.clone());
        }
        if let Some(manager) = &filter.manager {
            query.push(" AND manager = ").push_bind(manager.clone());
        }
        if let Some(from) = filter.accident_from {
            query
                .push(" AND COALESCE(accident_time, created_at) >= ")
                .push_bind(from);
        }
        if let Some(to) = filter.accident_to {
            query
                .push(" AND COALESCE(accident_time, created_at) <= ")
                .push_bind(to);
        }
    }

    /// Live records eligible for settlement, for aggregation snapshots
    ///
    /// Optionally narrowed to one workshop for the drill-down views.
    pub async fn settlement_candidates(
        &self,
        workshop: Option<&str>,
    ) -> Result<Vec<AccidentRecord>, DatabaseError> {
        let labels: Vec<&str> = AccidentStatus::SETTLEMENT_ELIGIBLE
            .iter()
            .map(|s| s.label())
            .collect();
        let mut query = QueryBuilder::new(format!(
            "SELECT {SELECT_COLUMNS} FROM accident_records \
             WHERE is_deleted = false AND status = ANY("
        ));
        query.push_bind(labels).push(")");
        if let Some(workshop) = workshop {
            query
                .push(" AND assigned_workshop_name = ")
                .push_bind(workshop.to_string());
        }
        query.push(" ORDER BY created_at DESC");

        let rows: Vec<AccidentRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Marks the given records 정산완료 in one statement
    ///
    /// Returns how many rows actually changed.
    pub async fn mark_settled(&self, ids: &[RecordId]) -> Result<u64, DatabaseError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let settled = AccidentStatus::Settled;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let result = sqlx::query(
            r#"
            UPDATE accident_records
            SET status = $1, status_priority = $2, updated_at = $3
            WHERE id = ANY($4) AND is_deleted = false
            "#,
        )
        .bind(settled.label())
        .bind(settled.priority())
        .bind(Utc::now())
        .bind(uuids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Writes a status change, keeping the priority column in step
    pub async fn update_status(
        &self,
        id: RecordId,
        status: AccidentStatus,
    ) -> Result<AccidentRecord, DatabaseError> {
        let row: AccidentRow = sqlx::query_as(&format!(
            r#"
            UPDATE accident_records
            SET status = $2, status_priority = $3, updated_at = $4
            WHERE id = $1 AND is_deleted = false
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(status.label())
        .bind(status.priority())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("AccidentRecord", id))?;

        row.try_into()
    }

    /// Soft-deletes by id; the row stays for audit
    pub async fn soft_delete(&self, id: RecordId) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE accident_records
            SET is_deleted = true, deleted_at = $2, updated_at = $2
            WHERE id = $1 AND is_deleted = false
            "#,
        )
        .bind(id.as_uuid())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("AccidentRecord", id));
        }
        Ok(())
    }

    /// Headline counts for the dashboard cards, optionally over a date range
    ///
    /// Range membership uses the accident time with creation time as the
    /// fallback, same as the listing filters.
    pub async fn dashboard_stats(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<DashboardStats, DatabaseError> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE status = ");
        query.push_bind(AccidentStatus::Received.label());
        query.push(") AS new, COUNT(*) FILTER (WHERE status = ANY(");
        query.push_bind(vec![
            AccidentStatus::Assigned.label(),
            AccidentStatus::Scheduled.label(),
        ]);
        query.push(")) AS in_progress, COUNT(*) FILTER (WHERE status = ANY(");
        query.push_bind(vec![
            AccidentStatus::Completed.label(),
            AccidentStatus::Settled.label(),
        ]);
        query.push(")) AS done FROM accident_records WHERE is_deleted = false");
        if let Some(from) = from {
            query
                .push(" AND COALESCE(accident_time, created_at) >= ")
                .push_bind(from);
        }
        if let Some(to) = to {
            query
                .push(" AND COALESCE(accident_time, created_at) <= ")
                .push_bind(to);
        }

        let row = query.build().fetch_one(&self.pool).await?;
        Ok(DashboardStats {
            total: row.try_get("total")?,
            new: row.try_get("new")?,
            in_progress: row.try_get("in_progress")?,
            done: row.try_get("done")?,
        })
    }
}
