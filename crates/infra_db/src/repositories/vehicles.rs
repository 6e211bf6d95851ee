//! Vehicle catalog repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::VehicleId;
use domain_vehicle::{GradeIndex, Vehicle, VehicleGrade};

use crate::error::DatabaseError;

/// Repository for the vehicle catalog
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct VehicleRow {
    id: Uuid,
    manufacturer: String,
    model: String,
    grade: String,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = DatabaseError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let grade = VehicleGrade::parse(&row.grade)
            .map_err(|e| DatabaseError::CorruptRow(format!("vehicle grade: {e}")))?;
        Ok(Vehicle {
            id: VehicleId::from_uuid(row.id),
            manufacturer: row.manufacturer,
            model: row.model,
            grade,
            memo: row.memo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, manufacturer, model, grade, memo, created_at, updated_at";

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or updates a catalog entry, keyed by manufacturer and model
    pub async fn upsert(&self, vehicle: &Vehicle) -> Result<Vehicle, DatabaseError> {
        let row: VehicleRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO vehicles (id, manufacturer, model, grade, memo, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (manufacturer, model) DO UPDATE SET
                grade = EXCLUDED.grade,
                memo = EXCLUDED.memo,
                updated_at = EXCLUDED.updated_at
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(vehicle.id.as_uuid())
        .bind(&vehicle.manufacturer)
        .bind(&vehicle.model)
        .bind(vehicle.grade.label())
        .bind(&vehicle.memo)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// Bulk import, one upsert per row inside a transaction
    pub async fn import(&self, vehicles: &[Vehicle]) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;
        for vehicle in vehicles {
            sqlx::query(
                r#"
                INSERT INTO vehicles (id, manufacturer, model, grade, memo, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (manufacturer, model) DO UPDATE SET
                    grade = EXCLUDED.grade,
                    memo = EXCLUDED.memo,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(vehicle.id.as_uuid())
            .bind(&vehicle.manufacturer)
            .bind(&vehicle.model)
            .bind(vehicle.grade.label())
            .bind(&vehicle.memo)
            .bind(vehicle.created_at)
            .bind(vehicle.updated_at)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }
        tx.commit().await?;
        Ok(written)
    }

    pub async fn get_by_id(&self, id: VehicleId) -> Result<Vehicle, DatabaseError> {
        let row: VehicleRow = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Vehicle", id))?;

        row.try_into()
    }

    /// Whole catalog, ordered for display
    pub async fn list(&self) -> Result<Vec<Vehicle>, DatabaseError> {
        let rows: Vec<VehicleRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM vehicles ORDER BY manufacturer, model"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Snapshot of every vehicle's grade, for settlement aggregation
    pub async fn grade_index(&self) -> Result<GradeIndex, DatabaseError> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, grade FROM vehicles")
                .fetch_all(&self.pool)
                .await?;

        let mut index = GradeIndex::default();
        for (id, grade) in rows {
            let grade = VehicleGrade::parse(&grade)
                .map_err(|e| DatabaseError::CorruptRow(format!("vehicle grade: {e}")))?;
            index.insert(VehicleId::from_uuid(id), grade);
        }
        Ok(index)
    }

    pub async fn delete(&self, id: VehicleId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Vehicle", id));
        }
        Ok(())
    }
}
