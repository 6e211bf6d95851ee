//! Installer location repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::WorkshopId;
use domain_workshop::{GeoPoint, InstallerLocation};

use crate::error::DatabaseError;

/// Repository for installer locations
#[derive(Debug, Clone)]
pub struct WorkshopRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct WorkshopRow {
    id: Uuid,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    is_active: bool,
    priority: i32,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WorkshopRow> for InstallerLocation {
    fn from(row: WorkshopRow) -> Self {
        InstallerLocation {
            id: WorkshopId::from_uuid(row.id),
            name: row.name,
            address: row.address,
            phone: row.phone,
            lat: row.lat,
            lng: row.lng,
            is_active: row.is_active,
            priority: row.priority,
            memo: row.memo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, name, address, phone, lat, lng, is_active, priority, memo, created_at, updated_at";

impl WorkshopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or updates a location, keyed by name
    pub async fn upsert(
        &self,
        workshop: &InstallerLocation,
    ) -> Result<InstallerLocation, DatabaseError> {
        let row: WorkshopRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO installer_locations (
                id, name, address, phone, lat, lng, is_active, priority, memo,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (name) DO UPDATE SET
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                lat = EXCLUDED.lat,
                lng = EXCLUDED.lng,
                is_active = EXCLUDED.is_active,
                priority = EXCLUDED.priority,
                memo = EXCLUDED.memo,
                updated_at = EXCLUDED.updated_at
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(workshop.id.as_uuid())
        .bind(&workshop.name)
        .bind(&workshop.address)
        .bind(&workshop.phone)
        .bind(workshop.lat)
        .bind(workshop.lng)
        .bind(workshop.is_active)
        .bind(workshop.priority)
        .bind(&workshop.memo)
        .bind(workshop.created_at)
        .bind(workshop.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn get_by_id(&self, id: WorkshopId) -> Result<InstallerLocation, DatabaseError> {
        let row: WorkshopRow = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM installer_locations WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("InstallerLocation", id))?;

        Ok(row.into())
    }

    /// Active locations in assignment order
    pub async fn list_active(&self) -> Result<Vec<InstallerLocation>, DatabaseError> {
        let rows: Vec<WorkshopRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM installer_locations
            WHERE is_active = true
            ORDER BY priority ASC, name ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every location, for administration screens
    pub async fn list_all(&self) -> Result<Vec<InstallerLocation>, DatabaseError> {
        let rows: Vec<WorkshopRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM installer_locations ORDER BY priority ASC, name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Locations with an address but no stored coordinates yet
    pub async fn missing_coordinates(&self) -> Result<Vec<InstallerLocation>, DatabaseError> {
        let rows: Vec<WorkshopRow> = sqlx::query_as(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM installer_locations
            WHERE address IS NOT NULL AND (lat IS NULL OR lng IS NULL)
            ORDER BY name ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Stores freshly geocoded coordinates
    pub async fn set_coordinates(
        &self,
        id: WorkshopId,
        point: GeoPoint,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE installer_locations
            SET lat = $2, lng = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(point.lat)
        .bind(point.lng)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("InstallerLocation", id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: WorkshopId) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM installer_locations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("InstallerLocation", id));
        }
        Ok(())
    }
}
