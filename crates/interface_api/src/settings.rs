//! Operator-local settings
//!
//! The labor cost table is pricing the operator tunes for their own reports.
//! It lives in a small JSON file next to the server, not in the shared
//! database, so one office's pricing never leaks into another's.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use domain_settlement::LaborCostTable;

use crate::error::ApiError;

/// File-backed labor cost table with an in-memory cache
#[derive(Debug, Clone)]
pub struct LaborCostStore {
    path: PathBuf,
    table: Arc<RwLock<LaborCostTable>>,
}

impl LaborCostStore {
    /// Opens the store, reading the file if it exists
    ///
    /// A missing or unreadable file falls back to the default table; the
    /// file is only (re)written on update.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match Self::read_file(&path).await {
            Ok(Some(table)) => table,
            Ok(None) => LaborCostTable::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable labor cost file, using defaults");
                LaborCostTable::default()
            }
        };
        Self {
            path,
            table: Arc::new(RwLock::new(table)),
        }
    }

    async fn read_file(path: &Path) -> Result<Option<LaborCostTable>, ApiError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                let table = serde_json::from_str(&contents)
                    .map_err(|e| ApiError::Internal(format!("Corrupt labor cost file: {e}")))?;
                Ok(Some(table))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::Internal(e.to_string())),
        }
    }

    pub async fn get(&self) -> LaborCostTable {
        self.table.read().await.clone()
    }

    /// Replaces the table and persists it
    pub async fn set(&self, table: LaborCostTable) -> Result<(), ApiError> {
        let contents = serde_json::to_string_pretty(&table)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| ApiError::Internal(format!("Could not persist labor costs: {e}")))?;
        *self.table.write().await = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Won;
    use domain_vehicle::VehicleGrade;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = LaborCostStore::open(dir.path().join("labor_costs.json")).await;
        assert_eq!(store.get().await, LaborCostTable::default());
    }

    #[tokio::test]
    async fn test_set_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labor_costs.json");

        let store = LaborCostStore::open(&path).await;
        let mut table = LaborCostTable::default();
        table
            .set_cost(VehicleGrade::Small, Won::from_i64(45_000))
            .unwrap();
        store.set(table.clone()).await.unwrap();

        let reopened = LaborCostStore::open(&path).await;
        assert_eq!(reopened.get().await, table);
    }
}
