//! Geocoding port
//!
//! The domain only states the contract; the Kakao Local adapter lives in
//! `infra_geo`. A not-found address is a normal `Ok(None)`, not an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WorkshopError;

/// A geocoded coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Address-to-coordinate lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves an already-cleaned address to coordinates
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, WorkshopError>;
}
