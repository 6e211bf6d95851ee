//! Kakao Local address search client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use domain_workshop::{clean_address, GeoPoint, Geocoder, WorkshopError};

const SEARCH_URL: &str = "https://dapi.kakao.com/v2/local/search/address.json";

/// Geocoder backed by the Kakao Local address search API
///
/// Addresses are cleaned of floor and unit suffixes before querying; Kakao
/// matches street addresses, not room numbers.
#[derive(Debug, Clone)]
pub struct KakaoGeocoder {
    client: reqwest::Client,
    rest_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    documents: Vec<Document>,
}

/// Kakao returns coordinates as strings; x is longitude, y is latitude.
#[derive(Debug, Deserialize)]
struct Document {
    x: String,
    y: String,
}

impl KakaoGeocoder {
    pub fn new(rest_key: impl Into<String>) -> Result<Self, WorkshopError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WorkshopError::Geocoding(e.to_string()))?;
        Ok(Self {
            client,
            rest_key: rest_key.into(),
        })
    }
}

#[async_trait]
impl Geocoder for KakaoGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, WorkshopError> {
        let cleaned = clean_address(address);
        if cleaned.is_empty() {
            return Ok(None);
        }

        let url = format!("{SEARCH_URL}?query={}", urlencoding::encode(&cleaned));
        debug!(address = %cleaned, "Querying Kakao address search");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.rest_key))
            .send()
            .await
            .map_err(|e| WorkshopError::Geocoding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkshopError::Geocoding(format!(
                "Kakao address search returned {status}: {body}"
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| WorkshopError::Geocoding(format!("Malformed Kakao response: {e}")))?;

        let Some(document) = parsed.documents.first() else {
            warn!(address = %cleaned, "No Kakao match for address");
            return Ok(None);
        };

        let lng: f64 = document
            .x
            .parse()
            .map_err(|_| WorkshopError::Geocoding(format!("Bad longitude '{}'", document.x)))?;
        let lat: f64 = document
            .y
            .parse()
            .map_err(|_| WorkshopError::Geocoding(format!("Bad latitude '{}'", document.y)))?;

        Ok(Some(GeoPoint { lat, lng }))
    }
}
