//! Installer workshop domain
//!
//! Workshops (시공점) are the repair facilities accident cases get assigned
//! to. Addresses arrive messy - floor and unit suffixes, trailing ranges -
//! and are cleaned before any geocoding lookup.

pub mod workshop;
pub mod address;
pub mod geocode;
pub mod sheet;
pub mod error;

pub use workshop::{sort_for_assignment, InstallerLocation};
pub use address::clean_address;
pub use geocode::{GeoPoint, Geocoder};
pub use sheet::WorkshopSheetRow;
pub use error::WorkshopError;
