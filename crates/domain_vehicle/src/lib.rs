//! Vehicle reference domain
//!
//! The vehicle table is the authoritative source for grade classification,
//! which drives flat-rate labor pricing. A keyword-based fallback infers the
//! grade from free-text model names when no table entry matches; both sit
//! behind the same lookup interface so the fallback can be swapped out
//! without touching the settlement aggregator.

pub mod grade;
pub mod vehicle;
pub mod sheet;
pub mod error;

pub use grade::{GradeIndex, GradeLookup, VehicleGrade};
pub use vehicle::Vehicle;
pub use sheet::VehicleSheetRow;
pub use error::VehicleError;
