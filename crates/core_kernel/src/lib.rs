//! Core Kernel - Foundational types for the glass claims back-office
//!
//! This crate provides the building blocks used across all domain modules:
//! - Won amounts with precise decimal arithmetic
//! - Typed entity identifiers and the case-number natural key

pub mod money;
pub mod identifiers;

pub use money::{Won, MoneyError};
pub use identifiers::{CaseNo, RecordId, VehicleId, WorkshopId, UserId};
