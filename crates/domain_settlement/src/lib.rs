//! Settlement domain
//!
//! Monthly settlement is the accounting step that pays workshops for
//! completed installations. Records eligible for settlement are grouped by
//! workshop or by calendar month, tallied per vehicle grade, and priced
//! through the flat-rate labor cost table.

pub mod labor_cost;
pub mod month;
pub mod aggregate;
pub mod error;

pub use labor_cost::LaborCostTable;
pub use month::MonthKey;
pub use aggregate::{
    aggregate_by_month, aggregate_by_workshop, resolve_grade, MonthlyAggregate,
    SettlementStatus, WorkshopAggregate,
};
pub use error::SettlementError;
