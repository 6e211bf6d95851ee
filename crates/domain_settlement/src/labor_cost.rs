//! Flat-rate labor cost table
//!
//! Each vehicle grade maps to one flat labor fee. The table is operator
//! configuration, persisted locally by the API layer rather than in the
//! shared database, so one operator's pricing experiments never leak to the
//! rest of the office.

use serde::{Deserialize, Serialize};

use core_kernel::Won;
use domain_vehicle::VehicleGrade;

use crate::error::SettlementError;

/// Labor fee per vehicle grade
///
/// Serialized with the Korean grade keys the legacy settings used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCostTable {
    #[serde(rename = "소형")]
    small: Won,
    #[serde(rename = "중형")]
    medium: Won,
    #[serde(rename = "대형")]
    large: Won,
}

impl Default for LaborCostTable {
    fn default() -> Self {
        Self {
            small: Won::from_i64(50_000),
            medium: Won::from_i64(70_000),
            large: Won::from_i64(90_000),
        }
    }
}

impl LaborCostTable {
    pub fn new(small: Won, medium: Won, large: Won) -> Result<Self, SettlementError> {
        let mut table = Self::default();
        table.set_cost(VehicleGrade::Small, small)?;
        table.set_cost(VehicleGrade::Medium, medium)?;
        table.set_cost(VehicleGrade::Large, large)?;
        Ok(table)
    }

    /// The labor fee for a resolved grade; an unresolved grade costs nothing
    ///
    /// There is deliberately no "unknown" entry - unresolved records are
    /// flagged separately in aggregates instead of being merged into a
    /// default grade.
    pub fn cost_of(&self, grade: Option<VehicleGrade>) -> Won {
        match grade {
            Some(VehicleGrade::Small) => self.small,
            Some(VehicleGrade::Medium) => self.medium,
            Some(VehicleGrade::Large) => self.large,
            None => Won::zero(),
        }
    }

    /// Updates one grade's fee; negative amounts are rejected
    pub fn set_cost(&mut self, grade: VehicleGrade, amount: Won) -> Result<(), SettlementError> {
        let amount = amount
            .ensure_non_negative()
            .map_err(|_| SettlementError::NegativeLaborCost {
                grade: grade.label(),
                amount: amount.amount().to_string(),
            })?;
        match grade {
            VehicleGrade::Small => self.small = amount,
            VehicleGrade::Medium => self.medium = amount,
            VehicleGrade::Large => self.large = amount,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = LaborCostTable::default();
        assert_eq!(table.cost_of(Some(VehicleGrade::Small)), Won::from_i64(50_000));
        assert_eq!(table.cost_of(Some(VehicleGrade::Medium)), Won::from_i64(70_000));
        assert_eq!(table.cost_of(Some(VehicleGrade::Large)), Won::from_i64(90_000));
    }

    #[test]
    fn test_unresolved_grade_costs_nothing() {
        assert_eq!(LaborCostTable::default().cost_of(None), Won::zero());
    }

    #[test]
    fn test_set_cost_rejects_negative() {
        let mut table = LaborCostTable::default();
        let err = table.set_cost(VehicleGrade::Small, Won::from_i64(-100));
        assert!(err.is_err());
        // Unchanged after the rejected update
        assert_eq!(table.cost_of(Some(VehicleGrade::Small)), Won::from_i64(50_000));
    }

    #[test]
    fn test_serde_round_trip_with_korean_keys() {
        let table = LaborCostTable::new(
            Won::from_i64(40_000),
            Won::from_i64(60_000),
            Won::from_i64(80_000),
        )
        .unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("소형"));
        let back: LaborCostTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
