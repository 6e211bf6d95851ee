//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;

use core_kernel::{CaseNo, Won};
use domain_accident::{AccidentRecord, AccidentStatus};
use domain_vehicle::VehicleGrade;

use crate::builders::AccidentRecordBuilder;

/// Strategy for any canonical status
pub fn status_strategy() -> impl Strategy<Value = AccidentStatus> {
    prop::sample::select(AccidentStatus::ALL.to_vec())
}

/// Strategy for settlement-eligible statuses only
pub fn eligible_status_strategy() -> impl Strategy<Value = AccidentStatus> {
    prop::sample::select(AccidentStatus::SETTLEMENT_ELIGIBLE.to_vec())
}

/// Strategy for a vehicle grade
pub fn grade_strategy() -> impl Strategy<Value = VehicleGrade> {
    prop::sample::select(VehicleGrade::ALL.to_vec())
}

/// Strategy for well-formed case numbers
pub fn case_no_strategy() -> impl Strategy<Value = CaseNo> {
    "[A-Z0-9]{2,4}-[0-9]{3,5}".prop_map(|s| CaseNo::new(s).expect("generated case numbers are non-blank"))
}

/// Strategy for non-negative whole-won amounts
pub fn won_strategy() -> impl Strategy<Value = Won> {
    (0i64..10_000_000i64).prop_map(Won::from_i64)
}

/// Strategy for a minimal record with a random status and case number
pub fn record_strategy() -> impl Strategy<Value = AccidentRecord> {
    (case_no_strategy(), status_strategy()).prop_map(|(case_no, status)| {
        AccidentRecordBuilder::new(case_no.as_str())
            .status(status)
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_generated_records_have_consistent_priority(record in record_strategy()) {
            prop_assert_eq!(record.status_priority, record.status.priority());
        }

        #[test]
        fn prop_generated_won_never_negative(amount in won_strategy()) {
            prop_assert!(!amount.is_negative());
        }

        #[test]
        fn prop_eligible_statuses_are_settlement_eligible(status in eligible_status_strategy()) {
            prop_assert!(status.is_settlement_eligible());
        }

        #[test]
        fn prop_grade_labels_parse_back(grade in grade_strategy()) {
            prop_assert_eq!(VehicleGrade::parse(grade.label()).unwrap(), grade);
        }
    }
}
