//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use domain_accident::AccidentRecord;
use domain_settlement::{MonthlyAggregate, WorkshopAggregate};

/// Asserts the triage ordering the board relies on: ascending status
/// priority, newest first within a priority.
pub fn assert_board_order(records: &[AccidentRecord]) {
    for pair in records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.status_priority < b.status_priority
                || (a.status_priority == b.status_priority && a.created_at >= b.created_at),
            "Board order violated between {} and {}",
            a.case_no,
            b.case_no
        );
    }
}

/// Asserts a workshop aggregate's counts reconcile
pub fn assert_aggregate_consistent(aggregate: &WorkshopAggregate) {
    let by_grade = aggregate.small_count
        + aggregate.medium_count
        + aggregate.large_count
        + aggregate.unresolved_count;
    assert_eq!(
        by_grade, aggregate.total_count,
        "Grade counts do not reconcile with total for {}",
        aggregate.workshop_name
    );
    assert_eq!(
        aggregate.record_ids.len() as u32,
        aggregate.total_count,
        "Member ids do not match total for {}",
        aggregate.workshop_name
    );
}

/// Asserts a monthly aggregate's counts reconcile
pub fn assert_monthly_consistent(aggregate: &MonthlyAggregate) {
    let by_grade = aggregate.small_count
        + aggregate.medium_count
        + aggregate.large_count
        + aggregate.unresolved_count;
    assert_eq!(
        by_grade, aggregate.total_count,
        "Grade counts do not reconcile with total for {}",
        aggregate.month
    );
}
