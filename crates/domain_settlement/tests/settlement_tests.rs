//! Comprehensive tests for settlement aggregation

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use core_kernel::{CaseNo, VehicleId, Won};
use domain_accident::{AccidentRecord, AccidentStatus};
use domain_settlement::{
    aggregate_by_month, aggregate_by_workshop, resolve_grade, LaborCostTable, MonthKey,
    SettlementStatus,
};
use domain_vehicle::{GradeIndex, VehicleGrade};

fn record(case_no: &str, status: AccidentStatus, workshop: Option<&str>) -> AccidentRecord {
    let mut record = AccidentRecord::new(CaseNo::new(case_no).unwrap());
    record.apply_status(status);
    record.assigned_workshop_name = workshop.map(str::to_string);
    record
}

fn empty_grades() -> GradeIndex {
    GradeIndex::default()
}

// ============================================================================
// Per-Workshop Aggregation Tests
// ============================================================================

mod workshop_aggregation_tests {
    use super::*;

    #[test]
    fn test_mixed_grades_at_one_workshop() {
        let vehicle_small = VehicleId::new();
        let vehicle_medium = VehicleId::new();
        let grades: GradeIndex = [
            (vehicle_small, VehicleGrade::Small),
            (vehicle_medium, VehicleGrade::Medium),
        ]
        .into_iter()
        .collect();

        let mut a1 = record("A1", AccidentStatus::Completed, Some("W1"));
        a1.vehicle_id = Some(vehicle_small);
        let mut a2 = record("A2", AccidentStatus::Settled, Some("W1"));
        a2.vehicle_id = Some(vehicle_medium);

        let costs = LaborCostTable::default();
        let groups = aggregate_by_workshop(&[a1, a2], &grades, &costs);

        assert_eq!(groups.len(), 1);
        let w1 = &groups[0];
        assert_eq!(w1.workshop_name, "W1");
        assert_eq!(w1.small_count, 1);
        assert_eq!(w1.medium_count, 1);
        assert_eq!(w1.large_count, 0);
        assert_eq!(w1.total_count, 2);
        assert_eq!(w1.total_amount, Won::from_i64(120_000));
        assert_eq!(w1.status, SettlementStatus::PartiallySettled);
        assert_eq!(w1.record_ids.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        let groups = aggregate_by_workshop(&[], &empty_grades(), &LaborCostTable::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_ineligible_statuses_excluded() {
        let records = vec![
            record("B1", AccidentStatus::Received, Some("W1")),
            record("B2", AccidentStatus::Assigned, Some("W1")),
            record("B3", AccidentStatus::Scheduled, Some("W1")),
            record("B4", AccidentStatus::Closed, Some("W1")),
        ];
        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_unassigned_records_excluded() {
        let records = vec![
            record("C1", AccidentStatus::Completed, None),
            record("C2", AccidentStatus::Completed, Some("W2")),
        ];
        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].workshop_name, "W2");
        assert_eq!(groups[0].total_count, 1);
    }

    #[test]
    fn test_unresolved_grade_counts_but_prices_at_zero() {
        let mut with_model = record("D1", AccidentStatus::Completed, Some("W1"));
        with_model.car_model = Some("대형 트럭".to_string());
        let no_hint = record("D2", AccidentStatus::Completed, Some("W1"));

        let groups = aggregate_by_workshop(
            &[with_model, no_hint],
            &empty_grades(),
            &LaborCostTable::default(),
        );
        let w1 = &groups[0];
        assert_eq!(w1.large_count, 1);
        assert_eq!(w1.unresolved_count, 1);
        assert_eq!(w1.total_count, 2);
        // Only the resolved record is priced
        assert_eq!(w1.total_amount, Won::from_i64(90_000));
    }

    #[test]
    fn test_status_all_settled() {
        let records = vec![
            record("E1", AccidentStatus::Settled, Some("W1")),
            record("E2", AccidentStatus::Settled, Some("W1")),
        ];
        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        assert_eq!(groups[0].status, SettlementStatus::Settled);
    }

    #[test]
    fn test_status_none_settled() {
        let records = vec![
            record("F1", AccidentStatus::Completed, Some("W1")),
            record("F2", AccidentStatus::PendingSettlement, Some("W1")),
        ];
        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        assert_eq!(groups[0].status, SettlementStatus::Unsettled);
    }

    #[test]
    fn test_grouping_splits_workshops() {
        let records = vec![
            record("G1", AccidentStatus::Completed, Some("강남공업사")),
            record("G2", AccidentStatus::Completed, Some("수원공업사")),
            record("G3", AccidentStatus::Completed, Some("강남공업사")),
        ];
        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        assert_eq!(groups.len(), 2);
        let gangnam = groups.iter().find(|g| g.workshop_name == "강남공업사").unwrap();
        assert_eq!(gangnam.total_count, 2);
    }
}

// ============================================================================
// Grade Resolution Tests
// ============================================================================

mod grade_resolution_tests {
    use super::*;

    #[test]
    fn test_vehicle_table_wins_over_model_inference() {
        let vehicle = VehicleId::new();
        let grades: GradeIndex = [(vehicle, VehicleGrade::Large)].into_iter().collect();

        let mut rec = record("H1", AccidentStatus::Completed, Some("W1"));
        rec.vehicle_id = Some(vehicle);
        rec.car_model = Some("소형 경차".to_string());

        assert_eq!(resolve_grade(&rec, &grades), Some(VehicleGrade::Large));
    }

    #[test]
    fn test_model_inference_fallback_when_vehicle_unknown() {
        let mut rec = record("H2", AccidentStatus::Completed, Some("W1"));
        rec.vehicle_id = Some(VehicleId::new());
        rec.car_model = Some("중형 세단 (Medium)".to_string());

        assert_eq!(resolve_grade(&rec, &empty_grades()), Some(VehicleGrade::Medium));
    }

    #[test]
    fn test_no_hint_resolves_to_none() {
        let mut rec = record("H3", AccidentStatus::Completed, Some("W1"));
        rec.car_model = Some("아반떼".to_string());
        assert_eq!(resolve_grade(&rec, &empty_grades()), None);
    }
}

// ============================================================================
// Monthly Aggregation Tests
// ============================================================================

mod monthly_aggregation_tests {
    use super::*;

    #[test]
    fn test_month_scoping_uses_accident_time_with_created_at_fallback() {
        let august: MonthKey = "2025-08".parse().unwrap();

        let mut in_month = record("I1", AccidentStatus::Completed, Some("W1"));
        in_month.accident_time = Some(Utc.with_ymd_and_hms(2025, 8, 10, 3, 0, 0).unwrap());
        let mut out_of_month = record("I2", AccidentStatus::Completed, Some("W1"));
        out_of_month.accident_time = Some(Utc.with_ymd_and_hms(2025, 9, 2, 3, 0, 0).unwrap());
        // No accident time: falls back to created_at
        let mut fallback = record("I3", AccidentStatus::Completed, Some("W2"));
        fallback.created_at = Utc.with_ymd_and_hms(2025, 8, 20, 3, 0, 0).unwrap();

        let monthly = aggregate_by_month(
            &[in_month, out_of_month, fallback],
            august,
            &empty_grades(),
            &LaborCostTable::default(),
        );
        assert_eq!(monthly.total_count, 2);
        assert_eq!(monthly.workshop_count, 2);
    }

    #[test]
    fn test_unassigned_records_still_count_monthly() {
        let august: MonthKey = "2025-08".parse().unwrap();
        let mut rec = record("J1", AccidentStatus::Settled, None);
        rec.created_at = Utc.with_ymd_and_hms(2025, 8, 5, 3, 0, 0).unwrap();

        let monthly =
            aggregate_by_month(&[rec], august, &empty_grades(), &LaborCostTable::default());
        assert_eq!(monthly.total_count, 1);
        assert_eq!(monthly.workshop_count, 0);
        assert_eq!(monthly.status, SettlementStatus::Settled);
    }

    #[test]
    fn test_empty_month() {
        let august: MonthKey = "2025-08".parse().unwrap();
        let monthly =
            aggregate_by_month(&[], august, &empty_grades(), &LaborCostTable::default());
        assert_eq!(monthly.total_count, 0);
        assert_eq!(monthly.total_amount, Won::zero());
        assert_eq!(monthly.status, SettlementStatus::Unsettled);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Per-grade counts plus unresolved always reconcile with the total
    #[test]
    fn prop_counts_reconcile(statuses in prop::collection::vec(0usize..7, 0..40)) {
        let records: Vec<AccidentRecord> = statuses
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut rec = record(&format!("P-{i}"), AccidentStatus::ALL[s], Some("W1"));
                if i % 3 == 0 {
                    rec.car_model = Some("소형".to_string());
                }
                rec
            })
            .collect();

        let groups = aggregate_by_workshop(&records, &empty_grades(), &LaborCostTable::default());
        for group in groups {
            let by_grade =
                group.small_count + group.medium_count + group.large_count + group.unresolved_count;
            prop_assert_eq!(by_grade, group.total_count);
            prop_assert_eq!(group.record_ids.len() as u32, group.total_count);
        }
    }

    /// Total amount is exactly the sum of each member's grade fee
    #[test]
    fn prop_amount_is_sum_of_member_fees(grades in prop::collection::vec(0usize..4, 1..30)) {
        let costs = LaborCostTable::default();
        let model = |g: usize| match g {
            0 => Some("소형".to_string()),
            1 => Some("중형".to_string()),
            2 => Some("대형".to_string()),
            _ => None,
        };
        let records: Vec<AccidentRecord> = grades
            .iter()
            .enumerate()
            .map(|(i, &g)| {
                let mut rec = record(&format!("Q-{i}"), AccidentStatus::Completed, Some("W1"));
                rec.car_model = model(g);
                rec
            })
            .collect();

        let expected: Won = records
            .iter()
            .map(|r| costs.cost_of(resolve_grade(r, &empty_grades())))
            .sum();
        let groups = aggregate_by_workshop(&records, &empty_grades(), &costs);
        prop_assert_eq!(groups[0].total_amount, expected);
    }
}
