//! Settlement aggregation
//!
//! Operates purely on an already-fetched snapshot of accident records; the
//! repository layer decides what to fetch and when. Only records in one of
//! the settlement-eligible statuses (시공완료, 정산대기, 정산완료) contribute.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use core_kernel::{RecordId, Won};
use domain_accident::{AccidentRecord, AccidentStatus};
use domain_vehicle::{GradeLookup, VehicleGrade};

use crate::labor_cost::LaborCostTable;
use crate::month::MonthKey;

/// Settlement state of a group of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SettlementStatus {
    /// No member settled yet (미정산)
    #[serde(rename = "미정산")]
    Unsettled,
    /// Some but not all members settled (부분정산)
    #[serde(rename = "부분정산")]
    PartiallySettled,
    /// Every member settled (정산완료)
    #[serde(rename = "정산완료")]
    Settled,
}

/// Per-workshop settlement tally
///
/// `unresolved_count` is reported separately: records whose grade could not
/// be resolved still count toward `total_count` but price at ₩0, and report
/// output must show them rather than fold them into a default grade.
#[derive(Debug, Clone, Serialize)]
pub struct WorkshopAggregate {
    pub workshop_name: String,
    pub small_count: u32,
    pub medium_count: u32,
    pub large_count: u32,
    pub unresolved_count: u32,
    pub total_count: u32,
    pub total_amount: Won,
    pub status: SettlementStatus,
    /// Member records, for drill-down and bulk settle actions
    pub record_ids: Vec<RecordId>,
}

/// Whole-month settlement tally across all workshops
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyAggregate {
    pub month: MonthKey,
    pub small_count: u32,
    pub medium_count: u32,
    pub large_count: u32,
    pub unresolved_count: u32,
    pub total_count: u32,
    pub total_amount: Won,
    /// Distinct workshops with at least one member record
    pub workshop_count: u32,
    pub status: SettlementStatus,
}

/// Resolves a record's vehicle grade
///
/// The authoritative vehicle table wins; keyword inference from the
/// free-text model name is the fallback. `None` means the grade could not
/// be resolved at all.
pub fn resolve_grade(record: &AccidentRecord, grades: &dyn GradeLookup) -> Option<VehicleGrade> {
    if let Some(vehicle_id) = &record.vehicle_id {
        if let Some(grade) = grades.grade_of(vehicle_id) {
            return Some(grade);
        }
    }
    record
        .car_model
        .as_deref()
        .and_then(VehicleGrade::infer)
}

#[derive(Default)]
struct Tally {
    small: u32,
    medium: u32,
    large: u32,
    unresolved: u32,
    total: u32,
    settled: u32,
    amount: Won,
    record_ids: Vec<RecordId>,
}

impl Tally {
    fn add(&mut self, record: &AccidentRecord, grade: Option<VehicleGrade>, costs: &LaborCostTable) {
        match grade {
            Some(VehicleGrade::Small) => self.small += 1,
            Some(VehicleGrade::Medium) => self.medium += 1,
            Some(VehicleGrade::Large) => self.large += 1,
            None => self.unresolved += 1,
        }
        self.total += 1;
        if record.status == AccidentStatus::Settled {
            self.settled += 1;
        }
        self.amount += costs.cost_of(grade);
        self.record_ids.push(record.id);
    }

    fn status(&self) -> SettlementStatus {
        if self.total > 0 && self.settled == self.total {
            SettlementStatus::Settled
        } else if self.settled > 0 {
            SettlementStatus::PartiallySettled
        } else {
            SettlementStatus::Unsettled
        }
    }
}

/// Groups settlement-eligible records by assigned workshop
///
/// Records without an assigned workshop are excluded entirely. Output group
/// order carries no meaning; callers sort by total, name, or whatever the
/// view needs.
pub fn aggregate_by_workshop(
    records: &[AccidentRecord],
    grades: &dyn GradeLookup,
    costs: &LaborCostTable,
) -> Vec<WorkshopAggregate> {
    let mut groups: BTreeMap<String, Tally> = BTreeMap::new();

    for record in records {
        if !record.status.is_settlement_eligible() {
            continue;
        }
        let Some(workshop) = record.assigned_workshop_name.as_deref() else {
            continue;
        };
        let grade = resolve_grade(record, grades);
        groups
            .entry(workshop.to_string())
            .or_default()
            .add(record, grade, costs);
    }

    groups
        .into_iter()
        .map(|(workshop_name, tally)| WorkshopAggregate {
            workshop_name,
            small_count: tally.small,
            medium_count: tally.medium,
            large_count: tally.large,
            unresolved_count: tally.unresolved,
            total_count: tally.total,
            total_amount: tally.amount,
            status: tally.status(),
            record_ids: tally.record_ids,
        })
        .collect()
}

/// Tallies one calendar month across all workshops
///
/// Month membership uses the accident time, falling back to creation time,
/// against Seoul-local month boundaries. Unlike the per-workshop grouping,
/// records without an assigned workshop still count here.
pub fn aggregate_by_month(
    records: &[AccidentRecord],
    month: MonthKey,
    grades: &dyn GradeLookup,
    costs: &LaborCostTable,
) -> MonthlyAggregate {
    let mut tally = Tally::default();
    let mut workshops: BTreeSet<&str> = BTreeSet::new();

    for record in records {
        if !record.status.is_settlement_eligible() {
            continue;
        }
        if !month.contains(record.settlement_date()) {
            continue;
        }
        let grade = resolve_grade(record, grades);
        tally.add(record, grade, costs);
        if let Some(workshop) = record.assigned_workshop_name.as_deref() {
            workshops.insert(workshop);
        }
    }

    MonthlyAggregate {
        month,
        small_count: tally.small,
        medium_count: tally.medium,
        large_count: tally.large,
        unresolved_count: tally.unresolved,
        total_count: tally.total,
        total_amount: tally.amount,
        workshop_count: workshops.len() as u32,
        status: tally.status(),
    }
}
