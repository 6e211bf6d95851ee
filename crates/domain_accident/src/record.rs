//! Accident record aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CaseNo, RecordId, VehicleId};

use crate::error::AccidentError;
use crate::status::AccidentStatus;

/// One accident intake, keyed by case number
///
/// The case number is the sole natural key; `receipt_number` persists only as
/// a legacy column mirror of it. Records are never physically deleted -
/// deletion flips `is_deleted` and stamps `deleted_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccidentRecord {
    /// Surrogate identifier (time-ordered)
    pub id: RecordId,
    /// Natural key (접수번호)
    pub case_no: CaseNo,
    /// When the accident happened
    pub accident_time: Option<DateTime<Utc>>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub car_number: Option<String>,
    pub vin: Option<String>,
    pub car_model: Option<String>,
    pub insurer: Option<String>,
    pub damage_type: Option<String>,
    pub accident_location: Option<String>,
    pub manager: Option<String>,
    /// Deductible amount as entered (free text in legacy data)
    pub deductible: Option<String>,
    pub deductible_pay_type: Option<String>,
    /// Authoritative vehicle reference, when matched
    pub vehicle_id: Option<VehicleId>,
    pub assigned_workshop_name: Option<String>,
    pub assigned_workshop_address: Option<String>,
    pub assigned_workshop_phone: Option<String>,
    pub memo: Option<String>,
    pub status: AccidentStatus,
    /// Derived from status; never trusted from input
    pub status_priority: i16,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccidentRecord {
    /// Creates a minimal record in the Received state
    pub fn new(case_no: CaseNo) -> Self {
        let now = Utc::now();
        let status = AccidentStatus::Received;
        Self {
            id: RecordId::new_v7(),
            case_no,
            accident_time: None,
            customer_name: None,
            phone: None,
            car_number: None,
            vin: None,
            car_model: None,
            insurer: None,
            damage_type: None,
            accident_location: None,
            manager: None,
            deductible: None,
            deductible_pay_type: None,
            vehicle_id: None,
            assigned_workshop_name: None,
            assigned_workshop_address: None,
            assigned_workshop_phone: None,
            memo: None,
            status,
            status_priority: status.priority(),
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances to the next lifecycle status
    pub fn advance(&mut self) -> Result<AccidentStatus, AccidentError> {
        let next = self.status.next().ok_or_else(|| {
            AccidentError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: "(none)".to_string(),
            }
        })?;
        self.transition_to(next)?;
        Ok(next)
    }

    /// Moves one step forward in the lifecycle
    ///
    /// Rejects skips, backward moves, and self-transitions.
    pub fn transition_to(&mut self, to: AccidentStatus) -> Result<(), AccidentError> {
        if !self.status.can_transition(to) {
            return Err(AccidentError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.apply_status(to);
        Ok(())
    }

    /// Sets the status directly, bypassing the transition chain
    ///
    /// Used by bulk settle actions and operator corrections, matching how the
    /// back office has always written status. The priority column is still
    /// recomputed here.
    pub fn apply_status(&mut self, status: AccidentStatus) {
        self.status = status;
        self.status_priority = status.priority();
        self.updated_at = Utc::now();
    }

    /// Soft-deletes the record
    pub fn mark_deleted(&mut self) -> Result<(), AccidentError> {
        if self.is_deleted {
            return Err(AccidentError::AlreadyDeleted(self.case_no.to_string()));
        }
        let now = Utc::now();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// The date settlement scoping uses: accident time, else creation time
    pub fn settlement_date(&self) -> DateTime<Utc> {
        self.accident_time.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AccidentRecord {
        AccidentRecord::new(CaseNo::new("C-100").unwrap())
    }

    #[test]
    fn test_new_record_defaults() {
        let rec = record();
        assert_eq!(rec.status, AccidentStatus::Received);
        assert_eq!(rec.status_priority, AccidentStatus::Received.priority());
        assert!(!rec.is_deleted);
        assert!(rec.deleted_at.is_none());
    }

    #[test]
    fn test_advance_walks_the_chain() {
        let mut rec = record();
        assert_eq!(rec.advance().unwrap(), AccidentStatus::Assigned);
        assert_eq!(rec.advance().unwrap(), AccidentStatus::Scheduled);
        assert_eq!(rec.status_priority, AccidentStatus::Scheduled.priority());
    }

    #[test]
    fn test_transition_rejects_skip() {
        let mut rec = record();
        assert!(rec.transition_to(AccidentStatus::Completed).is_err());
        assert_eq!(rec.status, AccidentStatus::Received);
    }

    #[test]
    fn test_closed_cannot_advance() {
        let mut rec = record();
        rec.apply_status(AccidentStatus::Closed);
        assert!(rec.advance().is_err());
    }

    #[test]
    fn test_mark_deleted_once() {
        let mut rec = record();
        rec.mark_deleted().unwrap();
        assert!(rec.is_deleted);
        assert!(rec.deleted_at.is_some());
        assert!(rec.mark_deleted().is_err());
    }

    #[test]
    fn test_settlement_date_prefers_accident_time() {
        let mut rec = record();
        assert_eq!(rec.settlement_date(), rec.created_at);
        let when = Utc::now();
        rec.accident_time = Some(when);
        assert_eq!(rec.settlement_date(), when);
    }
}
