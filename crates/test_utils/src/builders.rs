//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, Utc};

use core_kernel::{CaseNo, VehicleId};
use domain_accident::{AccidentRecord, AccidentStatus};
use domain_workshop::InstallerLocation;

/// Builder for accident records
pub struct AccidentRecordBuilder {
    record: AccidentRecord,
}

impl Default for AccidentRecordBuilder {
    fn default() -> Self {
        Self::new("T-0001")
    }
}

impl AccidentRecordBuilder {
    /// Creates a builder for the given case number
    ///
    /// Panics on a blank case number; test data is always well formed.
    pub fn new(case_no: &str) -> Self {
        Self {
            record: AccidentRecord::new(CaseNo::new(case_no).expect("valid test case number")),
        }
    }

    pub fn status(mut self, status: AccidentStatus) -> Self {
        self.record.apply_status(status);
        self
    }

    pub fn customer(mut self, name: &str, phone: &str) -> Self {
        self.record.customer_name = Some(name.to_string());
        self.record.phone = Some(phone.to_string());
        self
    }

    pub fn car(mut self, number: &str, model: &str) -> Self {
        self.record.car_number = Some(number.to_string());
        self.record.car_model = Some(model.to_string());
        self
    }

    pub fn vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.record.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn workshop(mut self, name: &str) -> Self {
        self.record.assigned_workshop_name = Some(name.to_string());
        self
    }

    pub fn insurer(mut self, insurer: &str) -> Self {
        self.record.insurer = Some(insurer.to_string());
        self
    }

    pub fn accident_time(mut self, when: DateTime<Utc>) -> Self {
        self.record.accident_time = Some(when);
        self
    }

    pub fn created_at(mut self, when: DateTime<Utc>) -> Self {
        self.record.created_at = when;
        self
    }

    pub fn build(self) -> AccidentRecord {
        self.record
    }
}

/// Builder for installer locations
pub struct WorkshopBuilder {
    workshop: InstallerLocation,
}

impl WorkshopBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            workshop: InstallerLocation::new(name).expect("valid test workshop name"),
        }
    }

    pub fn address(mut self, address: &str) -> Self {
        self.workshop.address = Some(address.to_string());
        self
    }

    pub fn coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.workshop.lat = Some(lat);
        self.workshop.lng = Some(lng);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.workshop.priority = priority;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.workshop.is_active = false;
        self
    }

    pub fn build(self) -> InstallerLocation {
        self.workshop
    }
}
