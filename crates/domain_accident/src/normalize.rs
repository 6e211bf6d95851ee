//! Record normalization
//!
//! Historical intake forms, spreadsheet imports, and the mobile client all
//! used different field names for the same logical attributes. This module
//! resolves those aliases deterministically: each canonical field carries an
//! ordered alias list, and the first alias with a non-empty value wins.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use core_kernel::{CaseNo, VehicleId};

use crate::error::AccidentError;
use crate::record::AccidentRecord;
use crate::status::AccidentStatus;

/// Accepted aliases for the case number, in preference order
pub const CASE_NO_ALIASES: &[&str] = &["case_no", "receipt_number", "receiptNumber", "caseNo"];

const ACCIDENT_TIME_ALIASES: &[&str] = &["accident_time", "accident_date", "accidentTime"];
const CUSTOMER_NAME_ALIASES: &[&str] = &["customer_name", "customerName"];
const CAR_NUMBER_ALIASES: &[&str] = &["car_number", "car_no", "carNumber"];
const CAR_MODEL_ALIASES: &[&str] = &["car_model", "carModel"];
const INSURER_ALIASES: &[&str] = &["insurer", "insurance"];
const DAMAGE_TYPE_ALIASES: &[&str] = &["damage_type", "damageType"];
const LOCATION_ALIASES: &[&str] = &["accident_location", "accidentLocation"];
const DEDUCTIBLE_PAY_TYPE_ALIASES: &[&str] = &["deductible_pay_type", "deductible_type", "deductiblePayType"];
const VEHICLE_ID_ALIASES: &[&str] = &["vehicle_id", "vehicleId"];

/// Resolves the first alias holding a non-empty value
///
/// Strings are trimmed; an empty-after-trim string counts as absent, so a
/// blank `case_no` still falls through to `receipt_number`. Numbers are
/// accepted and stringified (legacy sheets exported numeric case numbers).
fn resolve(input: &Value, aliases: &[&str]) -> Option<String> {
    let object = input.as_object()?;
    for alias in aliases {
        match object.get(*alias) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Resolves a timestamp field
///
/// Empty strings normalize to an explicit absence - they are never carried
/// through as empty strings. A present, non-empty value must be RFC 3339.
fn resolve_timestamp(
    input: &Value,
    aliases: &[&str],
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, AccidentError> {
    match resolve(input, aliases) {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AccidentError::InvalidTimestamp { field, value: raw }),
    }
}

/// Maps a loosely-shaped input object onto the canonical accident record
///
/// Fails fast when no case-number alias resolves; everything else is
/// optional. The status is normalized and its priority recomputed here -
/// incoming `status_priority` values are ignored. Output always has
/// `is_deleted = false` and a fresh `updated_at`; `created_at` is preserved
/// when the input carries one.
pub fn canonicalize(input: &Value) -> Result<AccidentRecord, AccidentError> {
    let case_no = resolve(input, CASE_NO_ALIASES)
        .and_then(|raw| CaseNo::new(raw).ok())
        .ok_or(AccidentError::MissingCaseNo)?;

    let status = resolve(input, &["status"])
        .map(|raw| AccidentStatus::normalize(&raw))
        .unwrap_or_default();

    let vehicle_id = resolve(input, VEHICLE_ID_ALIASES).and_then(|raw| {
        raw.parse::<VehicleId>()
            .map_err(|_| warn!(value = %raw, "discarding unparseable vehicle_id"))
            .ok()
    });

    let now = Utc::now();
    let created_at = resolve_timestamp(input, &["created_at"], "created_at")?.unwrap_or(now);

    let mut record = AccidentRecord::new(case_no);
    record.accident_time = resolve_timestamp(input, ACCIDENT_TIME_ALIASES, "accident_time")?;
    record.customer_name = resolve(input, CUSTOMER_NAME_ALIASES);
    record.phone = resolve(input, &["phone"]);
    record.car_number = resolve(input, CAR_NUMBER_ALIASES);
    record.vin = resolve(input, &["vin"]);
    record.car_model = resolve(input, CAR_MODEL_ALIASES);
    record.insurer = resolve(input, INSURER_ALIASES);
    record.damage_type = resolve(input, DAMAGE_TYPE_ALIASES);
    record.accident_location = resolve(input, LOCATION_ALIASES);
    record.manager = resolve(input, &["manager"]);
    record.deductible = resolve(input, &["deductible"]);
    record.deductible_pay_type = resolve(input, DEDUCTIBLE_PAY_TYPE_ALIASES);
    record.vehicle_id = vehicle_id;
    record.assigned_workshop_name = resolve(input, &["assigned_workshop_name"]);
    record.assigned_workshop_address = resolve(input, &["assigned_workshop_address"]);
    record.assigned_workshop_phone = resolve(input, &["assigned_workshop_phone"]);
    record.memo = resolve(input, &["memo"]);
    record.status = status;
    record.status_priority = status.priority();
    record.is_deleted = false;
    record.created_at = created_at;
    record.updated_at = now;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_no_resolves_from_any_alias() {
        for alias in CASE_NO_ALIASES {
            let input = json!({ *alias: "A-77" });
            let record = canonicalize(&input).unwrap();
            assert_eq!(record.case_no.as_str(), "A-77");
        }
    }

    #[test]
    fn test_missing_case_no_fails() {
        let input = json!({ "customer_name": "김민수" });
        assert!(matches!(
            canonicalize(&input),
            Err(AccidentError::MissingCaseNo)
        ));
    }

    #[test]
    fn test_blank_case_no_falls_through_to_next_alias() {
        let input = json!({ "case_no": "   ", "receipt_number": "R-1" });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.case_no.as_str(), "R-1");
    }

    #[test]
    fn test_case_no_is_trimmed() {
        let input = json!({ "case_no": " B2 " });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.case_no.as_str(), "B2");
    }

    #[test]
    fn test_alias_preference_order() {
        let input = json!({ "insurance": "DB손해보험", "insurer": "삼성화재" });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.insurer.as_deref(), Some("삼성화재"));
    }

    #[test]
    fn test_empty_timestamp_becomes_none() {
        let input = json!({ "case_no": "A1", "accident_time": "" });
        let record = canonicalize(&input).unwrap();
        assert!(record.accident_time.is_none());
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let input = json!({ "case_no": "A1", "accident_time": "yesterday" });
        assert!(matches!(
            canonicalize(&input),
            Err(AccidentError::InvalidTimestamp { field: "accident_time", .. })
        ));
    }

    #[test]
    fn test_status_normalized_and_priority_recomputed() {
        let input = json!({ "case_no": "A1", "status": "작업완료", "status_priority": 42 });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.status, AccidentStatus::Completed);
        assert_eq!(record.status_priority, AccidentStatus::Completed.priority());
    }

    #[test]
    fn test_status_defaults_to_received() {
        let input = json!({ "case_no": "A1" });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.status, AccidentStatus::Received);
    }

    #[test]
    fn test_created_at_preserved() {
        let input = json!({ "case_no": "A1", "created_at": "2025-03-01T09:00:00+09:00" });
        let record = canonicalize(&input).unwrap();
        assert_eq!(
            record.created_at,
            DateTime::parse_from_rfc3339("2025-03-01T09:00:00+09:00").unwrap()
        );
        assert!(record.updated_at > record.created_at);
    }

    #[test]
    fn test_numeric_case_no_accepted() {
        let input = json!({ "case_no": 20250817 });
        let record = canonicalize(&input).unwrap();
        assert_eq!(record.case_no.as_str(), "20250817");
    }
}
