//! Settlement month scoping
//!
//! Settlement runs per calendar month in the office's local time. A record
//! belongs to a month when its accident time (falling back to creation time)
//! lands inside that month's Seoul-local boundaries, inclusive.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Asia::Seoul;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SettlementError;

/// One calendar month, e.g. `2025-08`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, SettlementError> {
        if !(1..=12).contains(&month) {
            return Err(SettlementError::InvalidMonthKey(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month containing the given instant, in Seoul local time
    pub fn of(instant: DateTime<Utc>) -> Self {
        let local = instant.with_timezone(&Seoul);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    /// True when the instant falls inside this month's local boundaries
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        Self::of(instant) == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = SettlementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SettlementError::InvalidMonthKey(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = SettlementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_and_display() {
        let key: MonthKey = "2025-08".parse().unwrap();
        assert_eq!(key.year(), 2025);
        assert_eq!(key.month(), 8);
        assert_eq!(key.to_string(), "2025-08");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2025".parse::<MonthKey>().is_err());
        assert!("2025-13".parse::<MonthKey>().is_err());
        assert!("2025-0".parse::<MonthKey>().is_err());
        assert!("august".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_seoul_local_boundary() {
        // 2025-07-31T16:00Z is already August 1st 01:00 in Seoul (UTC+9)
        let instant = Utc.with_ymd_and_hms(2025, 7, 31, 16, 0, 0).unwrap();
        let july: MonthKey = "2025-07".parse().unwrap();
        let august: MonthKey = "2025-08".parse().unwrap();
        assert!(!july.contains(instant));
        assert!(august.contains(instant));
    }

    #[test]
    fn test_contains_inclusive_of_month_start() {
        // Midnight Seoul on the 1st is 15:00Z the previous day
        let instant = Utc.with_ymd_and_hms(2025, 7, 31, 15, 0, 0).unwrap();
        let august: MonthKey = "2025-08".parse().unwrap();
        assert!(august.contains(instant));
    }
}
