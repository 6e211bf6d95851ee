//! Strongly-typed identifiers for domain entities
//!
//! Newtype wrappers around UUIDs prevent accidental mixing of identifier
//! types. The case number is different: it is the natural key operators type
//! in and legacy sheets carry around, so it wraps a trimmed string instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(RecordId, "ACC");
define_id!(VehicleId, "VEH");
define_id!(WorkshopId, "WSH");
define_id!(UserId, "USR");

/// Error produced when a case number cannot be formed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaseNoError {
    #[error("Case number is empty")]
    Empty,
}

/// The accident case number (접수번호)
///
/// Natural key for accident records. Always stored trimmed; an empty or
/// whitespace-only value is rejected at construction so downstream code never
/// sees a blank key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseNo(String);

impl CaseNo {
    /// Creates a case number, trimming surrounding whitespace
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CaseNoError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CaseNoError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the case number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CaseNo {
    type Err = CaseNoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CaseNo {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
