//! Vehicle grade classification

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use core_kernel::VehicleId;

use crate::error::VehicleError;

/// Coarse vehicle size classification (차급)
///
/// Closed set; anything outside it is rejected at validation. Serialized as
/// the Korean label, matching the database constraint and sheet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleGrade {
    #[serde(rename = "소형")]
    Small,
    #[serde(rename = "중형")]
    Medium,
    #[serde(rename = "대형")]
    Large,
}

impl VehicleGrade {
    pub const ALL: [VehicleGrade; 3] = [
        VehicleGrade::Small,
        VehicleGrade::Medium,
        VehicleGrade::Large,
    ];

    /// The canonical Korean label
    pub fn label(&self) -> &'static str {
        match self {
            VehicleGrade::Small => "소형",
            VehicleGrade::Medium => "중형",
            VehicleGrade::Large => "대형",
        }
    }

    /// Validates a grade value against the closed set
    pub fn parse(raw: &str) -> Result<VehicleGrade, VehicleError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.label() == trimmed)
            .ok_or_else(|| VehicleError::InvalidGrade(raw.to_string()))
    }

    /// Best-effort grade inference from a free-text model name
    ///
    /// Keyword match only ("소형차", "medium SUV", ...). Returns None rather
    /// than guessing when no keyword is present.
    pub fn infer(car_model: &str) -> Option<VehicleGrade> {
        let lowered = car_model.to_lowercase();
        if lowered.contains("소형") || lowered.contains("small") {
            Some(VehicleGrade::Small)
        } else if lowered.contains("중형") || lowered.contains("medium") {
            Some(VehicleGrade::Medium)
        } else if lowered.contains("대형") || lowered.contains("large") {
            Some(VehicleGrade::Large)
        } else {
            None
        }
    }

    /// CSS badge class for this grade
    pub fn badge_class(&self) -> &'static str {
        match self {
            VehicleGrade::Small => "badge-class-small",
            VehicleGrade::Medium => "badge-class-medium",
            VehicleGrade::Large => "badge-class-large",
        }
    }
}

impl fmt::Display for VehicleGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lookup of authoritative grades by vehicle reference
///
/// The settlement aggregator consults this before falling back to keyword
/// inference, so swapping the backing source never touches aggregation.
pub trait GradeLookup {
    fn grade_of(&self, vehicle_id: &VehicleId) -> Option<VehicleGrade>;
}

/// In-memory grade index built from a fetched vehicle snapshot
#[derive(Debug, Clone, Default)]
pub struct GradeIndex {
    grades: HashMap<VehicleId, VehicleGrade>,
}

impl GradeIndex {
    pub fn new(grades: HashMap<VehicleId, VehicleGrade>) -> Self {
        Self { grades }
    }

    pub fn insert(&mut self, vehicle_id: VehicleId, grade: VehicleGrade) {
        self.grades.insert(vehicle_id, grade);
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

impl GradeLookup for GradeIndex {
    fn grade_of(&self, vehicle_id: &VehicleId) -> Option<VehicleGrade> {
        self.grades.get(vehicle_id).copied()
    }
}

impl FromIterator<(VehicleId, VehicleGrade)> for GradeIndex {
    fn from_iter<I: IntoIterator<Item = (VehicleId, VehicleGrade)>>(iter: I) -> Self {
        Self {
            grades: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_closed_set() {
        assert_eq!(VehicleGrade::parse("소형").unwrap(), VehicleGrade::Small);
        assert_eq!(VehicleGrade::parse(" 대형 ").unwrap(), VehicleGrade::Large);
        assert!(VehicleGrade::parse("경차").is_err());
        assert!(VehicleGrade::parse("").is_err());
    }

    #[test]
    fn test_infer_from_model_keywords() {
        assert_eq!(VehicleGrade::infer("소형차"), Some(VehicleGrade::Small));
        assert_eq!(VehicleGrade::infer("Medium SUV"), Some(VehicleGrade::Medium));
        assert_eq!(VehicleGrade::infer("대형 세단"), Some(VehicleGrade::Large));
        assert_eq!(VehicleGrade::infer("아반떼"), None);
    }

    #[test]
    fn test_index_lookup() {
        let id = VehicleId::new();
        let index: GradeIndex = [(id, VehicleGrade::Medium)].into_iter().collect();
        assert_eq!(index.grade_of(&id), Some(VehicleGrade::Medium));
        assert_eq!(index.grade_of(&VehicleId::new()), None);
    }

    #[test]
    fn test_serde_korean_labels() {
        let json = serde_json::to_string(&VehicleGrade::Small).unwrap();
        assert_eq!(json, "\"소형\"");
        let back: VehicleGrade = serde_json::from_str("\"대형\"").unwrap();
        assert_eq!(back, VehicleGrade::Large);
    }
}
