//! Canonical accident status registry
//!
//! Every status value that enters the system - whether from the database,
//! legacy spreadsheet rows, or operator input - is normalized onto the seven
//! canonical statuses before storage or comparison. The lifecycle is a strict
//! linear chain with no branches and no backward transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accident case status
///
/// Serialized as the canonical Korean label, which is also the stored
/// database representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccidentStatus {
    /// Intake received (접수완료)
    #[serde(rename = "접수완료")]
    Received,
    /// Workshop assigned (배정완료)
    #[serde(rename = "배정완료")]
    Assigned,
    /// Installation scheduled (시공예정)
    #[serde(rename = "시공예정")]
    Scheduled,
    /// Installation completed (시공완료)
    #[serde(rename = "시공완료")]
    Completed,
    /// Awaiting settlement (정산대기)
    #[serde(rename = "정산대기")]
    PendingSettlement,
    /// Settled (정산완료)
    #[serde(rename = "정산완료")]
    Settled,
    /// Closed (종료)
    #[serde(rename = "종료")]
    Closed,
}

/// Display metadata for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub css_class: &'static str,
}

impl AccidentStatus {
    /// All canonical statuses in lifecycle order
    pub const ALL: [AccidentStatus; 7] = [
        AccidentStatus::Received,
        AccidentStatus::Assigned,
        AccidentStatus::Scheduled,
        AccidentStatus::Completed,
        AccidentStatus::PendingSettlement,
        AccidentStatus::Settled,
        AccidentStatus::Closed,
    ];

    /// Statuses eligible for settlement processing
    pub const SETTLEMENT_ELIGIBLE: [AccidentStatus; 3] = [
        AccidentStatus::Completed,
        AccidentStatus::PendingSettlement,
        AccidentStatus::Settled,
    ];

    /// Statuses covered by the 미정산 (unsettled) pseudo-filter
    pub const PRE_SETTLEMENT: [AccidentStatus; 4] = [
        AccidentStatus::Received,
        AccidentStatus::Assigned,
        AccidentStatus::Scheduled,
        AccidentStatus::Completed,
    ];

    /// The canonical Korean label
    pub fn label(&self) -> &'static str {
        match self {
            AccidentStatus::Received => "접수완료",
            AccidentStatus::Assigned => "배정완료",
            AccidentStatus::Scheduled => "시공예정",
            AccidentStatus::Completed => "시공완료",
            AccidentStatus::PendingSettlement => "정산대기",
            AccidentStatus::Settled => "정산완료",
            AccidentStatus::Closed => "종료",
        }
    }

    /// Parses an exact canonical label
    pub fn from_label(label: &str) -> Option<AccidentStatus> {
        Self::ALL.iter().copied().find(|s| s.label() == label)
    }

    /// Normalizes any status string onto the canonical set
    ///
    /// Canonical labels map to themselves; known legacy values map through
    /// the migration table; everything else (including empty input) falls
    /// back to Received. Never fails.
    pub fn normalize(raw: &str) -> AccidentStatus {
        let raw = raw.trim();
        if let Some(status) = Self::from_label(raw) {
            return status;
        }
        match raw {
            "접수됨" | "RECEIVED" | "신규" | "신규접수" => AccidentStatus::Received,
            "배정됨" | "ASSIGNED" => AccidentStatus::Assigned,
            "작업중" | "IN_PROGRESS" | "진행중" => AccidentStatus::Scheduled,
            "작업완료" | "COMPLETED" | "완료" => AccidentStatus::Completed,
            "SETTLED" => AccidentStatus::Settled,
            "CLOSED" => AccidentStatus::Closed,
            _ => AccidentStatus::Received,
        }
    }

    /// Fixed sort weight; lower sorts first in work queues
    pub fn priority(&self) -> i16 {
        match self {
            AccidentStatus::PendingSettlement => 1,
            AccidentStatus::Completed => 2,
            AccidentStatus::Scheduled => 3,
            AccidentStatus::Assigned => 4,
            AccidentStatus::Received => 5,
            AccidentStatus::Closed => 6,
            AccidentStatus::Settled => 7,
        }
    }

    /// The status immediately following in the lifecycle chain
    pub fn next(&self) -> Option<AccidentStatus> {
        let index = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    /// True only for the single-step forward transition
    ///
    /// No skipping, no backward moves, no self-transition.
    pub fn can_transition(&self, to: AccidentStatus) -> bool {
        self.next() == Some(to)
    }

    /// True if the status has no forward transition
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// True if the record participates in settlement views
    pub fn is_settlement_eligible(&self) -> bool {
        Self::SETTLEMENT_ELIGIBLE.contains(self)
    }

    /// Badge colors and CSS class for this status
    pub fn style(&self) -> StatusStyle {
        match self {
            AccidentStatus::Received => StatusStyle {
                background: "#e5e7eb",
                text: "#374151",
                css_class: "status-received",
            },
            AccidentStatus::Assigned => StatusStyle {
                background: "#dbeafe",
                text: "#1e40af",
                css_class: "status-assigned",
            },
            AccidentStatus::Scheduled => StatusStyle {
                background: "#e9d5ff",
                text: "#6b21a8",
                css_class: "status-scheduled",
            },
            AccidentStatus::Completed => StatusStyle {
                background: "#d1fae5",
                text: "#065f46",
                css_class: "status-completed",
            },
            AccidentStatus::PendingSettlement => StatusStyle {
                background: "#fed7aa",
                text: "#9a3412",
                css_class: "status-pending",
            },
            AccidentStatus::Settled => StatusStyle {
                background: "#10b981",
                text: "#ffffff",
                css_class: "status-settled",
            },
            AccidentStatus::Closed => StatusStyle {
                background: "#d1d5db",
                text: "#4b5563",
                css_class: "status-closed",
            },
        }
    }
}

impl Default for AccidentStatus {
    fn default() -> Self {
        AccidentStatus::Received
    }
}

impl fmt::Display for AccidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_identity_on_canonical() {
        for status in AccidentStatus::ALL {
            assert_eq!(AccidentStatus::normalize(status.label()), status);
        }
    }

    #[test]
    fn test_normalize_legacy_values() {
        assert_eq!(AccidentStatus::normalize("접수됨"), AccidentStatus::Received);
        assert_eq!(AccidentStatus::normalize("IN_PROGRESS"), AccidentStatus::Scheduled);
        assert_eq!(AccidentStatus::normalize("완료"), AccidentStatus::Completed);
        assert_eq!(AccidentStatus::normalize("SETTLED"), AccidentStatus::Settled);
        assert_eq!(AccidentStatus::normalize("CLOSED"), AccidentStatus::Closed);
    }

    #[test]
    fn test_normalize_unknown_defaults_to_received() {
        assert_eq!(AccidentStatus::normalize(""), AccidentStatus::Received);
        assert_eq!(AccidentStatus::normalize("garbage"), AccidentStatus::Received);
    }

    #[test]
    fn test_priority_ordering() {
        assert_eq!(AccidentStatus::PendingSettlement.priority(), 1);
        assert_eq!(AccidentStatus::Settled.priority(), 7);
    }

    #[test]
    fn test_chain_is_linear() {
        assert_eq!(AccidentStatus::Received.next(), Some(AccidentStatus::Assigned));
        assert_eq!(AccidentStatus::Settled.next(), Some(AccidentStatus::Closed));
        assert_eq!(AccidentStatus::Closed.next(), None);
    }

    #[test]
    fn test_transitions_single_step_only() {
        for from in AccidentStatus::ALL {
            for to in AccidentStatus::ALL {
                let expected = from.next() == Some(to);
                assert_eq!(from.can_transition(to), expected);
            }
            assert!(!from.can_transition(from));
        }
    }

    #[test]
    fn test_serde_uses_korean_labels() {
        let json = serde_json::to_string(&AccidentStatus::PendingSettlement).unwrap();
        assert_eq!(json, "\"정산대기\"");
        let back: AccidentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccidentStatus::PendingSettlement);
    }
}
