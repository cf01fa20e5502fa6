//! Loading decision and rejection reason types.

use std::fmt;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a package may not be loaded onto a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Package is restricted to a different truck.
    TruckOnly,
    /// Package has not reached the hub yet.
    DelayedArrival,
    /// Package address is wrong and not yet corrected.
    WrongAddress,
    /// Package was already delivered.
    AlreadyDelivered,
    /// Package is already on the road.
    AlreadyEnRoute,
    /// Package is assigned to a different truck.
    AssignedToOtherTruck,
    /// Truck manifest is full.
    CapacityExceeded,
    /// Truck is out of service or away from the hub.
    TruckUnavailable,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConstraintKind::TruckOnly => "restricted to another truck",
            ConstraintKind::DelayedArrival => "not at the hub yet",
            ConstraintKind::WrongAddress => "wrong address listed",
            ConstraintKind::AlreadyDelivered => "already delivered",
            ConstraintKind::AlreadyEnRoute => "already en route",
            ConstraintKind::AssignedToOtherTruck => "assigned to another truck",
            ConstraintKind::CapacityExceeded => "truck is full",
            ConstraintKind::TruckUnavailable => "truck is unavailable",
        };
        f.write_str(text)
    }
}

/// Outcome of one eligibility check. Not stored anywhere.
///
/// # Examples
///
/// ```
/// use u_delivery::policy::{ConstraintKind, LoadingDecision};
///
/// let ok = LoadingDecision::eligible();
/// assert!(ok.is_eligible());
/// assert_eq!(ok.reason(), None);
///
/// let full = LoadingDecision::rejected(ConstraintKind::CapacityExceeded);
/// assert!(!full.is_eligible());
/// assert_eq!(full.reason(), Some(ConstraintKind::CapacityExceeded));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadingDecision {
    eligible: bool,
    reason: Option<ConstraintKind>,
}

impl LoadingDecision {
    /// The package may be loaded.
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    /// The package may not be loaded, for the given reason.
    pub fn rejected(reason: ConstraintKind) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }

    /// Returns `true` if the package may be loaded.
    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// The failing check, if any.
    pub fn reason(&self) -> Option<ConstraintKind> {
        self.reason
    }
}

/// A rejected load attempt. Recoverable: the package stays unloaded and the
/// simulation goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("package {package_id} cannot be loaded onto truck {truck_id} at {at}: {reason}")]
pub struct ConstraintViolation {
    pub package_id: usize,
    pub truck_id: usize,
    pub reason: ConstraintKind,
    pub at: Time,
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;

    #[test]
    fn test_violation_message() {
        let v = ConstraintViolation {
            package_id: 9,
            truck_id: 2,
            reason: ConstraintKind::WrongAddress,
            at: time(8, 0, 0, 0),
        };
        assert_eq!(
            v.to_string(),
            "package 9 cannot be loaded onto truck 2 at 08:00:00: wrong address listed"
        );
    }

    #[test]
    fn test_decision_equality() {
        assert_eq!(LoadingDecision::eligible(), LoadingDecision::eligible());
        assert_ne!(
            LoadingDecision::rejected(ConstraintKind::TruckOnly),
            LoadingDecision::rejected(ConstraintKind::DelayedArrival)
        );
    }
}
