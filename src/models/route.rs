//! Travel leg type.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// One drive between two addresses.
///
/// A truck records a leg for every stop it drives to, including the final
/// leg back to the hub.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::models::Leg;
///
/// let leg = Leg {
///     from: 0,
///     to: 1,
///     distance: 3.0,
///     departed_at: time(8, 0, 0, 0),
///     arrived_at: time(8, 10, 0, 0),
/// };
/// assert!(leg.is_completed_by(time(8, 10, 0, 0)));
/// assert!(!leg.is_completed_by(time(8, 5, 0, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Address the truck left.
    pub from: usize,
    /// Address the truck drove to.
    pub to: usize,
    /// Distance driven.
    pub distance: f64,
    /// Clock time when the truck left `from`.
    pub departed_at: Time,
    /// Clock time when the truck reached `to`.
    pub arrived_at: Time,
}

impl Leg {
    /// Returns `true` if the truck had reached `to` by `time`.
    pub fn is_completed_by(&self, time: Time) -> bool {
        self.arrived_at <= time
    }

    /// Returns `true` if the truck was driving this leg at `time`.
    pub fn is_active_at(&self, time: Time) -> bool {
        self.departed_at <= time && time < self.arrived_at
    }
}
