//! Truck trips and address corrections fed into a run.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// One trip of one truck.
///
/// Without an explicit package list the truck is offered every package
/// still waiting for a truck, in ascending id order.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::simulation::TruckPlan;
///
/// let plan = TruckPlan::new(2)
///     .departing_at(time(9, 5, 0, 0))
///     .with_packages(vec![6, 25, 28]);
/// assert_eq!(plan.truck_id(), 2);
/// assert_eq!(plan.packages(), Some(&[6, 25, 28][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruckPlan {
    truck_id: usize,
    #[serde(default)]
    departure: Option<Time>,
    #[serde(default)]
    packages: Option<Vec<usize>>,
}

impl TruckPlan {
    /// Creates a plan that departs at the start of day with any waiting package.
    pub fn new(truck_id: usize) -> Self {
        Self {
            truck_id,
            departure: None,
            packages: None,
        }
    }

    /// Sets the planned load and departure time.
    pub fn departing_at(mut self, at: Time) -> Self {
        self.departure = Some(at);
        self
    }

    /// Offers only these packages, in this order.
    pub fn with_packages(mut self, packages: Vec<usize>) -> Self {
        self.packages = Some(packages);
        self
    }

    /// Truck running the trip.
    pub fn truck_id(&self) -> usize {
        self.truck_id
    }

    /// Planned departure, if set.
    pub fn departure(&self) -> Option<Time> {
        self.departure
    }

    /// Explicit package list, if set.
    pub fn packages(&self) -> Option<&[usize]> {
        self.packages.as_deref()
    }
}

/// A corrected delivery address that becomes known during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCorrection {
    pub package_id: usize,
    pub address_id: usize,
    /// Applied to the first truck loading at or after this time.
    pub effective_at: Time,
}

impl AddressCorrection {
    pub fn new(package_id: usize, address_id: usize, effective_at: Time) -> Self {
        Self {
            package_id,
            address_id,
            effective_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;

    #[test]
    fn test_plan_defaults() {
        let plan = TruckPlan::new(1);
        assert_eq!(plan.truck_id(), 1);
        assert_eq!(plan.departure(), None);
        assert_eq!(plan.packages(), None);
    }

    #[test]
    fn test_plan_serde() {
        let plan: TruckPlan =
            serde_json::from_str(r#"{"truck_id": 3, "departure": "10:20:00"}"#).expect("valid");
        assert_eq!(plan.departure(), Some(time(10, 20, 0, 0)));
        assert_eq!(plan.packages(), None);
    }
}
