//! Run-wide simulation settings.

use jiff::civil::{time, Time};
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Settings shared by every truck in a run.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::simulation::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_truck_capacity(2)
///     .with_start_of_day(time(9, 0, 0, 0))
///     .with_drivers(1);
///
/// assert_eq!(config.average_speed_mph(), 18.0);
/// assert_eq!(config.truck_capacity(), 2);
/// assert_eq!(config.drivers(), Some(1));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    average_speed_mph: f64,
    truck_capacity: usize,
    start_of_day: Time,
    drivers: Option<usize>,
}

impl Default for SimulationConfig {
    /// 18 mph, 16 packages per truck, 08:00 start, no driver limit.
    fn default() -> Self {
        Self {
            average_speed_mph: 18.0,
            truck_capacity: 16,
            start_of_day: time(8, 0, 0, 0),
            drivers: None,
        }
    }
}

impl SimulationConfig {
    /// Sets the constant truck speed in miles per hour.
    pub fn with_average_speed(mut self, mph: f64) -> Self {
        self.average_speed_mph = mph;
        self
    }

    /// Sets the manifest capacity of trucks created by the simulator.
    pub fn with_truck_capacity(mut self, capacity: usize) -> Self {
        self.truck_capacity = capacity;
        self
    }

    /// Sets the departure time for plans without one.
    pub fn with_start_of_day(mut self, start: Time) -> Self {
        self.start_of_day = start;
        self
    }

    /// Limits the number of trucks on the road at once.
    pub fn with_drivers(mut self, drivers: usize) -> Self {
        self.drivers = Some(drivers);
        self
    }

    /// Constant truck speed in miles per hour.
    pub fn average_speed_mph(&self) -> f64 {
        self.average_speed_mph
    }

    /// Manifest capacity of trucks created by the simulator.
    pub fn truck_capacity(&self) -> usize {
        self.truck_capacity
    }

    /// Default departure time.
    pub fn start_of_day(&self) -> Time {
        self.start_of_day
    }

    /// Number of drivers, `None` for unlimited.
    pub fn drivers(&self) -> Option<usize> {
        self.drivers
    }

    /// Checks the settings before a run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.average_speed_mph.is_finite() || self.average_speed_mph <= 0.0 {
            return Err(SimulationError::InvalidConfig {
                reason: "average speed must be a positive finite number",
            });
        }
        if self.truck_capacity == 0 {
            return Err(SimulationError::InvalidConfig {
                reason: "truck capacity must be at least 1",
            });
        }
        if self.drivers == Some(0) {
            return Err(SimulationError::InvalidConfig {
                reason: "at least one driver is required",
            });
        }
        Ok(())
    }

    /// Time needed to drive `distance` miles.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::SignedDuration;
    /// use u_delivery::simulation::SimulationConfig;
    ///
    /// let config = SimulationConfig::default();
    /// let t = config.travel_time(9.0).unwrap();
    /// assert_eq!(t, SignedDuration::from_mins(30));
    /// ```
    pub fn travel_time(&self, distance: f64) -> Result<SignedDuration, jiff::Error> {
        SignedDuration::try_from_secs_f64(distance * 3600.0 / self.average_speed_mph)
    }
}
