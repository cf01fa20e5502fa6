//! Result of a simulation run.

use std::collections::BTreeMap;

use jiff::civil::Time;

use super::plan::AddressCorrection;
use crate::models::Truck;
use crate::policy::ConstraintViolation;

/// Final truck states plus everything the run recorded along the way.
///
/// Package state stays in the registry passed to
/// [`DeliverySimulator::run`](super::DeliverySimulator::run).
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    trucks: BTreeMap<usize, Truck>,
    rejections: Vec<ConstraintViolation>,
    applied_corrections: Vec<AddressCorrection>,
}

impl SimulationOutcome {
    pub(crate) fn new(
        trucks: BTreeMap<usize, Truck>,
        rejections: Vec<ConstraintViolation>,
        applied_corrections: Vec<AddressCorrection>,
    ) -> Self {
        Self {
            trucks,
            rejections,
            applied_corrections,
        }
    }

    /// Sum of all truck odometers.
    pub fn total_mileage(&self) -> f64 {
        self.trucks.values().map(Truck::odometer).sum()
    }

    /// Total distance driven by all trucks by `time`.
    pub fn mileage_at(&self, time: Time) -> f64 {
        self.trucks.values().map(|t| t.mileage_at(time)).sum()
    }

    /// Manifest of a truck's last trip.
    pub fn manifest_of(&self, truck_id: usize) -> Option<&[usize]> {
        self.trucks.get(&truck_id).map(Truck::manifest)
    }

    pub fn truck(&self, truck_id: usize) -> Option<&Truck> {
        self.trucks.get(&truck_id)
    }

    /// Trucks in id order.
    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    /// Every rejected load attempt, in the order it happened.
    pub fn rejections(&self) -> &[ConstraintViolation] {
        &self.rejections
    }

    /// Rejections of one package.
    pub fn rejections_for(&self, package_id: usize) -> impl Iterator<Item = &ConstraintViolation> {
        self.rejections
            .iter()
            .filter(move |v| v.package_id == package_id)
    }

    /// Corrections applied during the run, in the order applied.
    pub fn applied_corrections(&self) -> &[AddressCorrection] {
        &self.applied_corrections
    }

    /// Time the last truck got back to the hub.
    pub fn finish_time(&self) -> Option<Time> {
        self.trucks.values().filter_map(Truck::return_time).max()
    }
}
