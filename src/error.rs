//! Error types for input validation and simulation runs.
//!
//! [`DataIntegrityError`] covers malformed input collections and is always
//! raised before any package or truck state changes. [`SimulationError`]
//! covers failures during a run; every variant aborts the run.
//!
//! Rejected load attempts are not errors of this kind: they are reported as
//! [`ConstraintViolation`](crate::policy::ConstraintViolation) values and the
//! run continues.

use jiff::civil::Time;
use thiserror::Error;

use crate::models::PackageStatus;

/// Malformed or incomplete input data. A simulation cannot start with it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataIntegrityError {
    #[error("distance matrix is not square: {rows} rows but row {row} has {len} cells")]
    NonSquareMatrix { rows: usize, row: usize, len: usize },

    #[error("distance ({from}, {to}) is missing in both directions")]
    MissingDistance { from: usize, to: usize },

    #[error("distance ({from}, {to}) is not a non-negative finite number: {value}")]
    InvalidDistance { from: usize, to: usize, value: f64 },

    #[error("distance from address {index} to itself is {value}, expected 0")]
    NonZeroDiagonal { index: usize, value: f64 },

    #[error("distance matrix is asymmetric at ({from}, {to}): {forward} vs {backward}")]
    AsymmetricDistance {
        from: usize,
        to: usize,
        forward: f64,
        backward: f64,
    },

    #[error("{addresses} addresses but the distance matrix covers {size} locations")]
    MatrixSizeMismatch { addresses: usize, size: usize },

    #[error("address at position {position} has id {id}")]
    AddressIdMismatch { position: usize, id: usize },

    #[error("address list is empty, the hub (address 0) is required")]
    MissingHub,

    #[error("package {0} is registered twice")]
    DuplicatePackage(usize),

    #[error("unknown package {0}")]
    UnknownPackage(usize),

    #[error("package {package_id} references unknown address {address_id}")]
    UnknownAddress { package_id: usize, address_id: usize },
}

/// A failure that aborts a simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),

    #[error(
        "routing inconsistency on truck {truck_id}: package {package_id} for address {address_id} was never delivered"
    )]
    RoutingInconsistency {
        truck_id: usize,
        package_id: usize,
        address_id: usize,
    },

    #[error("route planner called with no candidate addresses")]
    EmptyCandidateSet,

    #[error("package {package_id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        package_id: usize,
        from: PackageStatus,
        to: PackageStatus,
    },

    #[error("package {package_id} is assigned to truck {assigned}, not truck {requested}")]
    ReassignedPackage {
        package_id: usize,
        assigned: usize,
        requested: usize,
    },

    #[error("address of package {package_id} cannot be corrected while {status:?}")]
    CorrectionAfterDeparture {
        package_id: usize,
        status: PackageStatus,
    },

    #[error("clock of truck {truck_id} ran past the end of the day after {last}")]
    ClockOverflow {
        truck_id: usize,
        last: Time,
        #[source]
        source: jiff::Error,
    },

    #[error("invalid simulation config: {reason}")]
    InvalidConfig { reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_integrity_converts() {
        let err: SimulationError = DataIntegrityError::UnknownPackage(7).into();
        assert!(matches!(
            err,
            SimulationError::DataIntegrity(DataIntegrityError::UnknownPackage(7))
        ));
        assert_eq!(err.to_string(), "unknown package 7");
    }

    #[test]
    fn test_routing_inconsistency_message() {
        let err = SimulationError::RoutingInconsistency {
            truck_id: 1,
            package_id: 4,
            address_id: 9,
        };
        assert!(err.to_string().contains("package 4"));
        assert!(err.to_string().contains("truck 1"));
    }
}
