//! Distances between delivery addresses.
//!
//! Provides a dense distance matrix and the validated address map
//! (`Geography`) a simulation runs on.

mod geography;
mod matrix;

pub use geography::Geography;
pub use matrix::DistanceMatrix;
