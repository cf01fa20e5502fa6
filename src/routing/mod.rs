//! Route planning for a single truck.
//!
//! - [`next_stop`] — greedy nearest-neighbor choice, ties to the smallest id
//! - [`sorted_by_distance`] — the same ordering over all candidates
//! - [`nearest_neighbor_tour`] — a whole trip built from repeated `next_stop`

mod nearest_neighbor;

pub use nearest_neighbor::{nearest_neighbor_tour, next_stop, sorted_by_distance};
