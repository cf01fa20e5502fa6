//! Nearest-neighbor stop selection.
//!
//! A truck always drives to the closest address it still has to visit.
//! Ties go to the smallest address id, so the same matrix and candidates
//! always give the same route.
//!
//! # Complexity
//!
//! O(k) per stop for k candidates, O(n²) for a whole trip of n stops.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for routing. Routes are
//! typically 15-25% longer than optimal.

use std::cmp::Ordering;

use crate::distance::DistanceMatrix;
use crate::error::SimulationError;

/// Orders candidates by distance from `from`, then by id.
fn by_distance(distances: &DistanceMatrix, from: usize) -> impl Fn(&usize, &usize) -> Ordering + '_ {
    move |a: &usize, b: &usize| {
        distances
            .get(from, *a)
            .total_cmp(&distances.get(from, *b))
            .then(a.cmp(b))
    }
}

/// Returns the candidate closest to `current`.
///
/// Fails with [`SimulationError::EmptyCandidateSet`] when there are no
/// candidates; callers are expected to check first.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::routing::next_stop;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 5.0],
///     vec![3.0, 0.0, 2.0],
///     vec![5.0, 2.0, 0.0],
/// ])
/// .unwrap();
///
/// assert_eq!(next_stop(0, [1, 2], &dm).unwrap(), 1);
/// assert_eq!(next_stop(1, [2], &dm).unwrap(), 2);
/// assert!(next_stop(0, Vec::<usize>::new(), &dm).is_err());
/// ```
pub fn next_stop(
    current: usize,
    candidates: impl IntoIterator<Item = usize>,
    distances: &DistanceMatrix,
) -> Result<usize, SimulationError> {
    candidates
        .into_iter()
        .min_by(by_distance(distances, current))
        .ok_or(SimulationError::EmptyCandidateSet)
}

/// Returns all candidates ordered nearest-first from `current`.
///
/// Uses the same ordering as [`next_stop`], so the first element is always
/// the stop `next_stop` would pick. Duplicate ids are dropped.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::routing::sorted_by_distance;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 4.0, 1.0, 4.0],
///     vec![4.0, 0.0, 3.0, 2.0],
///     vec![1.0, 3.0, 0.0, 5.0],
///     vec![4.0, 2.0, 5.0, 0.0],
/// ])
/// .unwrap();
///
/// // 1 and 3 tie at 4.0; the smaller id comes first.
/// assert_eq!(sorted_by_distance(0, [3, 1, 2], &dm), vec![2, 1, 3]);
/// ```
pub fn sorted_by_distance(
    current: usize,
    candidates: impl IntoIterator<Item = usize>,
    distances: &DistanceMatrix,
) -> Vec<usize> {
    let mut sorted: Vec<usize> = candidates.into_iter().collect();
    sorted.sort_by(by_distance(distances, current));
    sorted.dedup();
    sorted
}

/// Builds the full greedy visiting order from `start` over `candidates`.
///
/// The start itself is never part of the tour.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::routing::nearest_neighbor_tour;
///
/// let mut dm = DistanceMatrix::new(4);
/// dm.set_symmetric(0, 1, 1.0);
/// dm.set_symmetric(0, 2, 2.0);
/// dm.set_symmetric(0, 3, 3.0);
/// dm.set_symmetric(1, 2, 1.0);
/// dm.set_symmetric(1, 3, 2.0);
/// dm.set_symmetric(2, 3, 1.0);
///
/// assert_eq!(nearest_neighbor_tour(0, [3, 2, 1], &dm), vec![1, 2, 3]);
/// ```
pub fn nearest_neighbor_tour(
    start: usize,
    candidates: impl IntoIterator<Item = usize>,
    distances: &DistanceMatrix,
) -> Vec<usize> {
    let mut remaining = sorted_by_distance(start, candidates, distances);
    remaining.retain(|&c| c != start);

    let mut tour = Vec::with_capacity(remaining.len());
    let mut current = start;
    while let Ok(next) = next_stop(current, remaining.iter().copied(), distances) {
        remaining.retain(|&c| c != next);
        tour.push(next);
        current = next;
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Addresses on a line at positions 0, 1, 2, 3.
    fn line() -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                dm.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        dm
    }

    #[test]
    fn test_next_stop_nearest() {
        let dm = line();
        assert_eq!(next_stop(0, [3, 2, 1], &dm).expect("non-empty"), 1);
        assert_eq!(next_stop(3, [0, 1], &dm).expect("non-empty"), 1);
    }

    #[test]
    fn test_next_stop_tie_smallest_id() {
        let dm = line();
        // From 2: address 1 and 3 are both 1.0 away.
        assert_eq!(next_stop(2, [3, 1], &dm).expect("non-empty"), 1);
    }

    #[test]
    fn test_next_stop_empty() {
        let dm = line();
        assert!(matches!(
            next_stop(0, Vec::<usize>::new(), &dm),
            Err(SimulationError::EmptyCandidateSet)
        ));
    }

    #[test]
    fn test_sorted_matches_next_stop() {
        let dm = line();
        let sorted = sorted_by_distance(2, [0, 1, 3], &dm);
        assert_eq!(sorted, vec![1, 3, 0]);
        assert_eq!(next_stop(2, [0, 1, 3], &dm).expect("non-empty"), sorted[0]);
    }

    #[test]
    fn test_sorted_dedup() {
        let dm = line();
        assert_eq!(sorted_by_distance(0, [2, 1, 2], &dm), vec![1, 2]);
    }

    #[test]
    fn test_tour_walks_line() {
        let dm = line();
        assert_eq!(nearest_neighbor_tour(0, [3, 1, 2], &dm), vec![1, 2, 3]);
        assert_eq!(nearest_neighbor_tour(3, [0, 1, 2], &dm), vec![2, 1, 0]);
    }

    #[test]
    fn test_tour_skips_start() {
        let dm = line();
        assert_eq!(nearest_neighbor_tour(1, [1, 2], &dm), vec![2]);
        assert!(nearest_neighbor_tour(0, Vec::<usize>::new(), &dm).is_empty());
    }

    fn matrix_strategy() -> impl Strategy<Value = DistanceMatrix> {
        (2usize..8).prop_flat_map(|n| {
            proptest::collection::vec(0u8..10, n * n).prop_map(move |cells| {
                let mut dm = DistanceMatrix::new(n);
                for i in 0..n {
                    for j in (i + 1)..n {
                        dm.set_symmetric(i, j, f64::from(cells[i * n + j]));
                    }
                }
                dm
            })
        })
    }

    proptest! {
        #[test]
        fn prop_next_stop_is_deterministic_and_minimal(
            dm in matrix_strategy(),
            mask in proptest::collection::vec(any::<bool>(), 8),
            from_seed in 0usize..8,
        ) {
            let n = dm.size();
            let from = from_seed % n;
            let candidates: Vec<usize> = (0..n).filter(|&i| mask[i]).collect();
            prop_assume!(!candidates.is_empty());

            let first = next_stop(from, candidates.iter().copied(), &dm).expect("non-empty");
            let mut reversed = candidates.clone();
            reversed.reverse();
            let second = next_stop(from, reversed, &dm).expect("non-empty");
            prop_assert_eq!(first, second);

            for &c in &candidates {
                let (best, other) = (dm.get(from, first), dm.get(from, c));
                prop_assert!(best < other || (best == other && first <= c));
            }
        }
    }
}
