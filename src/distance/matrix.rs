//! Dense distance matrix.

use serde::{Deserialize, Serialize};

use crate::error::DataIntegrityError;

/// Tolerance used when checking that `d[i][j] == d[j][i]`.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense n×n distance matrix stored in row-major order.
///
/// Indexed by address id. Built either from complete rows or from partially
/// filled rows, in which case every absent cell is mirrored from its
/// transpose.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
///
/// // Lower-triangular export: upper cells are filled by mirroring.
/// let dm = DistanceMatrix::from_partial_rows(vec![
///     vec![Some(0.0)],
///     vec![Some(3.0), Some(0.0)],
///     vec![Some(5.0), Some(2.0), Some(0.0)],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 2), 5.0);
/// assert_eq!(dm.get(2, 0), 5.0);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a validated matrix from complete rows.
    ///
    /// Fails if the rows are not square, or if the result is not a valid
    /// symmetric distance matrix (see [`validate`](Self::validate)).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DataIntegrityError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(DataIntegrityError::NonSquareMatrix {
                    rows: size,
                    row: i,
                    len: row.len(),
                });
            }
            data.extend(row);
        }
        let dm = Self { data, size };
        dm.validate()?;
        Ok(dm)
    }

    /// Creates a validated matrix from rows that may be short or contain gaps.
    ///
    /// A cell `(i, j)` that is absent (row too short, or `None`) takes the
    /// value of `(j, i)`. Absent diagonal cells are zero. Fails with
    /// [`DataIntegrityError::MissingDistance`] when both directions are
    /// absent.
    pub fn from_partial_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, DataIntegrityError> {
        let size = rows.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() > size) {
            return Err(DataIntegrityError::NonSquareMatrix {
                rows: size,
                row,
                len: cells.len(),
            });
        }
        let cell = |i: usize, j: usize| rows[i].get(j).copied().flatten();

        let mut dm = Self::new(size);
        for i in 0..size {
            for j in 0..size {
                let value = match cell(i, j).or_else(|| cell(j, i)) {
                    Some(v) => v,
                    None if i == j => 0.0,
                    None => return Err(DataIntegrityError::MissingDistance { from: i, to: j }),
                };
                dm.set(i, j, value);
            }
        }
        dm.validate()?;
        Ok(dm)
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets the distance between `a` and `b` in both directions.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks the routing invariants: every cell is a non-negative finite
    /// number, the diagonal is zero, and the matrix is symmetric.
    pub fn validate(&self) -> Result<(), DataIntegrityError> {
        for i in 0..self.size {
            for j in 0..self.size {
                let value = self.get(i, j);
                if !value.is_finite() || value < 0.0 {
                    return Err(DataIntegrityError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
            let diagonal = self.get(i, i);
            if diagonal != 0.0 {
                return Err(DataIntegrityError::NonZeroDiagonal {
                    index: i,
                    value: diagonal,
                });
            }
        }
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (forward, backward) = (self.get(i, j), self.get(j, i));
                if (forward - backward).abs() > SYMMETRY_TOLERANCE {
                    return Err(DataIntegrityError::AsymmetricDistance {
                        from: i,
                        to: j,
                        forward,
                        backward,
                    });
                }
            }
        }
        Ok(())
    }
}
