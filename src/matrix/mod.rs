//! Symmetric distance matrix and tour evaluation.
//!
//! [`DistanceMatrix`] is the only problem data the GA engine needs. It is
//! built once (usually by [`loading`]) and borrowed read-only for the whole
//! run.
//!
//! # Invariants
//!
//! - square: `size × size` entries
//! - symmetric: `get(i, j) == get(j, i)`
//! - zero diagonal
//! - `size × max_entry` fits in `u64`, so no permutation's length overflows

pub mod loading;

use crate::error::{TspError, TspResult};

/// Dense, row-major, symmetric matrix of non-negative integer distances.
///
/// # Examples
///
/// ```
/// use u_tsp::matrix::DistanceMatrix;
///
/// let m = DistanceMatrix::from_lower_triangular(vec![
///     vec![0],
///     vec![10, 0],
///     vec![15, 35, 0],
/// ]).unwrap();
/// assert_eq!(m.size(), 3);
/// assert_eq!(m.get(0, 2), 15);
/// assert_eq!(m.get(2, 0), 15);
/// assert_eq!(m.tour_length(&[0, 1, 2]), 10 + 35 + 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<u64>,
}

impl DistanceMatrix {
    /// Builds a matrix from the lower triangle, diagonal included.
    ///
    /// Row `i` must hold exactly `i + 1` entries (columns `0..=i`). The
    /// upper half is filled in by mirroring, so the result is symmetric by
    /// construction. The diagonal entries are ignored and stored as zero.
    ///
    /// Rejects matrices whose tour lengths could overflow `u64`.
    pub fn from_lower_triangular(rows: Vec<Vec<u64>>) -> TspResult<Self> {
        let size = rows.len();
        let mut data = vec![0u64; size * size];

        for (i, row) in rows.iter().enumerate() {
            if row.len() != i + 1 {
                return Err(TspError::MalformedMatrix(format!(
                    "row {i} has {} entries, expected {}",
                    row.len(),
                    i + 1
                )));
            }
            for (j, &d) in row[..i].iter().enumerate() {
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }

        check_length_bound(size, &data)?;
        Ok(Self { size, data })
    }

    /// Builds a matrix from full square rows.
    ///
    /// Rejects non-square input, asymmetric entries, a non-zero diagonal,
    /// and entries large enough for a tour length to overflow `u64`.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> TspResult<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(TspError::MalformedMatrix(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            if row[i] != 0 {
                return Err(TspError::MalformedMatrix(format!(
                    "diagonal entry ({i}, {i}) is {}, expected 0",
                    row[i]
                )));
            }
            data.extend_from_slice(row);
        }

        for i in 0..size {
            for j in (i + 1)..size {
                if data[i * size + j] != data[j * size + i] {
                    return Err(TspError::MalformedMatrix(format!(
                        "entry ({i}, {j}) = {} differs from ({j}, {i}) = {}",
                        data[i * size + j],
                        data[j * size + i]
                    )));
                }
            }
        }

        check_length_bound(size, &data)?;
        Ok(Self { size, data })
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between nodes `from` and `to`.
    ///
    /// # Panics
    /// Panics if either index is `>= size()`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    /// Total length of the closed tour visiting `tour` in order.
    ///
    /// Sums `get(tour[k], tour[(k + 1) % len])` over all positions, so the
    /// last node connects back to the first. Tours of length 0 or 1 have
    /// length 0. Permutations of the nodes never overflow; longer slices
    /// with repeated nodes saturate at `u64::MAX`.
    ///
    /// # Complexity
    /// O(len)
    pub fn tour_length(&self, tour: &[usize]) -> u64 {
        if tour.len() < 2 {
            return 0;
        }
        let closing = self.get(tour[tour.len() - 1], tour[0]);
        tour.windows(2)
            .map(|w| self.get(w[0], w[1]))
            .fold(closing, u64::saturating_add)
    }
}

/// A closed tour has `size` edges, each at most the largest entry.
fn check_length_bound(size: usize, data: &[u64]) -> TspResult<()> {
    let max = data.iter().copied().max().unwrap_or(0);
    if max.checked_mul(size as u64).is_none() {
        return Err(TspError::MalformedMatrix(format!(
            "largest distance {max} times {size} nodes overflows a tour length"
        )));
    }
    Ok(())
}
