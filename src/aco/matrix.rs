//! Dense distance and pheromone matrices.

use crate::error::{AcoError, Result};

/// Lower bound on every pheromone entry.
///
/// Evaporation clamps to this value so that repeated scaling by `1 - rho`
/// never underflows a trail to exactly zero.
pub const MIN_PHEROMONE: f64 = f64::MIN_POSITIVE;

/// An immutable n×n distance matrix stored in row-major order.
///
/// Entries are non-negative and finite, the diagonal is zero. The matrix
/// need not be symmetric.
///
/// # Examples
///
/// ```
/// use u_aco::aco::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from explicit rows.
    ///
    /// Fails with [`AcoError::Config`] if the rows are not square, there are
    /// fewer than two cities, or an entry is negative, non-finite, or a
    /// non-zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AcoError::config(format!(
                    "distance matrix is not square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_data(size, data)
    }

    /// Like [`from_rows`](Self::from_rows), additionally requiring exactly
    /// `num_cities` rows.
    pub fn from_rows_sized(num_cities: usize, rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.len() != num_cities {
            return Err(AcoError::config(format!(
                "distance matrix has {} rows, expected {num_cities}",
                rows.len()
            )));
        }
        Self::from_rows(rows)
    }

    /// Builds a matrix from a flat row-major buffer of `size * size` entries.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size < 2 {
            return Err(AcoError::config(format!(
                "at least 2 cities are required, got {size}"
            )));
        }
        if data.len() != size * size {
            return Err(AcoError::config(format!(
                "distance data has {} entries, expected {}",
                data.len(),
                size * size
            )));
        }
        for (idx, &d) in data.iter().enumerate() {
            let (i, j) = (idx / size, idx % size);
            if !d.is_finite() || d < 0.0 {
                return Err(AcoError::config(format!(
                    "distance ({i}, {j}) must be finite and non-negative, got {d}"
                )));
            }
            if i == j && d != 0.0 {
                return Err(AcoError::config(format!(
                    "diagonal distance ({i}, {i}) must be zero, got {d}"
                )));
            }
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        is_symmetric(&self.data, self.size, tol)
    }
}

/// Mutable n×n trail strengths, row-major.
///
/// Entries start at a uniform positive level and stay strictly positive:
/// evaporation never drops an entry below [`MIN_PHEROMONE`] and deposits
/// are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates a `size`×`size` matrix filled with `level`.
    pub fn uniform(size: usize, level: f64) -> Self {
        Self {
            data: vec![level; size * size],
            size,
        }
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Multiplies every entry by `factor`, flooring at [`MIN_PHEROMONE`].
    pub(crate) fn scale(&mut self, factor: f64) {
        for tau in &mut self.data {
            *tau = (*tau * factor).max(MIN_PHEROMONE);
        }
    }

    /// Adds `amount` to both `(a, b)` and `(b, a)`.
    #[inline]
    pub(crate) fn reinforce(&mut self, a: usize, b: usize, amount: f64) {
        self.data[a * self.size + b] += amount;
        self.data[b * self.size + a] += amount;
    }

    /// Smallest entry in the matrix.
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        is_symmetric(&self.data, self.size, tol)
    }
}

fn is_symmetric(data: &[f64], size: usize, tol: f64) -> bool {
    for i in 0..size {
        for j in (i + 1)..size {
            if (data[i * size + j] - data[j * size + i]).abs() > tol {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![7.0, 0.0]]).unwrap();
        assert_eq!(dm.size(), 2);
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_rejects_non_square() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]);
        assert!(matches!(err, Err(AcoError::Config { .. })));

        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]);
        assert!(matches!(err, Err(AcoError::Config { .. })));
    }

    #[test]
    fn test_rejects_single_city() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_rejects_negative_and_diagonal() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).is_err());
    }

    #[test]
    fn test_from_rows_sized() {
        let rows = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        assert!(DistanceMatrix::from_rows_sized(2, rows.clone()).is_ok());
        assert!(DistanceMatrix::from_rows_sized(3, rows).is_err());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_pheromone_scale_and_reinforce() {
        let mut tau = PheromoneMatrix::uniform(3, 1.0);
        tau.scale(0.5);
        tau.reinforce(0, 2, 0.25);
        assert!((tau.get(0, 2) - 0.75).abs() < 1e-12);
        assert!((tau.get(2, 0) - 0.75).abs() < 1e-12);
        assert!((tau.get(0, 1) - 0.5).abs() < 1e-12);
        assert!((tau.min_value() - 0.5).abs() < 1e-12);
        assert!(tau.is_symmetric(1e-12));
    }

    #[test]
    fn test_pheromone_scale_never_reaches_zero() {
        let mut tau = PheromoneMatrix::uniform(3, 1.0);
        // 0.01^200 is far below the smallest subnormal.
        for _ in 0..200 {
            tau.scale(0.01);
        }
        assert_eq!(tau.min_value(), MIN_PHEROMONE);
        tau.reinforce(0, 1, 0.5);
        assert!((tau.get(1, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_symmetry() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 3.0],
            vec![2.0, 0.0, 4.0],
            vec![3.0, 4.0, 0.0],
        ])
        .unwrap();
        assert!(dm.is_symmetric(1e-12));
    }
}
