//! Tour scoring utilities.

use super::matrix::DistanceMatrix;

/// Total length of the closed tour: consecutive edges plus the edge from
/// the last city back to the first.
///
/// An empty tour has length 0.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{tour_length, DistanceMatrix};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 12.0, 11.0],
///     vec![10.0, 0.0, 8.0, 9.0],
///     vec![12.0, 8.0, 0.0, 7.0],
///     vec![11.0, 9.0, 7.0, 0.0],
/// ])
/// .unwrap();
/// assert!((tour_length(&dm, &[0, 1, 2, 3]) - 36.0).abs() < 1e-10);
/// ```
pub fn tour_length(distances: &DistanceMatrix, tour: &[usize]) -> f64 {
    let (Some(&first), Some(&last)) = (tour.first(), tour.last()) else {
        return 0.0;
    };
    let open: f64 = tour.windows(2).map(|w| distances.get(w[0], w[1])).sum();
    open + distances.get(last, first)
}

/// Returns `true` if `tour` visits every city in `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}
