//! Pheromone evaporation and deposition.

use super::matrix::PheromoneMatrix;
use super::tour::is_permutation;
use crate::error::{AcoError, Result};

/// Applies one iteration's pheromone update.
///
/// 1. Evaporation: every trail is scaled by `1 - evaporation_rate`.
/// 2. Deposition: each tour adds `q / length` to both directions of every
///    edge it uses, closing edge included.
///
/// All tours and lengths are checked before the matrix is touched, so on
/// error the pheromone state is left exactly as it was.
#[derive(Debug, Clone, Copy)]
pub struct PheromoneUpdater {
    evaporation_rate: f64,
    q: f64,
}

impl PheromoneUpdater {
    pub fn new(evaporation_rate: f64, q: f64) -> Self {
        Self {
            evaporation_rate,
            q,
        }
    }

    /// Evaporates, then deposits for every `(tour, length)` pair.
    ///
    /// # Errors
    ///
    /// - [`AcoError::InvalidState`] if `tours` and `lengths` differ in size,
    ///   or a tour is not a permutation of the matrix's cities.
    /// - [`AcoError::DivideByZero`] if any length is not strictly positive.
    pub fn update(
        &self,
        pheromone: &mut PheromoneMatrix,
        tours: &[Vec<usize>],
        lengths: &[f64],
    ) -> Result<()> {
        if tours.len() != lengths.len() {
            return Err(AcoError::InvalidState {
                message: format!(
                    "{} tours but {} tour lengths in pheromone update",
                    tours.len(),
                    lengths.len()
                ),
            });
        }
        let n = pheromone.size();
        if let Some((ant, tour)) = tours
            .iter()
            .enumerate()
            .find(|(_, tour)| !is_permutation(tour, n))
        {
            return Err(AcoError::InvalidState {
                message: format!("tour of ant {ant} is not a permutation of {n} cities: {tour:?}"),
            });
        }
        if let Some((ant, &length)) = lengths
            .iter()
            .enumerate()
            .find(|&(_, &l)| l.is_nan() || l <= 0.0)
        {
            return Err(AcoError::DivideByZero { ant, length });
        }

        pheromone.scale(1.0 - self.evaporation_rate);

        for (tour, &length) in tours.iter().zip(lengths) {
            let contribution = self.q / length;
            for edge in tour.windows(2) {
                pheromone.reinforce(edge[0], edge[1], contribution);
            }
            if let (Some(&first), Some(&last)) = (tour.first(), tour.last()) {
                pheromone.reinforce(last, first, contribution);
            }
        }

        Ok(())
    }
}
