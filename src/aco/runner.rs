//! Colony loop execution.
//!
//! # Algorithm
//!
//! 1. Initialize every trail to `initial_pheromone`
//! 2. At each iteration:
//!    a. Every ant builds a tour from the same pheromone snapshot
//!    b. Tour lengths are computed and the global best is updated
//!    c. Evaporation, then deposition for the whole batch
//! 3. Terminate after `max_iterations` (or cancellation)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::AcoConfig;
use super::construct::TourConstructor;
use super::matrix::{DistanceMatrix, PheromoneMatrix};
use super::tour::tour_length;
use super::update::PheromoneUpdater;
use crate::error::Result;

/// Result of an ACO run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best tour found. Empty only if the run was cancelled before the
    /// first iteration.
    pub best_tour: Vec<usize>,

    /// Length of the best tour (closing edge included), `+inf` if none.
    pub best_length: f64,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Iteration (1-based) at which the best tour was found, 0 if none.
    pub best_iteration: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best-so-far length after each completed iteration.
    pub length_history: Vec<f64>,

    /// Shortest tour of each completed iteration.
    pub iteration_best_history: Vec<f64>,
}

/// Executes the Ant Colony Optimization loop.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner, DistanceMatrix};
///
/// let distances = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 12.0, 11.0],
///     vec![10.0, 0.0, 8.0, 9.0],
///     vec![12.0, 8.0, 0.0, 7.0],
///     vec![11.0, 9.0, 7.0, 0.0],
/// ])
/// .unwrap();
/// let config = AcoConfig::default().with_num_ants(5).with_seed(42);
/// let result = AcoRunner::run(&distances, &config).unwrap();
/// assert_eq!(result.best_tour.len(), 4);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony on `distances`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by configuration validation, tour
    /// construction or the pheromone update. Nothing is retried.
    pub fn run(distances: &DistanceMatrix, config: &AcoConfig) -> Result<AcoResult> {
        Self::run_with_cancel(distances, config, None)
    }

    /// Runs the colony with an optional cancellation token.
    ///
    /// The flag is checked before each iteration; when set, the run stops
    /// and returns the best tour found so far.
    pub fn run_with_cancel(
        distances: &DistanceMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult> {
        run_colony(distances, config, cancel).map(|(result, _)| result)
    }

    /// Runs the colony and also returns the final pheromone matrix.
    pub fn run_with_pheromone(
        distances: &DistanceMatrix,
        config: &AcoConfig,
    ) -> Result<(AcoResult, PheromoneMatrix)> {
        run_colony(distances, config, None)
    }
}

/// Solves a TSP instance given as `num_cities` rows of distances.
///
/// Returns the best tour and its length.
///
/// ```
/// use u_aco::aco::{solve, AcoConfig};
///
/// let rows = vec![
///     vec![0.0, 10.0, 12.0, 11.0],
///     vec![10.0, 0.0, 8.0, 9.0],
///     vec![12.0, 8.0, 0.0, 7.0],
///     vec![11.0, 9.0, 7.0, 0.0],
/// ];
/// let (tour, length) = solve(4, rows, &AcoConfig::default().with_seed(1)).unwrap();
/// assert_eq!(tour.len(), 4);
/// assert!((length - 36.0).abs() < 1e-9);
/// ```
pub fn solve(
    num_cities: usize,
    distances: Vec<Vec<f64>>,
    config: &AcoConfig,
) -> Result<(Vec<usize>, f64)> {
    let matrix = DistanceMatrix::from_rows_sized(num_cities, distances)?;
    let result = AcoRunner::run(&matrix, config)?;
    Ok((result.best_tour, result.best_length))
}

fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn run_colony(
    distances: &DistanceMatrix,
    config: &AcoConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<(AcoResult, PheromoneMatrix)> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = create_rng(seed);

    let n = distances.size();
    let mut pheromone = PheromoneMatrix::uniform(n, config.initial_pheromone);
    let updater = PheromoneUpdater::new(config.evaporation_rate, config.q);

    debug!(
        cities = n,
        ants = config.num_ants,
        max_iterations = config.max_iterations,
        seed,
        "starting ant colony"
    );

    let mut best_tour = Vec::new();
    let mut best_length = f64::INFINITY;
    let mut best_iteration = 0usize;
    let mut iterations = 0usize;
    let mut cancelled = false;
    let mut length_history = Vec::with_capacity(config.max_iterations);
    let mut iteration_best_history = Vec::with_capacity(config.max_iterations);

    for iter in 1..=config.max_iterations {
        if let Some(ref flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }

        // Per-ant streams drawn in ant order keep the batch independent of
        // how construction is scheduled.
        let ant_seeds: Vec<u64> = (0..config.num_ants).map(|_| rng.random()).collect();

        let tours = {
            let constructor =
                TourConstructor::new(distances, &pheromone, config.alpha, config.beta)?;
            construct_batch(&constructor, &ant_seeds, config.parallel)?
        };
        let lengths: Vec<f64> = tours.iter().map(|t| tour_length(distances, t)).collect();

        let mut iteration_best = f64::INFINITY;
        for (tour, &length) in tours.iter().zip(&lengths) {
            iteration_best = iteration_best.min(length);
            if length < best_length {
                best_length = length;
                best_tour.clone_from(tour);
                best_iteration = iter;
                debug!(iteration = iter, length, "new best tour");
            }
        }

        updater.update(&mut pheromone, &tours, &lengths)?;

        trace!(iteration = iter, iteration_best, best_length, "iteration complete");
        length_history.push(best_length);
        iteration_best_history.push(iteration_best);
        iterations = iter;
    }

    debug!(iterations, best_length, cancelled, "ant colony finished");

    let result = AcoResult {
        best_tour,
        best_length,
        iterations,
        best_iteration,
        cancelled,
        length_history,
        iteration_best_history,
    };
    Ok((result, pheromone))
}

/// Builds one tour per seed. Fails on the first ant that fails.
fn construct_batch(
    constructor: &TourConstructor<'_>,
    seeds: &[u64],
    parallel: bool,
) -> Result<Vec<Vec<usize>>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return seeds
                .par_iter()
                .map(|&seed| constructor.construct(&mut create_rng(seed)))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    seeds
        .iter()
        .map(|&seed| constructor.construct(&mut create_rng(seed)))
        .collect()
}
