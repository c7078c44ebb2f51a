//! Ant Colony Optimization (ACO) for the Traveling Salesman Problem.
//!
//! A colony of ants repeatedly builds tours guided by pheromone trails and
//! inverse distance. After each generation the trails evaporate and every
//! tour deposits pheromone in proportion to its quality, so short edges
//! accumulate reinforcement over time.
//!
//! # Key Types
//!
//! - [`DistanceMatrix`]: Immutable input costs
//! - [`PheromoneMatrix`]: Trail strengths evolved by the colony
//! - [`TourConstructor`]: Builds one tour by roulette-wheel selection
//! - [`PheromoneUpdater`]: Evaporation followed by deposition
//! - [`AcoConfig`]: Algorithm parameters
//! - [`AcoRunner`]: Executes the colony loop
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod construct;
mod matrix;
mod runner;
mod tour;
mod update;

pub use config::AcoConfig;
pub use construct::{roulette_select, TourConstructor};
pub use matrix::{DistanceMatrix, PheromoneMatrix, MIN_PHEROMONE};
pub use runner::{solve, AcoResult, AcoRunner};
pub use tour::{is_permutation, tour_length};
pub use update::PheromoneUpdater;
