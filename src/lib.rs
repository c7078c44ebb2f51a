//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Given an N×N distance matrix, the [`aco`] module searches for a short
//! closed tour visiting every city exactly once:
//!
//! - **Tour construction**: each ant picks its next city with probability
//!   proportional to `pheromone^alpha * (1 / distance)^beta`.
//! - **Pheromone update**: uniform evaporation, then deposition of
//!   `q / length` on every edge of every tour.
//! - **Colony loop**: generations of ants share one pheromone snapshot,
//!   with the best tour tracked across the whole run.
//!
//! All failures surface as [`AcoError`] values; nothing is retried.
//!
//! # Features
//!
//! - `parallel`: build the ants' tours on rayon's thread pool
//! - `serde`: `Serialize`/`Deserialize` for [`aco::AcoConfig`] and
//!   [`aco::AcoResult`]

pub mod aco;
pub mod error;

pub use error::{AcoError, Result};
