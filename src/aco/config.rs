//! ACO configuration.
//!
//! [`AcoConfig`] holds every parameter that controls the colony loop.

use crate::error::{AcoError, Result};

/// Configuration for the Ant Colony Optimization loop.
///
/// # Defaults
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 10);
/// assert_eq!(config.max_iterations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(5)
///     .with_max_iterations(100)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_evaporation_rate(0.5)
///     .with_q(100.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants (tours) built per iteration.
    pub num_ants: usize,

    /// Number of construct-then-update iterations.
    pub max_iterations: usize,

    /// Exponent applied to the pheromone trail in the desirability score.
    pub alpha: f64,

    /// Exponent applied to the inverse distance in the desirability score.
    pub beta: f64,

    /// Evaporation rate ρ in (0, 1). Every trail is scaled by `1 - ρ`
    /// once per iteration.
    pub evaporation_rate: f64,

    /// Deposition constant. A tour of length `L` deposits `q / L` on each
    /// of its edges.
    pub q: f64,

    /// Uniform trail level the pheromone matrix starts from.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Whether to build the ants' tours in parallel using rayon.
    ///
    /// Ignored unless the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 10,
            max_iterations: 100,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.5,
            q: 100.0,
            initial_pheromone: 1.0,
            seed: None,
            parallel: false,
        }
    }
}

impl AcoConfig {
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Zero ants or zero iterations are rejected rather than producing an
    /// empty tour.
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(AcoError::config("num_ants must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(AcoError::config("max_iterations must be at least 1"));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(AcoError::config(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(AcoError::config(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        let rate = self.evaporation_rate;
        if rate.is_nan() || rate <= 0.0 || rate >= 1.0 {
            return Err(AcoError::config(format!(
                "evaporation_rate must be in (0, 1), got {rate}"
            )));
        }
        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(AcoError::config(format!(
                "q must be positive, got {}",
                self.q
            )));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(AcoError::config(format!(
                "initial_pheromone must be positive, got {}",
                self.initial_pheromone
            )));
        }
        Ok(())
    }
}
