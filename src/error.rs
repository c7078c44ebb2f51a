//! Error types for ant colony runs.
//!
//! Every failure is terminal: the colony loop never retries and never
//! returns a partially built tour.

use thiserror::Error;

/// Result type alias for ACO operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors raised while configuring or running the colony.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// Invalid configuration parameter or distance matrix.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the rejected value.
        message: String,
    },

    /// Roulette-wheel selection could not pick a next city.
    ///
    /// Signals degenerate scores (all zero, infinite or NaN), typically
    /// caused by zero off-diagonal distances.
    #[error("no next city could be selected from city {from} ({visited} cities visited)")]
    SelectionFailure {
        /// City the ant was standing on.
        from: usize,
        /// Number of cities already in the partial tour.
        visited: usize,
    },

    /// A tour with non-positive length reached the pheromone update.
    #[error("tour of ant {ant} has non-positive length {length}")]
    DivideByZero {
        /// Index of the offending ant within the iteration batch.
        ant: usize,
        /// The rejected length.
        length: f64,
    },

    /// Inconsistent internal state.
    #[error("invalid state: {message}")]
    InvalidState {
        /// Description of the inconsistency.
        message: String,
    },
}

impl AcoError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        AcoError::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AcoError::config("num_ants must be at least 1");
        assert_eq!(
            err.to_string(),
            "configuration error: num_ants must be at least 1"
        );

        let err = AcoError::SelectionFailure {
            from: 3,
            visited: 2,
        };
        assert!(err.to_string().contains("city 3"));

        let err = AcoError::DivideByZero {
            ant: 1,
            length: 0.0,
        };
        assert!(err.to_string().contains("ant 1"));
    }
}
