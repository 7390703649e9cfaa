//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds the three user-facing parameters of a run
//! (target, mutation rate, population size) plus an optional seed.

use crate::error::{EvolutionError, Result};

/// Configuration for a string-evolution run.
///
/// # Defaults
///
/// ```
/// use string_evolution::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.target, "Random sequence to evolve towards");
/// assert_eq!(config.population_size, 500);
/// assert!((config.mutation_rate - 0.01).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use string_evolution::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::new("To be or not to be")
///     .with_population_size(200)
///     .with_mutation_percent(2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// The phrase the population evolves toward.
    ///
    /// Characters outside `{' '} ∪ ['A', 'y']` can never be produced, so a
    /// target containing them never finishes.
    pub target: String,

    /// Probability that any single gene is redrawn during reproduction.
    pub mutation_rate: f64,

    /// Number of individuals per generation.
    ///
    /// Typical range: 100–1000.
    pub population_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            target: "Random sequence to evolve towards".to_string(),
            mutation_rate: 0.01,
            population_size: 500,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Default configuration with a different target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Sets the target phrase.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets the mutation rate as a fraction in `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the mutation rate from a percentage in `[0, 100]`.
    pub fn with_mutation_percent(self, percent: f64) -> Self {
        self.with_mutation_rate(percent / 100.0)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of genes per individual.
    pub fn gene_count(&self) -> usize {
        self.target.chars().count()
    }

    /// Validates the configuration.
    ///
    /// Rates are not clamped by the builders; out-of-range values are
    /// reported here instead.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolutionError::InvalidConfiguration(
                "population_size must be at least 1".into(),
            ));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::InvalidConfiguration(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.target.is_empty() {
            return Err(EvolutionError::InvalidConfiguration(
                "target must not be empty".into(),
            ));
        }
        Ok(())
    }
}
