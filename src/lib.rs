//! Evolve random strings toward a target phrase with a genetic algorithm.
//!
//! The engine knows nothing about the target other than how many positions
//! of a candidate match it. Starting from random character sequences, each
//! generation:
//!
//! 1. builds a mating pool where fitter individuals appear more often,
//! 2. breeds a full replacement generation by crossover and mutation,
//! 3. rescores every child, and
//! 4. records the best match, finishing once it equals the target.
//!
//! # Architecture
//!
//! The core is synchronous and single-threaded. [`ga::Population`] exposes a
//! single [`step`](ga::Population::step) plus read-only queries; deciding
//! when to call it belongs to the caller, either directly or through
//! [`ga::EvolutionRunner`].
//!
//! ```
//! use string_evolution::ga::{EvolutionConfig, EvolutionRunner, Population, RunOptions};
//!
//! let config = EvolutionConfig::new("AB").with_population_size(100).with_seed(1);
//! let mut population = Population::from_config(&config)?;
//! let result = EvolutionRunner::run_to_completion(
//!     &mut population,
//!     &RunOptions::default().with_max_generations(10_000),
//! )?;
//! assert!(result.finished || result.capped);
//! # Ok::<(), string_evolution::EvolutionError>(())
//! ```

mod error;
pub mod ga;
pub mod random;

pub use error::{EvolutionError, Result};
