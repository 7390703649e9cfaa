//! Genetic algorithm for evolving strings toward a target phrase.
//!
//! A population of random character sequences is improved purely through
//! fitness-proportionate selection, single-point crossover, and per-gene
//! mutation. No knowledge of the target is used beyond the per-position
//! match count.
//!
//! # Key Types
//!
//! - [`Individual`]: A fixed-length gene sequence with its fitness
//! - [`Population`]: Owns one generation and runs the generation step
//! - [`EvolutionConfig`]: Target, mutation rate, population size, seed
//! - [`EvolutionRunner`]: Repeats the step until finished or stopped
//!
//! # Submodules
//!
//! - [`operators`]: Gene alphabet, crossover, and mutation kernels
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Shiffman (2012), *The Nature of Code*, ch. 9 "The Evolution of Code"

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::EvolutionConfig;
pub use population::{GenerationStats, Population, PERFECT_SCORE};
pub use runner::{EvolutionRunner, RunOptions, RunResult};
pub use selection::{MatingPool, POOL_RESOLUTION};
pub use types::Individual;
