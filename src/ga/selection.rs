//! Fitness-proportionate mating pool.
//!
//! Selection works by repetition rather than a continuous weighted draw:
//! each individual is entered into the pool `floor(fitness / max * 100)`
//! times, then parents are drawn uniformly from the pool. The fittest
//! individual always receives 100 entries; one scoring at or below 1% of
//! the maximum may receive none.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel by replication)
//! - Shiffman (2012), *The Nature of Code*, ch. 9

use super::types::Individual;
use rand::Rng;

/// Entries granted to an individual whose fitness equals the maximum.
pub const POOL_RESOLUTION: usize = 100;

/// A weighted multiset of population indices.
///
/// Built fresh every generation and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatingPool {
    entries: Vec<usize>,
    uniform: bool,
}

impl MatingPool {
    /// Builds the pool for `population`.
    ///
    /// If nobody scores above zero, every index is entered exactly once so
    /// that reproduction still has parents to draw from.
    pub fn build(population: &[Individual]) -> Self {
        let max_fitness = population
            .iter()
            .map(Individual::fitness)
            .fold(0.0_f64, f64::max);

        let mut entries = Vec::new();
        if max_fitness > 0.0 {
            for (idx, ind) in population.iter().enumerate() {
                let copies = copies_for(ind.fitness(), max_fitness);
                entries.extend(std::iter::repeat(idx).take(copies));
            }
        }

        if entries.is_empty() {
            return Self::uniform(population.len());
        }
        Self {
            entries,
            uniform: false,
        }
    }

    /// A pool holding each of `0..n` once.
    pub fn uniform(n: usize) -> Self {
        Self {
            entries: (0..n).collect(),
            uniform: true,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the pool fell back to uniform seeding.
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Number of entries pointing at population index `idx`.
    pub fn count(&self, idx: usize) -> usize {
        self.entries.iter().filter(|&&e| e == idx).count()
    }

    /// Draws one population index uniformly from the pool, with replacement.
    ///
    /// Returns `None` for an empty pool.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[rng.random_range(0..self.entries.len())])
    }
}

/// `floor(fitness / max * 100)`.
fn copies_for(fitness: f64, max_fitness: f64) -> usize {
    let normalized = fitness / max_fitness;
    (normalized * POOL_RESOLUTION as f64).floor() as usize
}
