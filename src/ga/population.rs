//! The evolving population and its generation step.
//!
//! [`Population`] owns every individual of the current generation and runs
//! one generation at a time:
//! natural selection → reproduction → fitness recomputation → evaluation.
//! It never schedules itself; see [`EvolutionRunner`](super::EvolutionRunner)
//! for a driver loop.

use super::config::EvolutionConfig;
use super::selection::MatingPool;
use super::types::Individual;
use crate::error::{EvolutionError, Result};
use crate::random::rng_from_seed;
use log::{debug, info, warn};
use rand::rngs::StdRng;

/// Fitness of an individual that matches the target exactly.
pub const PERFECT_SCORE: f64 = 1.0;

/// Summary of a population after a generation step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generations completed so far.
    pub generation: usize,
    /// Decoded genes of the fittest individual at the last evaluation.
    pub best: String,
    /// Fitness of that individual.
    pub best_fitness: f64,
    /// Mean fitness over the whole population.
    pub average_fitness: f64,
    /// Whether the target has been matched.
    pub finished: bool,
}

/// A population of candidate phrases evolving toward a fixed target.
///
/// # Usage
///
/// ```
/// use string_evolution::ga::{EvolutionConfig, Population};
///
/// let config = EvolutionConfig::new("AB")
///     .with_population_size(100)
///     .with_seed(7);
/// let mut population = Population::from_config(&config).unwrap();
///
/// for _ in 0..3 {
///     if population.is_finished() {
///         break;
///     }
///     population.step().unwrap();
/// }
/// assert!(population.generations() <= 3);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    target: String,
    target_genes: Vec<char>,
    mutation_rate: f64,
    individuals: Vec<Individual>,
    mating_pool: MatingPool,
    generations: usize,
    best: String,
    best_fitness: f64,
    finished: bool,
    rng: StdRng,
}

impl Population {
    /// Builds a population of `size` random individuals and scores them.
    ///
    /// # Errors
    /// [`EvolutionError::InvalidConfiguration`] if `size` is zero, the
    /// target is empty, or `mutation_rate` lies outside `[0, 1]`.
    pub fn new(target: &str, mutation_rate: f64, size: usize) -> Result<Self> {
        Self::from_config(
            &EvolutionConfig::new(target)
                .with_mutation_rate(mutation_rate)
                .with_population_size(size),
        )
    }

    /// Builds a population from a full configuration, honoring its seed.
    pub fn from_config(config: &EvolutionConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_from_seed(config.seed);
        let target_genes: Vec<char> = config.target.chars().collect();
        let individuals = (0..config.population_size)
            .map(|_| Individual::random(target_genes.len(), &mut rng))
            .collect();

        let mut population = Self {
            target: config.target.clone(),
            target_genes,
            mutation_rate: config.mutation_rate,
            individuals,
            mating_pool: MatingPool::default(),
            generations: 0,
            best: String::new(),
            best_fitness: 0.0,
            finished: false,
            rng,
        };
        population.calc_fitness()?;

        debug!(
            "population created: target={:?}, size={}, mutation_rate={}",
            population.target,
            population.individuals.len(),
            population.mutation_rate
        );
        Ok(population)
    }

    // ---- Generation step ----

    /// Runs one full generation:
    /// [`natural_selection`](Self::natural_selection),
    /// [`generate`](Self::generate), [`calc_fitness`](Self::calc_fitness),
    /// [`evaluate`](Self::evaluate).
    ///
    /// Does not check [`is_finished`](Self::is_finished); stopping is the
    /// caller's decision.
    pub fn step(&mut self) -> Result<()> {
        self.natural_selection();
        self.generate()?;
        self.calc_fitness()?;
        self.evaluate();

        debug!(
            "generation {}: best={:?} ({:.3}), average={:.3}",
            self.generations,
            self.best,
            self.best_fitness,
            self.average_fitness()
        );
        Ok(())
    }

    /// Rescores every individual against the target.
    pub fn calc_fitness(&mut self) -> Result<()> {
        for ind in &mut self.individuals {
            ind.score_against(&self.target_genes)?;
        }
        Ok(())
    }

    /// Rebuilds the mating pool from current fitness values.
    ///
    /// Falls back to a uniform pool when every individual scores zero.
    pub fn natural_selection(&mut self) {
        self.mating_pool = MatingPool::build(&self.individuals);
        if self.mating_pool.is_uniform() {
            warn!(
                "generation {}: no individual scores above zero, seeding mating pool uniformly",
                self.generations
            );
        }
    }

    /// Breeds a full replacement generation from the mating pool.
    ///
    /// Each child comes from two parents drawn independently (the same
    /// parent may be drawn twice), then mutated. The previous generation is
    /// replaced only once every child is built. The pool is consumed, and
    /// the generation counter advances by one.
    ///
    /// An empty pool (no preceding [`natural_selection`](Self::natural_selection))
    /// is treated like a degenerate one: parents are drawn uniformly.
    pub fn generate(&mut self) -> Result<()> {
        let size = self.individuals.len();
        let mut pool = std::mem::take(&mut self.mating_pool);
        if pool.is_empty() {
            pool = MatingPool::uniform(size);
        }

        let mut next = Vec::with_capacity(size);
        for _ in 0..size {
            let (a, b) = match (pool.draw(&mut self.rng), pool.draw(&mut self.rng)) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    return Err(EvolutionError::InvalidConfiguration(
                        "cannot reproduce an empty population".into(),
                    ))
                }
            };
            let mut child = self.individuals[a].crossover(&self.individuals[b], &mut self.rng)?;
            child.mutate(self.mutation_rate, &mut self.rng);
            next.push(child);
        }

        self.individuals = next;
        self.generations += 1;
        Ok(())
    }

    /// Records the fittest individual and checks for a perfect match.
    ///
    /// Ties go to the earliest index. Once finished, the population stays
    /// finished.
    pub fn evaluate(&mut self) {
        let mut best_fitness = 0.0;
        let mut idx = 0;
        for (i, ind) in self.individuals.iter().enumerate() {
            if ind.fitness() > best_fitness {
                idx = i;
                best_fitness = ind.fitness();
            }
        }

        if let Some(best) = self.individuals.get(idx) {
            self.best = best.decode();
        }
        self.best_fitness = best_fitness;

        if best_fitness == PERFECT_SCORE && !self.finished {
            self.finished = true;
            info!(
                "target {:?} matched after {} generations",
                self.target, self.generations
            );
        }
    }

    // ---- Queries ----

    /// Best phrase as of the last [`evaluate`](Self::evaluate); empty before
    /// the first one.
    pub fn best(&self) -> &str {
        &self.best
    }

    /// Fitness of [`best`](Self::best).
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Whether an individual has matched the target.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of completed generations.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Mean fitness of the current individuals.
    pub fn average_fitness(&self) -> f64 {
        let total: f64 = self.individuals.iter().map(Individual::fitness).sum();
        total / self.individuals.len() as f64
    }

    /// Decoded genes of every individual, in population order.
    pub fn all_phrases(&self) -> Vec<String> {
        self.individuals.iter().map(Individual::decode).collect()
    }

    /// The current individuals.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The mating pool built by the last
    /// [`natural_selection`](Self::natural_selection), until
    /// [`generate`](Self::generate) consumes it.
    pub fn mating_pool(&self) -> &MatingPool {
        &self.mating_pool
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Number of individuals per generation.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// Snapshot of the summary values.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            generation: self.generations,
            best: self.best.clone(),
            best_fitness: self.best_fitness,
            average_fitness: self.average_fitness(),
            finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(target: &str, rate: f64, size: usize, seed: u64) -> Population {
        let config = EvolutionConfig::new(target)
            .with_mutation_rate(rate)
            .with_population_size(size)
            .with_seed(seed);
        Population::from_config(&config).unwrap()
    }

    /// Steps until finished or `cap` generations have run.
    fn run_until_finished(pop: &mut Population, cap: usize) -> bool {
        while !pop.is_finished() && pop.generations() < cap {
            pop.step().unwrap();
        }
        pop.is_finished()
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            Population::new("AB", 0.01, 0),
            Err(EvolutionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_mutation_rate() {
        assert!(Population::new("AB", -0.5, 10).is_err());
        assert!(Population::new("AB", 1.01, 10).is_err());
    }

    #[test]
    fn test_new_rejects_empty_target() {
        assert!(Population::new("", 0.01, 10).is_err());
    }

    #[test]
    fn test_initial_state() {
        let pop = seeded("Hello there", 0.01, 40, 42);
        assert_eq!(pop.size(), 40);
        assert_eq!(pop.generations(), 0);
        assert!(!pop.is_finished());
        assert_eq!(pop.best(), "");
        assert_eq!(pop.target(), "Hello there");
        assert!((pop.mutation_rate() - 0.01).abs() < 1e-12);
        for phrase in pop.all_phrases() {
            assert_eq!(phrase.chars().count(), 11);
        }
    }

    #[test]
    fn test_construction_scores_everyone() {
        let pop = seeded("AB", 0.0, 200, 1);
        for ind in pop.individuals() {
            let f = ind.fitness();
            assert!(f == 0.0 || f == 0.5 || f == 1.0, "unexpected fitness {f}");
        }
        let expected =
            pop.individuals().iter().map(|i| i.fitness()).sum::<f64>() / pop.size() as f64;
        assert!((pop.average_fitness() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_generation_counter_increments_once_per_step() {
        let mut pop = seeded("Counting", 0.01, 30, 42);
        for expected in 1..=10 {
            pop.step().unwrap();
            assert_eq!(pop.generations(), expected);
        }
    }

    #[test]
    fn test_size_and_length_preserved_across_steps() {
        let mut pop = seeded("Stable shape", 0.05, 25, 9);
        for _ in 0..20 {
            pop.step().unwrap();
            assert_eq!(pop.size(), 25);
            assert!(pop.individuals().iter().all(|i| i.len() == 12));
            let avg = pop.average_fitness();
            assert!((0.0..=1.0).contains(&avg));
        }
    }

    #[test]
    fn test_evaluate_picks_first_of_ties() {
        let mut pop = seeded("AB", 0.0, 3, 42);
        pop.individuals = vec![
            Individual::from_phrase("Ax"),
            Individual::from_phrase("xB"),
            Individual::from_phrase("xx"),
        ];
        pop.calc_fitness().unwrap();
        pop.evaluate();
        assert_eq!(pop.best(), "Ax");
        assert!((pop.best_fitness() - 0.5).abs() < 1e-12);
        assert!(!pop.is_finished());
    }

    #[test]
    fn test_evaluate_all_zero_reports_first() {
        let mut pop = seeded("AB", 0.0, 2, 42);
        pop.individuals = vec![Individual::from_phrase("xx"), Individual::from_phrase("yy")];
        pop.calc_fitness().unwrap();
        pop.evaluate();
        assert_eq!(pop.best(), "xx");
        assert_eq!(pop.best_fitness(), 0.0);
    }

    #[test]
    fn test_finished_never_resets() {
        let mut pop = seeded("AB", 0.0, 2, 42);
        pop.individuals = vec![Individual::from_phrase("AB"), Individual::from_phrase("xx")];
        pop.calc_fitness().unwrap();
        pop.evaluate();
        assert!(pop.is_finished());
        assert_eq!(pop.best(), "AB");

        pop.individuals = vec![Individual::from_phrase("xx"), Individual::from_phrase("yy")];
        pop.calc_fitness().unwrap();
        pop.evaluate();
        assert!(pop.is_finished());
    }

    #[test]
    fn test_natural_selection_weights() {
        let mut pop = seeded("AB", 0.0, 3, 42);
        pop.individuals = vec![
            Individual::from_phrase("AB"),
            Individual::from_phrase("Ax"),
            Individual::from_phrase("xx"),
        ];
        pop.calc_fitness().unwrap();
        pop.natural_selection();
        assert_eq!(pop.mating_pool().count(0), 100);
        assert_eq!(pop.mating_pool().count(1), 50);
        assert_eq!(pop.mating_pool().count(2), 0);
    }

    #[test]
    fn test_degenerate_pool_still_reproduces() {
        let mut pop = seeded("AB", 0.0, 4, 42);
        pop.individuals = vec![Individual::from_phrase("xx"); 4];
        pop.calc_fitness().unwrap();
        pop.natural_selection();
        assert!(pop.mating_pool().is_uniform());

        pop.generate().unwrap();
        assert_eq!(pop.generations(), 1);
        // zero mutation and identical parents: children are clones
        assert!(pop.all_phrases().iter().all(|p| p == "xx"));
    }

    #[test]
    fn test_generate_consumes_pool() {
        let mut pop = seeded("AB", 0.01, 10, 42);
        pop.natural_selection();
        assert!(!pop.mating_pool().is_empty());
        pop.generate().unwrap();
        assert!(pop.mating_pool().is_empty());
    }

    #[test]
    fn test_generate_without_selection_uses_uniform_parents() {
        let mut pop = seeded("AB", 0.01, 10, 42);
        pop.generate().unwrap();
        assert_eq!(pop.size(), 10);
        assert_eq!(pop.generations(), 1);
    }

    #[test]
    fn test_children_are_built_from_pool_members() {
        // With zero mutation, only the two weighted parents can contribute genes.
        let mut pop = seeded("ABCD", 0.0, 3, 42);
        pop.individuals = vec![
            Individual::from_phrase("ABzz"),
            Individual::from_phrase("zzCD"),
            Individual::from_phrase("zzzz"),
        ];
        pop.calc_fitness().unwrap();
        pop.natural_selection();
        pop.generate().unwrap();
        for phrase in pop.all_phrases() {
            for (i, c) in phrase.chars().enumerate() {
                let allowed = ["ABzz", "zzCD"].map(|p| p.chars().nth(i).unwrap());
                assert!(allowed.contains(&c), "gene {c:?} at {i} in {phrase:?}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = seeded("Determinism", 0.02, 50, 1234);
        let mut b = seeded("Determinism", 0.02, 50, 1234);
        for _ in 0..10 {
            a.step().unwrap();
            b.step().unwrap();
        }
        assert_eq!(a.all_phrases(), b.all_phrases());
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_short_target_converges() {
        let finished = (0..10)
            .filter(|&seed| {
                let mut pop = seeded("AB", 0.01, 50, seed);
                run_until_finished(&mut pop, 5_000)
            })
            .count();
        assert!(finished >= 9, "only {finished}/10 runs matched \"AB\"");
    }

    #[test]
    fn test_zero_mutation_end_to_end() {
        let mut finished = 0;
        for seed in 0..20 {
            let mut pop = seeded("AB", 0.0, 200, seed);
            let avg = pop.average_fitness();
            assert!((0.0..=1.0).contains(&avg));
            if run_until_finished(&mut pop, 1_000) {
                assert_eq!(pop.best(), "AB");
                assert_eq!(pop.best_fitness(), PERFECT_SCORE);
                finished += 1;
            }
        }
        assert!(finished >= 14, "only {finished}/20 runs matched without mutation");
    }

    #[test]
    fn test_average_fitness_improves() {
        let mut initial = 0.0;
        let mut later = 0.0;
        for seed in 0..5 {
            let mut pop = seeded("HELLO WORLD", 0.01, 200, seed);
            initial += pop.average_fitness();
            for _ in 0..50 {
                if pop.is_finished() {
                    break;
                }
                pop.step().unwrap();
            }
            later += pop.average_fitness();
        }
        assert!(
            later > initial * 3.0,
            "average fitness did not improve: {initial} -> {later}"
        );
    }

    #[test]
    fn test_unreachable_target_never_finishes() {
        let mut pop = seeded("1234", 0.05, 50, 42);
        for _ in 0..50 {
            pop.step().unwrap();
        }
        assert!(!pop.is_finished());
        assert_eq!(pop.best_fitness(), 0.0);
        assert_eq!(pop.generations(), 50);
    }

    #[test]
    fn test_target_with_z_never_finishes() {
        let mut pop = seeded("Az", 0.05, 100, 42);
        for _ in 0..200 {
            pop.step().unwrap();
            assert!(pop.best_fitness() <= 0.5);
        }
        assert!(!pop.is_finished());
        assert!(pop.all_phrases().iter().all(|p| !p.contains('z')));
    }

    #[test]
    fn test_stats_snapshot() {
        let mut pop = seeded("AB", 0.01, 20, 42);
        pop.step().unwrap();
        let stats = pop.stats();
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.best, pop.best());
        assert_eq!(stats.finished, pop.is_finished());
        assert!((stats.average_fitness - pop.average_fitness()).abs() < 1e-12);
    }
}
