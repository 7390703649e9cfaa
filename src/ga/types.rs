//! The candidate solution type.
//!
//! An [`Individual`] is a fixed-length sequence of characters together with
//! its most recent fitness score against a target.

use super::operators::{random_genes, single_point_crossover, uniform_mutation};
use crate::error::{EvolutionError, Result};
use rand::Rng;

/// A candidate solution: a fixed-length gene sequence and its fitness.
///
/// Fitness is derived, never set directly. It is `0.0` on creation and is
/// recomputed by [`score_against`](Individual::score_against).
///
/// # Examples
///
/// ```
/// use string_evolution::ga::Individual;
///
/// let mut ind = Individual::from_phrase("HELLO");
/// ind.score_against(&"HELxO".chars().collect::<Vec<_>>()).unwrap();
/// assert!((ind.fitness() - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<char>,
    fitness: f64,
}

impl Individual {
    /// Creates an individual with `len` random genes.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::from_genes(random_genes(len, rng))
    }

    /// Creates an individual from explicit genes, with fitness `0.0`.
    pub fn from_genes(genes: Vec<char>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// Creates an individual whose genes spell `phrase`.
    pub fn from_phrase(phrase: &str) -> Self {
        Self::from_genes(phrase.chars().collect())
    }

    /// The gene sequence.
    pub fn genes(&self) -> &[char] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the individual has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Fitness from the last call to [`score_against`](Self::score_against).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns the genes as a string.
    pub fn decode(&self) -> String {
        self.genes.iter().collect()
    }

    /// Scores this individual against `target`.
    ///
    /// Fitness becomes the fraction of positions where the gene equals the
    /// target character, so it always lies in `[0, 1]` and is exactly `1.0`
    /// only for a full match. An empty target scores `0.0`.
    ///
    /// # Errors
    /// [`EvolutionError::InvalidLength`] if `target` and the genes differ in
    /// length. Fitness is left untouched in that case.
    pub fn score_against(&mut self, target: &[char]) -> Result<()> {
        self.check_len(target.len())?;
        if target.is_empty() {
            self.fitness = 0.0;
            return Ok(());
        }
        let matches = self
            .genes
            .iter()
            .zip(target)
            .filter(|(gene, wanted)| gene == wanted)
            .count();
        self.fitness = matches as f64 / target.len() as f64;
        Ok(())
    }

    /// Produces a child by single-point crossover with `partner`.
    ///
    /// `self` acts as the first parent: genes after the pivot come from
    /// `self`, genes up to and including the pivot come from `partner`.
    /// Neither parent is modified. `partner` may be `self`.
    ///
    /// # Errors
    /// [`EvolutionError::InvalidLength`] if the parents differ in length.
    pub fn crossover<R: Rng>(&self, partner: &Individual, rng: &mut R) -> Result<Individual> {
        self.check_len(partner.len())?;
        Ok(Self::from_genes(single_point_crossover(
            &self.genes,
            &partner.genes,
            rng,
        )))
    }

    /// Redraws each gene independently with probability `rate`.
    ///
    /// Length is preserved. Fitness is not recomputed.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        uniform_mutation(&mut self.genes, rate, rng);
    }

    fn check_len(&self, other: usize) -> Result<()> {
        if other != self.genes.len() {
            return Err(EvolutionError::InvalidLength {
                expected: self.genes.len(),
                actual: other,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::is_drawable;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_random_has_length_and_zero_fitness() {
        let mut rng = create_rng(42);
        let ind = Individual::random(33, &mut rng);
        assert_eq!(ind.len(), 33);
        assert_eq!(ind.decode().chars().count(), 33);
        assert_eq!(ind.fitness(), 0.0);
        assert!(ind.genes().iter().all(|&c| is_drawable(c)));
    }

    #[test]
    fn test_decode_is_pure() {
        let ind = Individual::from_phrase("To be or not");
        assert_eq!(ind.decode(), "To be or not");
        assert_eq!(ind.decode(), "To be or not");
    }

    #[test]
    fn test_score_counts_matching_positions() {
        let mut ind = Individual::from_phrase("abcd");
        ind.score_against(&chars("abzz")).unwrap();
        assert!((ind.fitness() - 0.5).abs() < 1e-12);

        ind.score_against(&chars("zzzz")).unwrap();
        assert_eq!(ind.fitness(), 0.0);

        ind.score_against(&chars("abcd")).unwrap();
        assert_eq!(ind.fitness(), 1.0);
    }

    #[test]
    fn test_score_length_mismatch() {
        let mut ind = Individual::from_phrase("abc");
        ind.score_against(&chars("abc")).unwrap();
        let err = ind.score_against(&chars("abcd")).unwrap_err();
        assert_eq!(
            err,
            EvolutionError::InvalidLength {
                expected: 3,
                actual: 4
            }
        );
        // fitness from the previous valid scoring survives
        assert_eq!(ind.fitness(), 1.0);
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let mut rng = create_rng(42);
        let a = Individual::from_phrase("abc");
        let b = Individual::from_phrase("ab");
        assert!(matches!(
            a.crossover(&b, &mut rng),
            Err(EvolutionError::InvalidLength {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let mut rng = create_rng(42);
        let a = Individual::from_phrase("AAAAAA");
        let b = Individual::from_phrase("BBBBBB");
        let child = a.crossover(&b, &mut rng).unwrap();
        assert_eq!(a.decode(), "AAAAAA");
        assert_eq!(b.decode(), "BBBBBB");
        assert_eq!(child.len(), 6);
        assert_eq!(child.fitness(), 0.0);
        // position 0 is always at or below the pivot
        assert_eq!(child.genes()[0], 'B');
    }

    #[test]
    fn test_self_crossover_clones() {
        let mut rng = create_rng(42);
        let a = Individual::from_phrase("same genes");
        let child = a.crossover(&a, &mut rng).unwrap();
        assert_eq!(child.decode(), "same genes");
    }

    #[test]
    fn test_mutate_zero_rate_is_noop() {
        let mut rng = create_rng(42);
        let mut ind = Individual::from_phrase("Unchanged");
        ind.mutate(0.0, &mut rng);
        assert_eq!(ind.decode(), "Unchanged");
    }

    #[test]
    fn test_mutate_full_rate_changes_most_genes() {
        let mut rng = create_rng(42);
        let original = Individual::random(500, &mut rng);
        let mut ind = original.clone();
        ind.mutate(1.0, &mut rng);
        assert_eq!(ind.len(), 500);
        let same = ind
            .genes()
            .iter()
            .zip(original.genes())
            .filter(|(a, b)| a == b)
            .count();
        // a redraw reproduces the old gene with probability 1/58
        assert!(same < 30, "{same} of 500 genes unchanged after full mutation");
    }

    proptest! {
        #[test]
        fn prop_fitness_in_unit_interval(
            genes in "[ A-z]{1,40}",
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let target = Individual::random(genes.chars().count(), &mut rng);
            let mut ind = Individual::from_phrase(&genes);
            ind.score_against(target.genes()).unwrap();
            prop_assert!((0.0..=1.0).contains(&ind.fitness()));
            prop_assert_eq!(ind.fitness() == 1.0, ind.decode() == target.decode());
        }

        #[test]
        fn prop_self_score_is_perfect(phrase in "\\PC{1,40}") {
            let mut ind = Individual::from_phrase(&phrase);
            let target: Vec<char> = phrase.chars().collect();
            ind.score_against(&target).unwrap();
            prop_assert_eq!(ind.fitness(), 1.0);
        }
    }
}
