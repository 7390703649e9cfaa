//! Character-sequence genetic operators.
//!
//! Gene drawing, single-point crossover, and per-gene mutation for
//! individuals encoded as `&[char]`. The operators are generic over the
//! gene type where the alphabet does not matter.
//!
//! # Alphabet
//!
//! Genes are drawn from code points `64..122`, with `@` (64) remapped to a
//! space. The drawable set is therefore `{' '} ∪ ['A', 'y']`, 58 symbols:
//! uppercase letters, the six punctuation marks after them, lowercase `a`
//! through `y`, and space. `z`, digits, and most punctuation can never be
//! produced, so a target containing them is unreachable.

use rand::Rng;

/// Lowest code point drawn before remapping.
const GENE_LOW: u32 = 64;

/// Upper bound of the drawn code points (exclusive).
const GENE_HIGH: u32 = 122;

/// Code point substituted for [`GENE_LOW`].
const SPACE: char = ' ';

// ============================================================================
// Alphabet
// ============================================================================

/// Draws one random gene from the fixed alphabet.
pub fn random_gene<R: Rng>(rng: &mut R) -> char {
    let code = rng.random_range(GENE_LOW..GENE_HIGH);
    if code == GENE_LOW {
        SPACE
    } else {
        // 65..122 are all valid scalar values.
        char::from_u32(code).unwrap_or(SPACE)
    }
}

/// Returns `true` if `c` can be produced by [`random_gene`].
pub fn is_drawable(c: char) -> bool {
    c == SPACE || (GENE_LOW + 1..GENE_HIGH).contains(&(c as u32))
}

/// Draws `len` independent random genes.
pub fn random_genes<R: Rng>(len: usize, rng: &mut R) -> Vec<char> {
    (0..len).map(|_| random_gene(rng)).collect()
}

// ============================================================================
// Crossover
// ============================================================================

/// Single-point crossover with a uniformly drawn pivot in `0..len`.
///
/// Positions `<= pivot` come from `second`, positions `> pivot` from
/// `first`. Both parents must have the same non-zero length.
pub fn single_point_crossover<T: Copy, R: Rng>(first: &[T], second: &[T], rng: &mut R) -> Vec<T> {
    debug_assert_eq!(first.len(), second.len(), "parents must have equal length");
    if first.is_empty() {
        return Vec::new();
    }
    let pivot = rng.random_range(0..first.len());
    crossover_at(first, second, pivot)
}

/// Deterministic half of [`single_point_crossover`] for a known pivot.
pub fn crossover_at<T: Copy>(first: &[T], second: &[T], pivot: usize) -> Vec<T> {
    first
        .iter()
        .zip(second)
        .enumerate()
        .map(|(i, (&a, &b))| if i > pivot { a } else { b })
        .collect()
}

// ============================================================================
// Mutation
// ============================================================================

/// Replaces each gene independently with probability `rate`.
///
/// A gene is replaced when a uniform draw in `[0, 1)` is below `rate`, so
/// `rate = 0` never mutates and `rate = 1` always redraws.
///
/// Returns the number of redrawn positions.
pub fn uniform_mutation<R: Rng>(genes: &mut [char], rate: f64, rng: &mut R) -> usize {
    let mut redrawn = 0;
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = random_gene(rng);
            redrawn += 1;
        }
    }
    redrawn
}

// ============================================================================
// Tests
// ============================================================================
