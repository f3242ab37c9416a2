//! Crossover and mutation operators.
//!
//! Two families live here:
//!
//! - **Generic** operators for chromosomes without structural constraints:
//!   [`uniform_crossover`] and [`random_reset_mutation`].
//! - **Permutation** operators that keep a chromosome a valid permutation
//!   of its alphabet: [`order_crossover`] and [`swap_mutation`].
//!
//! Operators write into caller-provided slices so a domain can build the
//! offspring through its own scratch constructor.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use super::types::Gene;
use rand::Rng;
use std::collections::HashSet;

// ============================================================================
// Generic operators
// ============================================================================

/// Uniform crossover: each child gene comes from `parent1` or `parent2`
/// with equal probability, independently per position.
///
/// # Panics
/// Panics if the three slices differ in length.
pub fn uniform_crossover<G: Gene, R: Rng>(
    parent1: &[G],
    parent2: &[G],
    child: &mut [G],
    rng: &mut R,
) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert_eq!(parent1.len(), child.len(), "child must match parent length");

    for (i, gene) in child.iter_mut().enumerate() {
        *gene = if rng.random_bool(0.5) {
            parent1[i]
        } else {
            parent2[i]
        };
    }
}

/// Random-reset mutation: with probability `rate`, each gene is replaced
/// by the gene at the same position of `donor`.
///
/// `donor` is typically a freshly created random individual, so every
/// replacement is a legal value for its position.
///
/// # Panics
/// Panics if `genes` and `donor` differ in length or `rate` is outside `[0, 1]`.
pub fn random_reset_mutation<G: Gene, R: Rng>(
    genes: &mut [G],
    donor: &[G],
    rate: f64,
    rng: &mut R,
) {
    assert_eq!(genes.len(), donor.len(), "donor must match chromosome length");

    for (gene, &replacement) in genes.iter_mut().zip(donor) {
        if rng.random_bool(rate) {
            *gene = replacement;
        }
    }
}

// ============================================================================
// Permutation operators
// ============================================================================

/// Ordered crossover (OX) producing one child.
///
/// Picks `start` uniformly in `[0, n)` and `end` uniformly in
/// `[start, n)`, then delegates to [`order_crossover_segment`].
///
/// # Panics
/// See [`order_crossover_segment`].
pub fn order_crossover<G: Gene, R: Rng>(
    parent1: &[G],
    parent2: &[G],
    child: &mut [G],
    rng: &mut R,
) {
    let n = parent1.len();
    if n == 0 {
        return;
    }
    let start = rng.random_range(0..n);
    let end = start + rng.random_range(0..=n - 1 - start);
    order_crossover_segment(parent1, parent2, start, end, child);
}

/// Ordered crossover with an explicit cut `[start, end]`.
///
/// Copies `parent1[start..=end]` into the same positions of `child`. The
/// remaining positions are filled left to right from a cursor over
/// `parent2` that starts at 0, wraps around, and skips genes already
/// placed. The cursor is never reset between positions.
///
/// # Panics
/// Panics if the slices differ in length, the cut is out of range, or the
/// parents are not permutations of the same genes.
pub fn order_crossover_segment<G: Gene>(
    parent1: &[G],
    parent2: &[G],
    start: usize,
    end: usize,
    child: &mut [G],
) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, child.len(), "child must match parent length");
    assert!(start <= end && end < n, "invalid cut [{start}, {end}] for length {n}");

    let mut placed: HashSet<G> = HashSet::with_capacity(n);
    for i in start..=end {
        child[i] = parent1[i];
        placed.insert(parent1[i]);
    }

    let mut cursor = 0;
    for i in (0..start).chain(end + 1..n) {
        let mut scanned = 0;
        while placed.contains(&parent2[cursor]) {
            cursor = (cursor + 1) % n;
            scanned += 1;
            assert!(scanned < n, "parents must be permutations of the same genes");
        }
        child[i] = parent2[cursor];
        placed.insert(parent2[cursor]);
        cursor = (cursor + 1) % n;
    }
}

/// Swap mutation.
///
/// Makes `ceil(rate * n)` attempts; each attempt, with probability `rate`,
/// exchanges the genes at two uniformly random positions (possibly the
/// same one).
///
/// # Panics
/// Panics if `rate` is outside `[0, 1]`.
pub fn swap_mutation<G: Gene, R: Rng>(genes: &mut [G], rate: f64, rng: &mut R) {
    let n = genes.len();
    if n == 0 {
        return;
    }
    let attempts = (rate * n as f64).ceil() as usize;
    for _ in 0..attempts {
        if rng.random_bool(rate) {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            genes.swap(i, j);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
