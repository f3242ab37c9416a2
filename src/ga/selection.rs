//! Tournament selection.
//!
//! Samples `k` distinct individuals by shuffling a private permutation of
//! slot indices and returns the fittest of the sample. The population
//! itself is never reordered.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::population::Population;
use super::types::Gene;
use rand::seq::SliceRandom;
use rand::Rng;

/// Returns the slot index of the tournament winner.
///
/// Draws `k` distinct slots uniformly at random and picks the one with the
/// highest fitness; ties go to the earlier draw. `k` is capped at the
/// population size.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<G: Gene, R: Rng>(population: &Population<G>, k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let mut order: Vec<usize> = (0..population.len()).collect();
    order.shuffle(rng);

    let k = k.clamp(1, order.len());
    let individuals = population.individuals();
    let mut best = order[0];
    for &slot in &order[1..k] {
        if individuals[slot].fitness() > individuals[best].fitness() {
            best = slot;
        }
    }
    best
}
