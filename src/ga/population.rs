//! Fixed-size population with a cached fitness ranking.
//!
//! The ranking is a stable descending sort of slot indices by fitness,
//! computed once on first use and discarded whenever the population is
//! accessed mutably. Ties keep their slot order, which selection and
//! elitism depend on.

use super::individual::{Individual, UNEVALUATED};
use super::types::{Gene, ProblemDomain};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cell::OnceCell;

/// An ordered collection of individuals plus an aggregate fitness figure.
#[derive(Debug, Clone)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
    population_fitness: f64,
    ranking: OnceCell<Vec<usize>>,
}

impl<G: Gene> Population<G> {
    /// Wraps explicitly constructed individuals.
    ///
    /// This is the uninitialized construction path: the caller supplies
    /// every slot. Use [`Population::placeholders`] for `size` scratch
    /// individuals to fill with [`set_individual`](Self::set_individual),
    /// or [`Population::initialize`] for random ones.
    pub fn new(individuals: Vec<Individual<G>>) -> Self {
        Self {
            individuals,
            population_fitness: UNEVALUATED,
            ranking: OnceCell::new(),
        }
    }

    /// Creates `size` random individuals through `domain`.
    pub fn initialize<D, R>(size: usize, domain: &D, rng: &mut R) -> Self
    where
        D: ProblemDomain<Gene = G>,
        R: Rng,
    {
        Self::new((0..size).map(|_| domain.create_individual(rng)).collect())
    }

    /// Creates `size` scratch individuals of the domain's chromosome
    /// length, none of them evaluated.
    pub fn placeholders<D>(size: usize, domain: &D) -> Self
    where
        D: ProblemDomain<Gene = G>,
    {
        let length = domain.chromosome_length();
        Self::new((0..size).map(|_| domain.create_empty_individual(length)).collect())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in slot order.
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Individuals in slot order, for in-place updates.
    ///
    /// Discards the cached ranking.
    pub fn individuals_mut(&mut self) -> &mut [Individual<G>] {
        self.ranking.take();
        &mut self.individuals
    }

    /// Direct slot access, bypassing fitness order.
    ///
    /// # Panics
    /// Panics if `offset` is out of range.
    pub fn individual(&self, offset: usize) -> &Individual<G> {
        &self.individuals[offset]
    }

    /// Replaces the individual at `offset`.
    ///
    /// # Panics
    /// Panics if `offset` is out of range.
    pub fn set_individual(&mut self, offset: usize, individual: Individual<G>) {
        self.ranking.take();
        self.individuals[offset] = individual;
    }

    /// Aggregate fitness set by the last evaluation (informational only).
    pub fn population_fitness(&self) -> f64 {
        self.population_fitness
    }

    pub fn set_population_fitness(&mut self, fitness: f64) {
        self.population_fitness = fitness;
    }

    /// Slot indices ordered by descending fitness, ties in slot order.
    pub fn ranking(&self) -> &[usize] {
        self.ranking.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.individuals.len()).collect();
            // sort_by is stable
            order.sort_by(|&a, &b| {
                self.individuals[b]
                    .fitness()
                    .total_cmp(&self.individuals[a].fitness())
            });
            order
        })
    }

    /// Returns the individual with the `offset`-th highest fitness.
    ///
    /// # Panics
    /// Panics if `offset` is out of range.
    pub fn fittest(&self, offset: usize) -> &Individual<G> {
        let slot = self.ranking()[offset];
        &self.individuals[slot]
    }

    /// Consumes the population, returning its individuals best first.
    pub fn into_ranked(self) -> Vec<Individual<G>> {
        let order = self.ranking().to_vec();
        let mut slots: Vec<Option<Individual<G>>> =
            self.individuals.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|slot| slots[slot].take())
            .collect()
    }

    /// Uniformly permutes the slot order in place (Fisher-Yates).
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.ranking.take();
        self.individuals.shuffle(rng);
    }
}
