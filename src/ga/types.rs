//! Core trait definitions for the GA engine.
//!
//! [`Gene`] and [`ProblemDomain`] define the contract between the generic
//! GA orchestrator and domain-specific problem implementations. The
//! orchestrator never inspects gene values; everything domain-aware lives
//! behind [`ProblemDomain`].

use super::individual::Individual;
use super::operators::{random_reset_mutation, uniform_crossover};
use crate::error::Result;
use rand::Rng;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A single discrete value inside a chromosome.
///
/// The meaning of a gene is defined by the problem domain (a timeslot,
/// room or professor id for timetabling; a city index for TSP).
pub trait Gene: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// Placeholder value for position `index` of a scratch chromosome.
    fn placeholder(index: usize) -> Self;
}

macro_rules! impl_gene {
    ($($t:ty),*) => {
        $(
            impl Gene for $t {
                fn placeholder(index: usize) -> Self {
                    index as $t
                }
            }
        )*
    };
}

impl_gene!(usize, u32, u64, i32, i64);

/// Defines a problem the GA can evolve solutions for.
///
/// Implementors own the problem data and are read-only during a run: every
/// method takes `&self`, so one domain can be evaluated from several
/// threads at once.
///
/// # Operators
///
/// [`crossover`](ProblemDomain::crossover) and
/// [`mutate`](ProblemDomain::mutate) default to uniform gene-wise
/// crossover and random-reset mutation. Domains whose chromosomes carry a
/// structural invariant (such as permutations) override them with
/// structure-preserving operators.
///
/// # Implementing
///
/// ```ignore
/// struct OneMax { n: usize }
///
/// impl ProblemDomain for OneMax {
///     type Gene = u32;
///     type Solution = usize;
///
///     fn chromosome_length(&self) -> usize { self.n }
///
///     fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual<u32> {
///         Individual::new((0..self.n).map(|_| rng.random_range(0..2)).collect())
///     }
///
///     fn calculate_fitness(&self, ind: &Individual<u32>) -> Result<f64> {
///         let ones = ind.chromosome().iter().filter(|&&g| g == 1).count();
///         Ok((ones + 1) as f64 / (self.n + 1) as f64)
///     }
///
///     fn decode_solution(&self, ind: &Individual<u32>) -> Result<usize> {
///         Ok(ind.chromosome().iter().filter(|&&g| g == 1).count())
///     }
/// }
/// ```
pub trait ProblemDomain: Send + Sync {
    /// Gene type of this domain's chromosomes.
    type Gene: Gene;

    /// Domain-facing result produced from the best individual.
    type Solution;

    /// Expected chromosome length of every individual in this domain.
    fn chromosome_length(&self) -> usize;

    /// Produces one syntactically valid random candidate.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual<Self::Gene>;

    /// Produces a scratch candidate with placeholder genes, used as the
    /// target of crossover.
    fn create_empty_individual(&self, chromosome_length: usize) -> Individual<Self::Gene> {
        Individual::with_length(chromosome_length)
    }

    /// Maps a chromosome to a fitness in `(0, 1]`; higher is better.
    ///
    /// Must be deterministic and free of side effects.
    fn calculate_fitness(&self, individual: &Individual<Self::Gene>) -> Result<f64>;

    /// Repairs a structurally invalid chromosome in place.
    ///
    /// Called by the orchestrator after every crossover and mutation.
    /// The default implementation is a no-op.
    fn validate_individual<R: Rng>(&self, _individual: &mut Individual<Self::Gene>, _rng: &mut R) {}

    /// Maps the winning individual into the domain-facing result.
    fn decode_solution(&self, best: &Individual<Self::Gene>) -> Result<Self::Solution>;

    /// Builds one offspring from two parents.
    ///
    /// The default picks every gene independently and uniformly from
    /// either parent.
    fn crossover<R: Rng>(
        &self,
        parent1: &Individual<Self::Gene>,
        parent2: &Individual<Self::Gene>,
        rng: &mut R,
    ) -> Individual<Self::Gene> {
        let mut offspring = self.create_empty_individual(parent1.len());
        uniform_crossover(
            parent1.chromosome(),
            parent2.chromosome(),
            offspring.chromosome_mut(),
            rng,
        );
        offspring
    }

    /// Mutates an individual in place.
    ///
    /// The default replaces each gene, with probability `mutation_rate`,
    /// by the gene at the same position of a freshly created individual.
    fn mutate<R: Rng>(
        &self,
        individual: &mut Individual<Self::Gene>,
        mutation_rate: f64,
        rng: &mut R,
    ) {
        let donor = self.create_individual(rng);
        random_reset_mutation(
            individual.chromosome_mut(),
            donor.chromosome(),
            mutation_rate,
            rng,
        );
    }
}
