//! Candidate solutions.

use super::types::Gene;
use std::fmt;

/// Fitness value of an individual that has not been evaluated yet.
pub const UNEVALUATED: f64 = -1.0;

/// One candidate solution: a fixed-length chromosome plus its cached fitness.
///
/// The fitness is a cache. Changing genes does not recompute it; it stays
/// stale until the owning orchestrator re-evaluates the population.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Individual;
///
/// let mut ind = Individual::new(vec![2usize, 0, 1]);
/// assert_eq!(ind.fitness(), -1.0);
/// ind.set_gene(0, 1);
/// assert_eq!(ind.to_string(), "1,0,1");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<G> {
    chromosome: Vec<G>,
    fitness: f64,
}

impl<G> Default for Individual<G> {
    fn default() -> Self {
        Self {
            chromosome: Vec::new(),
            fitness: UNEVALUATED,
        }
    }
}

impl<G: Gene> Individual<G> {
    /// Creates an unevaluated individual from an explicit chromosome.
    pub fn new(chromosome: Vec<G>) -> Self {
        Self {
            chromosome,
            fitness: UNEVALUATED,
        }
    }

    /// Creates an individual of `length` genes holding placeholder values
    /// `0..length`.
    pub fn with_length(length: usize) -> Self {
        Self::new((0..length).map(G::placeholder).collect())
    }

    /// Returns the gene at `offset`.
    ///
    /// # Panics
    /// Panics if `offset` is out of range.
    pub fn gene(&self, offset: usize) -> G {
        assert!(
            offset < self.chromosome.len(),
            "gene offset {offset} out of range for chromosome of length {}",
            self.chromosome.len()
        );
        self.chromosome[offset]
    }

    /// Sets the gene at `offset`.
    ///
    /// # Panics
    /// Panics if `offset` is out of range.
    pub fn set_gene(&mut self, offset: usize, gene: G) {
        assert!(
            offset < self.chromosome.len(),
            "gene offset {offset} out of range for chromosome of length {}",
            self.chromosome.len()
        );
        self.chromosome[offset] = gene;
    }

    /// Returns true if any gene equals `gene`.
    pub fn contains_gene(&self, gene: G) -> bool {
        self.chromosome.contains(&gene)
    }
}

impl<G> Individual<G> {
    /// Returns the chromosome.
    pub fn chromosome(&self) -> &[G] {
        &self.chromosome
    }

    /// Returns the chromosome for in-place modification.
    pub fn chromosome_mut(&mut self) -> &mut [G] {
        &mut self.chromosome
    }

    /// Replaces the whole chromosome, possibly with a different length.
    pub fn set_chromosome(&mut self, chromosome: Vec<G>) {
        self.chromosome = chromosome;
    }

    /// Chromosome length.
    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    /// Returns true if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }

    /// Cached fitness, [`UNEVALUATED`] until first evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl<G: fmt::Display> fmt::Display for Individual<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gene) in self.chromosome.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{gene}")?;
        }
        Ok(())
    }
}
