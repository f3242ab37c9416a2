//! TSP solver loop.
//!
//! Uses [`GeneticAlgorithm`] for initialization, evaluation and tournament
//! selection, but builds each generation itself: elites are copied, every
//! other slot is filled by a tournament-selected parent that is crossed
//! with a second tournament winner (or cloned) and then swap-mutated.

use super::domain::{City, TspProblemDomain};
use crate::error::Result;
use crate::ga::{GaConfig, GeneticAlgorithm, Individual, Population, ProblemDomain};
use crate::random::create_rng;
use rand::Rng;
use std::time::Instant;
use tracing::instrument;

/// Outcome of [`TspSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspResult {
    /// Closed tour length of the best tour.
    pub total_distance: f64,
    /// City names in visiting order.
    pub city_names: Vec<String>,
    /// City ids in visiting order.
    pub city_ids: Vec<u32>,
    /// Wall-clock time of the whole run.
    pub computation_time_ms: u128,
    pub generations: usize,
}

/// Genetic TSP solver.
///
/// ```
/// use u_evolve::ga::GaConfig;
/// use u_evolve::tsp::{City, TspSolver};
///
/// let cities = vec![
///     City::new(1, 0.0, 0.0, "A"),
///     City::new(2, 3.0, 4.0, "B"),
/// ];
/// let result = TspSolver::new(GaConfig::tsp().with_seed(1).with_max_generations(10))
///     .solve(cities)?;
/// assert_eq!(result.total_distance, 10.0);
/// # Ok::<(), u_evolve::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TspSolver {
    config: GaConfig,
}

impl Default for TspSolver {
    fn default() -> Self {
        Self::new(GaConfig::tsp())
    }
}

impl TspSolver {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Searches for a short closed tour through `cities`.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) if `cities` is
    /// empty or the configuration is invalid.
    #[instrument(level = "info", skip_all, fields(cities = cities.len()))]
    pub fn solve(&self, cities: Vec<City>) -> Result<TspResult> {
        let started = Instant::now();

        let domain = TspProblemDomain::new(cities)?;
        let ga = GeneticAlgorithm::new(domain, self.config.clone())?;
        let mut rng = create_rng(self.config.seed);

        let mut population = ga.init_population(&mut rng);
        ga.eval_population(&mut population)?;

        let mut generation = 1;
        while generation < self.config.max_generations
            && !ga.is_termination_condition_met(&population)
        {
            population = self.next_generation(&ga, &population, &mut rng);
            ga.eval_population(&mut population)?;
            generation += 1;

            tracing::debug!(
                generation,
                best_fitness = population.fittest(0).fitness(),
                population_fitness = population.population_fitness(),
                "generation evaluated"
            );
        }

        let solution = ga.get_solution(population.fittest(0))?;
        tracing::info!(
            generations = generation,
            distance = solution.distance,
            "tour found"
        );

        Ok(TspResult {
            total_distance: solution.distance,
            city_names: solution.path.iter().map(|c| c.name.clone()).collect(),
            city_ids: solution.path.iter().map(|c| c.id).collect(),
            computation_time_ms: started.elapsed().as_millis(),
            generations: generation,
        })
    }

    fn next_generation<R: Rng>(
        &self,
        ga: &GeneticAlgorithm<TspProblemDomain>,
        population: &Population<usize>,
        rng: &mut R,
    ) -> Population<usize> {
        let domain = ga.domain();
        let mut next: Vec<Individual<usize>> = Vec::with_capacity(population.len());

        for i in 0..self.config.elitism_count {
            next.push(population.fittest(i).clone());
        }

        while next.len() < population.len() {
            let parent1 = ga.select_parent(population, rng);

            let mut offspring = if rng.random_bool(self.config.crossover_rate) {
                let parent2 = ga.select_parent(population, rng);
                domain.crossover(parent1, parent2, rng)
            } else {
                Individual::new(parent1.chromosome().to_vec())
            };

            domain.mutate(&mut offspring, self.config.mutation_rate, rng);
            domain.validate_individual(&mut offspring, rng);
            next.push(offspring);
        }

        Population::new(next)
    }
}
