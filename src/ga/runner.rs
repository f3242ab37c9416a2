//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] orchestrates the complete evolutionary process:
//! initialization → evaluation → {crossover → mutation → evaluation}*.
//! It never inspects genes; all domain knowledge comes from the bound
//! [`ProblemDomain`].

use super::config::GaConfig;
use super::individual::Individual;
use super::population::Population;
use super::selection::tournament;
use super::types::ProblemDomain;
use crate::error::{Error, Result};
use crate::random::create_rng;
use rand::Rng;
use tracing::instrument;

/// Fitness of a candidate with no constraint violations.
pub const SOLVED_FITNESS: f64 = 1.0;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<G> {
    /// Fittest individual of the final population.
    pub best: Individual<G>,

    /// Same as `best.fitness()`.
    pub best_fitness: f64,

    /// Value of the generation counter at termination. The initial
    /// evaluation counts as generation 1.
    pub generations: usize,

    /// Whether the run stopped because a candidate reached fitness 1.0.
    pub solved: bool,

    /// Best fitness after the initial evaluation and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Generic genetic algorithm bound to one problem domain.
///
/// Uses elitism, tournament selection and the domain's crossover and
/// mutation operators.
///
/// # Usage
///
/// ```ignore
/// let domain = TimetableProblemDomain::new(timetable)?;
/// let ga = GeneticAlgorithm::new(domain, GaConfig::default().with_seed(42))?;
/// let result = ga.evolve(1000)?;
/// let classes = ga.get_solution(&result.best)?;
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm<D> {
    domain: D,
    config: GaConfig,
}

impl<D: ProblemDomain> GeneticAlgorithm<D> {
    /// Binds `domain` to a validated configuration.
    ///
    /// Fails with [`Error::Config`] if the configuration is invalid or the
    /// domain produces zero-length chromosomes.
    pub fn new(domain: D, config: GaConfig) -> Result<Self> {
        config.validate()?;
        if domain.chromosome_length() == 0 {
            return Err(Error::config("problem domain has zero-length chromosomes"));
        }
        Ok(Self { domain, config })
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Creates a random population of `population_size` individuals.
    pub fn init_population<R: Rng>(&self, rng: &mut R) -> Population<D::Gene> {
        Population::initialize(self.config.population_size, &self.domain, rng)
    }

    /// Evaluates one individual and caches its fitness.
    pub fn calc_fitness(&self, individual: &mut Individual<D::Gene>) -> Result<f64> {
        evaluate(&self.domain, individual)
    }

    /// Evaluates every individual and stores the fitness sum as the
    /// population's aggregate fitness.
    pub fn eval_population(&self, population: &mut Population<D::Gene>) -> Result<()> {
        let total = evaluate_all(
            &self.domain,
            population.individuals_mut(),
            self.config.parallel,
        )?;
        population.set_population_fitness(total);
        Ok(())
    }

    /// Returns true once the fittest individual reaches fitness 1.0.
    pub fn is_termination_condition_met(&self, population: &Population<D::Gene>) -> bool {
        !population.is_empty() && population.fittest(0).fitness() == SOLVED_FITNESS
    }

    /// Tournament selection over `tournament_size` distinct individuals.
    pub fn select_parent<'p, R: Rng>(
        &self,
        population: &'p Population<D::Gene>,
        rng: &mut R,
    ) -> &'p Individual<D::Gene> {
        let slot = tournament(population, self.config.tournament_size, rng);
        population.individual(slot)
    }

    /// Builds the next population by crossover.
    ///
    /// Walks `population` in fitness order. The first `elitism_count`
    /// individuals pass through unchanged; every other slot is, with
    /// probability `crossover_rate`, replaced by the offspring of that
    /// individual and a tournament-selected mate, otherwise passed through.
    pub fn crossover_population<R: Rng>(
        &self,
        population: &Population<D::Gene>,
        rng: &mut R,
    ) -> Population<D::Gene> {
        let mut next = Vec::with_capacity(population.len());

        for i in 0..population.len() {
            let parent1 = population.fittest(i);

            if i >= self.config.elitism_count && rng.random_bool(self.config.crossover_rate) {
                let parent2 = self.select_parent(population, rng);
                let mut offspring = self.domain.crossover(parent1, parent2, rng);
                self.domain.validate_individual(&mut offspring, rng);
                next.push(offspring);
            } else {
                next.push(parent1.clone());
            }
        }

        Population::new(next)
    }

    /// Mutates every individual ranked outside the elite.
    ///
    /// Ranking uses the fitness currently cached on each individual, which
    /// is stale for fresh offspring. By default the individual ranked
    /// exactly at `elitism_count` is also spared; see
    /// [`GaConfig::symmetric_elitism`].
    pub fn mutate_population<R: Rng>(
        &self,
        population: Population<D::Gene>,
        rng: &mut R,
    ) -> Population<D::Gene> {
        let elitism_count = self.config.elitism_count;
        let mut next = Vec::with_capacity(population.len());

        for (i, mut individual) in population.into_ranked().into_iter().enumerate() {
            let protected = if self.config.symmetric_elitism {
                i < elitism_count
            } else {
                i <= elitism_count
            };

            if !protected {
                self.domain
                    .mutate(&mut individual, self.config.mutation_rate, rng);
                self.domain.validate_individual(&mut individual, rng);
            }
            next.push(individual);
        }

        Population::new(next)
    }

    /// Runs the GA with a generator seeded from [`GaConfig::seed`].
    pub fn evolve(&self, max_generations: usize) -> Result<GaResult<D::Gene>> {
        let mut rng = create_rng(self.config.seed);
        self.evolve_with_rng(max_generations, &mut rng)
    }

    /// Runs the GA drawing every random decision from `rng`.
    ///
    /// The generation counter starts at 1 after the initial evaluation and
    /// the loop runs while it is below `max_generations`, so
    /// `max_generations = 1` returns the fittest random individual.
    #[instrument(
        level = "debug",
        skip(self, rng),
        fields(population_size = self.config.population_size)
    )]
    pub fn evolve_with_rng<R: Rng>(
        &self,
        max_generations: usize,
        rng: &mut R,
    ) -> Result<GaResult<D::Gene>> {
        let mut population = self.init_population(rng);
        self.eval_population(&mut population)?;

        let mut fitness_history = Vec::new();
        fitness_history.push(population.fittest(0).fitness());

        let mut generation = 1;
        while generation < max_generations && !self.is_termination_condition_met(&population) {
            population = self.crossover_population(&population, rng);
            population = self.mutate_population(population, rng);
            self.eval_population(&mut population)?;
            generation += 1;

            let best_fitness = population.fittest(0).fitness();
            fitness_history.push(best_fitness);
            tracing::debug!(
                generation,
                best_fitness,
                population_fitness = population.population_fitness(),
                "generation evaluated"
            );
        }

        let solved = self.is_termination_condition_met(&population);
        let best = population.fittest(0).clone();
        tracing::info!(
            generations = generation,
            best_fitness = best.fitness(),
            solved,
            "evolution finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: generation,
            solved,
            fitness_history,
        })
    }

    /// Decodes `individual` into the domain-facing solution.
    pub fn get_solution(&self, individual: &Individual<D::Gene>) -> Result<D::Solution> {
        self.domain.decode_solution(individual)
    }
}

fn evaluate<D: ProblemDomain>(domain: &D, individual: &mut Individual<D::Gene>) -> Result<f64> {
    let fitness = domain.calculate_fitness(individual)?;
    individual.set_fitness(fitness);
    Ok(fitness)
}

fn evaluate_sequential<D: ProblemDomain>(
    domain: &D,
    individuals: &mut [Individual<D::Gene>],
) -> Result<f64> {
    let mut total = 0.0;
    for individual in individuals.iter_mut() {
        total += evaluate(domain, individual)?;
    }
    Ok(total)
}

#[cfg(feature = "parallel")]
fn evaluate_all<D: ProblemDomain>(
    domain: &D,
    individuals: &mut [Individual<D::Gene>],
    parallel: bool,
) -> Result<f64> {
    use rayon::prelude::*;

    if parallel {
        individuals
            .par_iter_mut()
            .map(|individual| evaluate(domain, individual))
            .try_reduce(|| 0.0, |a, b| Ok(a + b))
    } else {
        evaluate_sequential(domain, individuals)
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<D: ProblemDomain>(
    domain: &D,
    individuals: &mut [Individual<D::Gene>],
    _parallel: bool,
) -> Result<f64> {
    evaluate_sequential(domain, individuals)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- OneMax: fitness reaches 1.0 when every bit is set ----

    struct OneMaxDomain {
        n: usize,
    }

    impl ProblemDomain for OneMaxDomain {
        type Gene = u32;
        type Solution = usize;

        fn chromosome_length(&self) -> usize {
            self.n
        }

        fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual<u32> {
            Individual::new((0..self.n).map(|_| rng.random_range(0..2)).collect())
        }

        fn calculate_fitness(&self, ind: &Individual<u32>) -> Result<f64> {
            let ones = ind.chromosome().iter().filter(|&&g| g == 1).count();
            Ok((ones + 1) as f64 / (self.n + 1) as f64)
        }

        fn decode_solution(&self, ind: &Individual<u32>) -> Result<usize> {
            Ok(ind.chromosome().iter().filter(|&&g| g == 1).count())
        }
    }

    // ---- Donor domain: every fresh individual is all `donor` ----

    struct DonorDomain {
        n: usize,
        donor: u32,
    }

    impl ProblemDomain for DonorDomain {
        type Gene = u32;
        type Solution = ();

        fn chromosome_length(&self) -> usize {
            self.n
        }

        fn create_individual<R: Rng>(&self, _rng: &mut R) -> Individual<u32> {
            Individual::new(vec![self.donor; self.n])
        }

        fn calculate_fitness(&self, _ind: &Individual<u32>) -> Result<f64> {
            Ok(SOLVED_FITNESS)
        }

        fn decode_solution(&self, _ind: &Individual<u32>) -> Result<()> {
            Ok(())
        }
    }

    fn ranked_population(fitnesses: &[f64], n: usize) -> Population<u32> {
        Population::new(
            fitnesses
                .iter()
                .enumerate()
                .map(|(i, &f)| {
                    let mut ind = Individual::new(vec![i as u32; n]);
                    ind.set_fitness(f);
                    ind
                })
                .collect(),
        )
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(50)
            .with_tournament_size(5)
            .with_elitism_count(2)
            .with_mutation_rate(0.02)
            .with_seed(42)
    }

    #[test]
    fn test_onemax_convergence() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 20 }, config()).unwrap();
        let result = ga.evolve(500).unwrap();

        assert!(
            result.best_fitness >= 0.9,
            "expected near-optimal OneMax, got {}",
            result.best_fitness
        );
        assert_eq!(result.fitness_history.len(), result.generations);
    }

    #[test]
    fn test_single_generation_returns_initial_fittest() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 30 }, config()).unwrap();

        let mut rng = create_rng(Some(7));
        let result = ga.evolve_with_rng(1, &mut rng).unwrap();

        let mut rng = create_rng(Some(7));
        let mut initial = ga.init_population(&mut rng);
        ga.eval_population(&mut initial).unwrap();

        assert_eq!(result.generations, 1);
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.best, *initial.fittest(0));
    }

    #[test]
    fn test_terminates_when_solved() {
        let domain = DonorDomain { n: 4, donor: 1 };
        let ga = GeneticAlgorithm::new(domain, config()).unwrap();
        let result = ga.evolve(1000).unwrap();

        assert!(result.solved);
        assert_eq!(result.generations, 1);
        assert_eq!(result.best_fitness, 1.0);
    }

    #[test]
    fn test_unbounded_generation_cap_stops_when_solved() {
        let ga = GeneticAlgorithm::new(DonorDomain { n: 4, donor: 1 }, config()).unwrap();
        let result = ga.evolve(usize::MAX).unwrap();

        assert!(result.solved);
        assert_eq!(result.generations, 1);
        assert_eq!(result.fitness_history, vec![1.0]);
    }

    #[test]
    fn test_generation_cap() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 200 }, config()).unwrap();
        let result = ga.evolve(5).unwrap();

        assert!(!result.solved);
        assert_eq!(result.generations, 5);
        assert_eq!(result.fitness_history.len(), 5);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotonic() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 40 }, config()).unwrap();
        let result = ga.evolve(60).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness regressed: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_eval_population_sums_fitness() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 10 }, config()).unwrap();
        let mut rng = create_rng(Some(1));
        let mut pop = ga.init_population(&mut rng);
        ga.eval_population(&mut pop).unwrap();

        let sum: f64 = pop.individuals().iter().map(|i| i.fitness()).sum();
        assert!((pop.population_fitness() - sum).abs() < 1e-9);
        assert!(pop.individuals().iter().all(|i| i.fitness() > 0.0));
    }

    #[test]
    fn test_select_parent_full_tournament_picks_fittest() {
        let config = config().with_population_size(4).with_tournament_size(4);
        let ga = GeneticAlgorithm::new(DonorDomain { n: 2, donor: 0 }, config).unwrap();
        let pop = ranked_population(&[0.1, 0.8, 0.3, 0.5], 2);
        let mut rng = create_rng(Some(3));

        for _ in 0..50 {
            assert_eq!(ga.select_parent(&pop, &mut rng).fitness(), 0.8);
        }
    }

    #[test]
    fn test_crossover_passes_elites_through() {
        let config = config()
            .with_population_size(5)
            .with_tournament_size(2)
            .with_crossover_rate(1.0);
        let ga = GeneticAlgorithm::new(DonorDomain { n: 3, donor: 0 }, config).unwrap();
        let pop = ranked_population(&[0.1, 0.9, 0.5, 0.7, 0.3], 3);
        let mut rng = create_rng(Some(5));

        let next = ga.crossover_population(&pop, &mut rng);
        assert_eq!(next.len(), 5);
        assert_eq!(next.individual(0), pop.fittest(0));
        assert_eq!(next.individual(1), pop.fittest(1));
        // offspring are fresh and unevaluated
        for i in 2..5 {
            assert_eq!(next.individual(i).fitness(), -1.0);
        }
    }

    #[test]
    fn test_crossover_rate_zero_passes_everyone_through_in_rank_order() {
        let config = config()
            .with_population_size(3)
            .with_tournament_size(2)
            .with_crossover_rate(0.0);
        let ga = GeneticAlgorithm::new(DonorDomain { n: 2, donor: 0 }, config).unwrap();
        let pop = ranked_population(&[0.2, 0.6, 0.4], 2);
        let mut rng = create_rng(Some(5));

        let next = ga.crossover_population(&pop, &mut rng);
        let fitnesses: Vec<f64> = next.individuals().iter().map(|i| i.fitness()).collect();
        assert_eq!(fitnesses, vec![0.6, 0.4, 0.2]);
    }

    #[test]
    fn test_mutation_spares_rank_at_elitism_count_by_default() {
        let config = config()
            .with_population_size(4)
            .with_tournament_size(2)
            .with_elitism_count(1)
            .with_mutation_rate(1.0);
        let ga = GeneticAlgorithm::new(DonorDomain { n: 3, donor: 9 }, config).unwrap();
        let pop = ranked_population(&[0.4, 0.3, 0.2, 0.1], 3);
        let mut rng = create_rng(Some(11));

        let next = ga.mutate_population(pop, &mut rng);
        assert_eq!(next.individual(0).chromosome(), &[0, 0, 0]);
        assert_eq!(next.individual(1).chromosome(), &[1, 1, 1]);
        assert_eq!(next.individual(2).chromosome(), &[9, 9, 9]);
        assert_eq!(next.individual(3).chromosome(), &[9, 9, 9]);
    }

    #[test]
    fn test_symmetric_elitism_mutates_rank_at_elitism_count() {
        let config = config()
            .with_population_size(4)
            .with_tournament_size(2)
            .with_elitism_count(1)
            .with_mutation_rate(1.0)
            .with_symmetric_elitism(true);
        let ga = GeneticAlgorithm::new(DonorDomain { n: 3, donor: 9 }, config).unwrap();
        let pop = ranked_population(&[0.4, 0.3, 0.2, 0.1], 3);
        let mut rng = create_rng(Some(11));

        let next = ga.mutate_population(pop, &mut rng);
        assert_eq!(next.individual(0).chromosome(), &[0, 0, 0]);
        assert_eq!(next.individual(1).chromosome(), &[9, 9, 9]);
    }

    #[test]
    fn test_get_solution_delegates_to_domain() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 3 }, config()).unwrap();
        let ind = Individual::new(vec![1u32, 0, 1]);
        assert_eq!(ga.get_solution(&ind).unwrap(), 2);
    }

    #[test]
    fn test_same_seed_same_result() {
        let ga = GeneticAlgorithm::new(OneMaxDomain { n: 25 }, config()).unwrap();
        let a = ga.evolve(30).unwrap();
        let b = ga.evolve(30).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GeneticAlgorithm::new(
            OneMaxDomain { n: 5 },
            GaConfig::default().with_population_size(0),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_length_chromosome() {
        let result = GeneticAlgorithm::new(OneMaxDomain { n: 0 }, config());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_evaluation_matches_sequential() {
        let sequential = GeneticAlgorithm::new(OneMaxDomain { n: 30 }, config()).unwrap();
        let parallel =
            GeneticAlgorithm::new(OneMaxDomain { n: 30 }, config().with_parallel(true)).unwrap();

        let a = sequential.evolve(40).unwrap();
        let b = parallel.evolve(40).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);

        let mut rng = create_rng(Some(4));
        let mut pop = parallel.init_population(&mut rng);
        parallel.eval_population(&mut pop).unwrap();
        let sum: f64 = pop.individuals().iter().map(|i| i.fitness()).sum();
        assert!((pop.population_fitness() - sum).abs() < 1e-9);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_evaluation_propagates_errors() {
        use crate::timetable::{Timetable, TimetableProblemDomain};

        let mut timetable = Timetable::new();
        timetable
            .add_room(1, "A1", 10)
            .add_timeslot(1, "Mon 9:00 - 11:00")
            .add_professor(1, "Dr P Smith")
            .add_module(1, "cs1", "Computer Science", [1])
            .add_group(1, 5, [1]);
        let domain = TimetableProblemDomain::new(timetable).unwrap();
        let ga = GeneticAlgorithm::new(
            domain,
            GaConfig::timetable()
                .with_population_size(8)
                .with_parallel(true),
        )
        .unwrap();

        let mut individuals = vec![Individual::new(vec![1u32, 1, 1]); 8];
        individuals[5] = Individual::new(vec![1u32, 99, 1]);
        let mut pop = Population::new(individuals);

        assert!(matches!(
            ga.eval_population(&mut pop),
            Err(Error::NotFound { kind: "room", id: 99 })
        ));
    }
}
