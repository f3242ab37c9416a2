//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Error, Result};

/// Configuration for the genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elitism_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(7)
///     .with_mutation_rate(0.02)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in the population. Constant across generations.
    pub population_size: usize,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Probability of building an offspring by crossover (0.0–1.0).
    ///
    /// When crossover is not applied, the first parent passes through.
    pub crossover_rate: f64,

    /// Number of top-ranked individuals carried over untouched.
    pub elitism_count: usize,

    /// Number of individuals sampled per tournament.
    pub tournament_size: usize,

    /// Generation cap used by the convenience runners.
    ///
    /// The loop runs while `generation < max_generations`, with the
    /// generation counter starting at 1, so at most `max_generations - 1`
    /// generations follow the initial evaluation.
    pub max_generations: usize,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate fitness in parallel.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Protect the individual ranked exactly at `elitism_count` from
    /// mutation as well.
    ///
    /// With `false` (the default), crossover protects ranks
    /// `< elitism_count` while mutation protects ranks `<= elitism_count`,
    /// so the individual at rank `elitism_count` skips crossover but is
    /// still mutated.
    pub symmetric_elitism: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.01,
            crossover_rate: 0.9,
            elitism_count: 2,
            tournament_size: 5,
            max_generations: 1000,
            seed: None,
            parallel: false,
            symmetric_elitism: false,
        }
    }
}

impl GaConfig {
    /// Preset used for timetable scheduling. Same as the default.
    pub fn timetable() -> Self {
        Self::default()
    }

    /// Preset used for TSP: slightly higher mutation rate.
    pub fn tsp() -> Self {
        Self {
            mutation_rate: 0.02,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables symmetric elitism for mutation.
    pub fn with_symmetric_elitism(mut self, symmetric: bool) -> Self {
        self.symmetric_elitism = symmetric;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::config("population_size must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(Error::config("tournament_size must be at least 1"));
        }
        if self.tournament_size > self.population_size {
            return Err(Error::config(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        if self.elitism_count > self.population_size {
            return Err(Error::config(format!(
                "elitism_count {} exceeds population_size {}",
                self.elitism_count, self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::config("max_generations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::config("mutation_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::config("crossover_rate must be within [0, 1]"));
        }
        Ok(())
    }
}
