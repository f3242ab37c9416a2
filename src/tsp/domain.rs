//! Traveling Salesman Problem as a GA problem domain.
//!
//! A chromosome is a permutation of city indices `0..n` describing a
//! closed tour. Crossover and mutation are overridden with ordered
//! crossover and swap mutation so offspring stay permutations;
//! [`validate_individual`](ProblemDomain::validate_individual) repairs
//! anything else.

use crate::error::{Error, Result};
use crate::ga::operators::{order_crossover, swap_mutation};
use crate::ga::{Individual, ProblemDomain};
use rand::seq::SliceRandom;
use rand::Rng;

/// Tour length normalization constant.
///
/// Tours at least this long all score fitness 0.
pub const DEFAULT_DISTANCE_CAP: f64 = 10_000.0;

/// A city to visit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl City {
    pub fn new(id: u32, x: f64, y: f64, name: impl Into<String>) -> Self {
        Self {
            id,
            x,
            y,
            name: name.into(),
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A decoded tour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspSolution {
    /// Closed tour length, including the return to the first city.
    pub distance: f64,
    /// Cities in visiting order.
    pub path: Vec<City>,
}

/// GA problem definition for the TSP.
///
/// Fitness is `1 - min(length, cap) / cap`.
#[derive(Debug, Clone)]
pub struct TspProblemDomain {
    cities: Vec<City>,
    distance_cap: f64,
}

impl TspProblemDomain {
    /// Creates the domain. Fails with [`Error::Config`] if `cities` is empty.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(Error::config("TSP needs at least one city"));
        }
        Ok(Self {
            cities,
            distance_cap: DEFAULT_DISTANCE_CAP,
        })
    }

    /// Sets the normalization constant. Must be positive and finite.
    pub fn with_distance_cap(mut self, cap: f64) -> Result<Self> {
        if !(cap.is_finite() && cap > 0.0) {
            return Err(Error::config(format!("distance cap must be positive, got {cap}")));
        }
        self.distance_cap = cap;
        Ok(self)
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn distance_cap(&self) -> f64 {
        self.distance_cap
    }

    /// Closed tour length of `tour`.
    ///
    /// Returns `f64::MAX` if any index is out of range.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = self.cities.len();
        if tour.iter().any(|&city| city >= n) {
            return f64::MAX;
        }
        (0..tour.len())
            .map(|i| {
                let from = &self.cities[tour[i]];
                let to = &self.cities[tour[(i + 1) % tour.len()]];
                from.distance_to(to)
            })
            .sum()
    }

    fn random_tour<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..self.cities.len()).collect();
        tour.shuffle(rng);
        tour
    }

    fn is_permutation(&self, tour: &[usize]) -> bool {
        let n = self.cities.len();
        if tour.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        tour.iter()
            .all(|&city| city < n && !std::mem::replace(&mut seen[city], true))
    }
}

impl ProblemDomain for TspProblemDomain {
    type Gene = usize;
    type Solution = TspSolution;

    fn chromosome_length(&self) -> usize {
        self.cities.len()
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual<usize> {
        Individual::new(self.random_tour(rng))
    }

    fn calculate_fitness(&self, individual: &Individual<usize>) -> Result<f64> {
        let length = self.tour_length(individual.chromosome());
        Ok(1.0 - length.min(self.distance_cap) / self.distance_cap)
    }

    /// Repairs a tour into a permutation of `0..n`.
    ///
    /// Positions holding a repeated or out-of-range city are overwritten,
    /// in scan order, with the missing cities in ascending order. A
    /// chromosome that is still not a permutation afterwards (wrong
    /// length) is replaced by a random tour.
    fn validate_individual<R: Rng>(&self, individual: &mut Individual<usize>, rng: &mut R) {
        let n = self.cities.len();
        let tour = individual.chromosome_mut();

        let mut seen = vec![false; n];
        let mut misplaced = Vec::new();
        for (pos, &city) in tour.iter().enumerate() {
            if city < n && !seen[city] {
                seen[city] = true;
            } else {
                misplaced.push(pos);
            }
        }
        if misplaced.is_empty() && tour.len() == n {
            return;
        }

        let missing = (0..n).filter(|&city| !seen[city]);
        for (pos, city) in misplaced.into_iter().zip(missing) {
            tour[pos] = city;
        }

        if !self.is_permutation(individual.chromosome()) {
            tracing::warn!(
                length = individual.len(),
                cities = n,
                "tour could not be repaired, replacing with a random tour"
            );
            individual.set_chromosome(self.random_tour(rng));
        }
    }

    /// Maps a tour to its cities.
    ///
    /// Fails with [`Error::InvalidChromosome`] if the tour is not a
    /// permutation, which means repair was skipped.
    fn decode_solution(&self, best: &Individual<usize>) -> Result<TspSolution> {
        let tour = best.chromosome();
        if !self.is_permutation(tour) {
            return Err(Error::InvalidChromosome(format!(
                "tour {best} is not a permutation of {} cities",
                self.cities.len()
            )));
        }

        Ok(TspSolution {
            distance: self.tour_length(tour),
            path: tour.iter().map(|&city| self.cities[city].clone()).collect(),
        })
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Individual<usize>,
        parent2: &Individual<usize>,
        rng: &mut R,
    ) -> Individual<usize> {
        let mut offspring = self.create_empty_individual(parent1.len());
        order_crossover(
            parent1.chromosome(),
            parent2.chromosome(),
            offspring.chromosome_mut(),
            rng,
        );
        offspring
    }

    fn mutate<R: Rng>(&self, individual: &mut Individual<usize>, mutation_rate: f64, rng: &mut R) {
        swap_mutation(individual.chromosome_mut(), mutation_rate, rng);
    }
}
