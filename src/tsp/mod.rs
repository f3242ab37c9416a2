//! Traveling Salesman Problem on Euclidean cities.
//!
//! [`TspProblemDomain`] encodes tours as permutations of city indices and
//! supplies permutation-safe operators (ordered crossover, swap mutation),
//! so it runs unchanged under [`GeneticAlgorithm`](crate::ga::GeneticAlgorithm).
//! [`TspSolver`] runs the dedicated elitist solver loop and packages the
//! tour as names and ids.

mod domain;
mod solver;

pub use domain::{City, TspProblemDomain, TspSolution, DEFAULT_DISTANCE_CAP};
pub use solver::{TspResult, TspSolver};
