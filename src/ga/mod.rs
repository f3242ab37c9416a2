//! Genetic Algorithm engine.
//!
//! A generic, domain-agnostic GA built on trait-based abstractions.
//! Users define their problem by implementing [`ProblemDomain`], which
//! specifies how to create, evaluate, repair and decode individuals, and
//! optionally which crossover and mutation operators to use.
//!
//! # Core Traits
//!
//! - [`Gene`]: A discrete chromosome value
//! - [`ProblemDomain`]: Problem definition and operator seam
//!
//! # Key Types
//!
//! - [`Individual`]: Chromosome plus cached fitness
//! - [`Population`]: Individuals with a cached fitness ranking
//! - [`GaConfig`]: Algorithm parameters and presets
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with fitness history
//!
//! # Submodules
//!
//! - [`operators`]: Uniform crossover, random-reset mutation, ordered
//!   crossover (OX) and swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), *Applying Adaptive Algorithms to Epistatic Domains* (OX)

mod config;
mod individual;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use individual::{Individual, UNEVALUATED};
pub use population::Population;
pub use runner::{GaResult, GeneticAlgorithm, SOLVED_FITNESS};
pub use selection::tournament;
pub use types::{Gene, ProblemDomain};
