//! Genetic algorithm engine with timetabling and TSP problem domains.
//!
//! - **GA engine** ([`ga`]): generic elitist genetic algorithm with
//!   tournament selection, driven entirely through the
//!   [`ProblemDomain`](ga::ProblemDomain) trait.
//! - **Timetabling** ([`timetable`]): assigns a timeslot, room and
//!   professor to every (student group, module) pair while minimizing
//!   capacity and double-booking clashes.
//! - **TSP** ([`tsp`]): shortest closed tour through a set of cities using
//!   permutation chromosomes.
//!
//! # Quick start
//!
//! ```
//! use u_evolve::ga::{GaConfig, GeneticAlgorithm};
//! use u_evolve::timetable::{Timetable, TimetableProblemDomain};
//!
//! let mut timetable = Timetable::new();
//! timetable
//!     .add_room(1, "A1", 10)
//!     .add_timeslot(1, "Mon 9:00 - 11:00")
//!     .add_professor(1, "Dr P Smith")
//!     .add_module(1, "cs1", "Computer Science", [1])
//!     .add_group(1, 5, [1]);
//!
//! let domain = TimetableProblemDomain::new(timetable)?;
//! let ga = GeneticAlgorithm::new(domain, GaConfig::timetable().with_seed(7))?;
//! let result = ga.evolve(1000)?;
//! assert!(result.solved);
//!
//! let classes = ga.get_solution(&result.best)?;
//! assert_eq!(classes[0].room_label, "A1");
//! # Ok::<(), u_evolve::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` on configuration, catalog records,
//!   cities and results.
//! - `parallel`: rayon-based fitness evaluation when
//!   [`GaConfig::parallel`](ga::GaConfig) is set.

mod error;
pub mod ga;
pub mod random;
pub mod timetable;
pub mod tsp;

pub use error::{Error, Result};
