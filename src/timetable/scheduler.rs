//! One-call timetable scheduling.

use super::domain::TimetableProblemDomain;
use super::model::ScheduledClass;
use super::timetable::Timetable;
use crate::error::Result;
use crate::ga::{GaConfig, GeneticAlgorithm};
use std::time::Instant;
use tracing::instrument;

/// Outcome of [`TimetableScheduler::schedule`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleResult {
    /// Decoded classes of the best timetable found.
    pub classes: Vec<ScheduledClass>,
    /// Remaining constraint violations; 0 means a feasible timetable.
    pub clashes: usize,
    pub fitness: f64,
    pub generations: usize,
    /// Wall-clock time of the whole run.
    pub computation_time_ms: u128,
}

/// Runs the generic GA on a timetable with the timetable preset.
///
/// ```no_run
/// use u_evolve::timetable::{Timetable, TimetableScheduler};
///
/// let mut timetable = Timetable::new();
/// // ... add rooms, timeslots, professors, modules, groups ...
/// let result = TimetableScheduler::default().schedule(timetable)?;
/// println!("{} clashes", result.clashes);
/// # Ok::<(), u_evolve::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TimetableScheduler {
    config: GaConfig,
}

impl Default for TimetableScheduler {
    fn default() -> Self {
        Self::new(GaConfig::timetable())
    }
}

impl TimetableScheduler {
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Evolves a timetable for up to `config.max_generations` generations
    /// and decodes the best one.
    #[instrument(level = "info", skip_all, fields(allocations = timetable.num_allocations()))]
    pub fn schedule(&self, timetable: Timetable) -> Result<ScheduleResult> {
        let started = Instant::now();

        let domain = TimetableProblemDomain::new(timetable)?;
        let ga = GeneticAlgorithm::new(domain, self.config.clone())?;
        let result = ga.evolve(self.config.max_generations)?;

        let classes = ga.get_solution(&result.best)?;
        let clashes = ga.domain().clashes(&result.best)?;

        Ok(ScheduleResult {
            classes,
            clashes,
            fitness: result.best_fitness,
            generations: result.generations,
            computation_time_ms: started.elapsed().as_millis(),
        })
    }
}
