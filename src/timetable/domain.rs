//! Timetable scheduling as a GA problem domain.
//!
//! Each (group, module) pair is encoded as three genes: timeslot id, room
//! id and professor id. Any combination of catalog ids is a legal
//! chromosome, so repair is a no-op and the generic operators apply.

use super::model::ScheduledClass;
use super::timetable::Timetable;
use crate::error::Result;
use crate::ga::{Individual, ProblemDomain};
use rand::Rng;

/// GA problem definition for classroom timetabling.
///
/// Fitness is `1 / (1 + clashes)`, so a clash-free timetable scores 1.0.
#[derive(Debug, Clone)]
pub struct TimetableProblemDomain {
    timetable: Timetable,
    room_ids: Vec<u32>,
    timeslot_ids: Vec<u32>,
    /// Eligible professors per allocation, in decoding order.
    eligible_professors: Vec<Vec<u32>>,
}

impl TimetableProblemDomain {
    /// Creates the domain after validating the catalogs.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) if any catalog is
    /// empty or references an unknown id.
    pub fn new(timetable: Timetable) -> Result<Self> {
        timetable.validate()?;

        let room_ids = timetable.rooms().records().iter().map(|r| r.id).collect();
        let timeslot_ids = timetable
            .timeslots()
            .records()
            .iter()
            .map(|t| t.id)
            .collect();

        let mut eligible_professors = Vec::with_capacity(timetable.num_allocations());
        for group in timetable.groups().records() {
            for &module_id in &group.module_ids {
                let module = timetable.module(module_id)?;
                eligible_professors.push(module.professor_ids.clone());
            }
        }

        Ok(Self {
            timetable,
            room_ids,
            timeslot_ids,
            eligible_professors,
        })
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Total clash count of `individual`.
    pub fn clashes(&self, individual: &Individual<u32>) -> Result<usize> {
        let allocations = self.timetable.allocations(individual.chromosome())?;
        self.timetable.clashes(&allocations)
    }
}

impl ProblemDomain for TimetableProblemDomain {
    type Gene = u32;
    type Solution = Vec<ScheduledClass>;

    fn chromosome_length(&self) -> usize {
        self.timetable.chromosome_length()
    }

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual<u32> {
        let mut chromosome = Vec::with_capacity(self.chromosome_length());
        for professors in &self.eligible_professors {
            chromosome.push(self.timeslot_ids[rng.random_range(0..self.timeslot_ids.len())]);
            chromosome.push(self.room_ids[rng.random_range(0..self.room_ids.len())]);
            chromosome.push(professors[rng.random_range(0..professors.len())]);
        }
        Individual::new(chromosome)
    }

    fn calculate_fitness(&self, individual: &Individual<u32>) -> Result<f64> {
        let clashes = self.clashes(individual)?;
        Ok(1.0 / (1.0 + clashes as f64))
    }

    fn decode_solution(&self, best: &Individual<u32>) -> Result<Vec<ScheduledClass>> {
        let allocations = self.timetable.allocations(best.chromosome())?;

        allocations
            .iter()
            .map(|allocation| {
                let group = self.timetable.group(allocation.group_id)?;
                let room = self.timetable.room(allocation.room_id)?;
                Ok(ScheduledClass {
                    allocation_index: allocation.index + 1,
                    module_name: self.timetable.module(allocation.module_id)?.name.clone(),
                    group_id: group.id,
                    group_size: group.size,
                    room_label: room.label.clone(),
                    room_capacity: room.capacity,
                    professor_name: self
                        .timetable
                        .professor(allocation.professor_id)?
                        .name
                        .clone(),
                    timeslot_label: self
                        .timetable
                        .timeslot(allocation.timeslot_id)?
                        .label
                        .clone(),
                })
            })
            .collect()
    }
}
