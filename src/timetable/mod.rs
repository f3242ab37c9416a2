//! University classroom timetabling.
//!
//! Build a [`Timetable`] catalog of rooms, professors, modules, student
//! groups and timeslots, then either wrap it in a
//! [`TimetableProblemDomain`] for the generic GA or hand it to
//! [`TimetableScheduler`] for a one-call run.
//!
//! # Clashes
//!
//! A decoded timetable is scored by counting, per allocation:
//!
//! - the room is too small for the group;
//! - the room is already used in that timeslot by an earlier allocation;
//! - the professor is already teaching in that timeslot.
//!
//! Fitness is `1 / (1 + clashes)`.

mod domain;
mod model;
mod scheduler;
#[allow(clippy::module_inception)]
mod timetable;

pub use domain::TimetableProblemDomain;
pub use model::{Allocation, Group, Module, Professor, Room, ScheduledClass, Timeslot};
pub use scheduler::{ScheduleResult, TimetableScheduler};
pub use timetable::{Catalog, Timetable, GENES_PER_ALLOCATION};
