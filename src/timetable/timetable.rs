//! Timetable catalogs, allocation decoding and clash counting.

use super::model::{Allocation, Group, Module, Professor, Room, Timeslot};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Genes per allocation: timeslot, room, professor.
pub const GENES_PER_ALLOCATION: usize = 3;

/// Id-keyed records kept in insertion order.
///
/// Re-inserting an existing id overwrites the record in place without
/// changing its position.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    records: Vec<T>,
    index: HashMap<u32, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Catalog<T> {
    fn insert(&mut self, id: u32, record: T) {
        match self.index.get(&id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Problem data for classroom timetabling.
///
/// # Examples
///
/// ```
/// use u_evolve::timetable::Timetable;
///
/// let mut timetable = Timetable::new();
/// timetable
///     .add_room(1, "A1", 15)
///     .add_timeslot(1, "Mon 9:00 - 11:00")
///     .add_professor(1, "Dr P Smith")
///     .add_module(1, "cs1", "Computer Science", [1])
///     .add_group(1, 10, [1]);
///
/// assert_eq!(timetable.num_allocations(), 1);
/// assert_eq!(timetable.chromosome_length(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    rooms: Catalog<Room>,
    professors: Catalog<Professor>,
    modules: Catalog<Module>,
    groups: Catalog<Group>,
    timeslots: Catalog<Timeslot>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, id: u32, label: impl Into<String>, capacity: u32) -> &mut Self {
        let room = Room {
            id,
            label: label.into(),
            capacity,
        };
        self.rooms.insert(id, room);
        self
    }

    pub fn add_professor(&mut self, id: u32, name: impl Into<String>) -> &mut Self {
        let professor = Professor {
            id,
            name: name.into(),
        };
        self.professors.insert(id, professor);
        self
    }

    pub fn add_module(
        &mut self,
        id: u32,
        code: impl Into<String>,
        name: impl Into<String>,
        professor_ids: impl IntoIterator<Item = u32>,
    ) -> &mut Self {
        let module = Module {
            id,
            code: code.into(),
            name: name.into(),
            professor_ids: professor_ids.into_iter().collect(),
        };
        self.modules.insert(id, module);
        self
    }

    pub fn add_group(
        &mut self,
        id: u32,
        size: u32,
        module_ids: impl IntoIterator<Item = u32>,
    ) -> &mut Self {
        let group = Group {
            id,
            size,
            module_ids: module_ids.into_iter().collect(),
        };
        self.groups.insert(id, group);
        self
    }

    pub fn add_timeslot(&mut self, id: u32, label: impl Into<String>) -> &mut Self {
        let timeslot = Timeslot {
            id,
            label: label.into(),
        };
        self.timeslots.insert(id, timeslot);
        self
    }

    pub fn rooms(&self) -> &Catalog<Room> {
        &self.rooms
    }

    pub fn professors(&self) -> &Catalog<Professor> {
        &self.professors
    }

    pub fn modules(&self) -> &Catalog<Module> {
        &self.modules
    }

    pub fn groups(&self) -> &Catalog<Group> {
        &self.groups
    }

    pub fn timeslots(&self) -> &Catalog<Timeslot> {
        &self.timeslots
    }

    pub fn room(&self, id: u32) -> Result<&Room> {
        self.rooms.get(id).ok_or_else(|| Error::not_found("room", id))
    }

    pub fn professor(&self, id: u32) -> Result<&Professor> {
        self.professors
            .get(id)
            .ok_or_else(|| Error::not_found("professor", id))
    }

    pub fn module(&self, id: u32) -> Result<&Module> {
        self.modules
            .get(id)
            .ok_or_else(|| Error::not_found("module", id))
    }

    pub fn group(&self, id: u32) -> Result<&Group> {
        self.groups.get(id).ok_or_else(|| Error::not_found("group", id))
    }

    pub fn timeslot(&self, id: u32) -> Result<&Timeslot> {
        self.timeslots
            .get(id)
            .ok_or_else(|| Error::not_found("timeslot", id))
    }

    /// Number of (group, module) pairs to schedule.
    pub fn num_allocations(&self) -> usize {
        self.groups
            .records()
            .iter()
            .map(|group| group.module_ids.len())
            .sum()
    }

    /// Length of a chromosome encoding this timetable.
    pub fn chromosome_length(&self) -> usize {
        GENES_PER_ALLOCATION * self.num_allocations()
    }

    /// Checks that the catalogs can be scheduled at all.
    ///
    /// Every catalog must be non-empty, every group module and module
    /// professor must exist, and every module needs at least one eligible
    /// professor.
    pub fn validate(&self) -> Result<()> {
        let catalogs = [
            ("rooms", self.rooms.is_empty()),
            ("professors", self.professors.is_empty()),
            ("modules", self.modules.is_empty()),
            ("groups", self.groups.is_empty()),
            ("timeslots", self.timeslots.is_empty()),
        ];
        for (name, empty) in catalogs {
            if empty {
                return Err(Error::config(format!("timetable has no {name}")));
            }
        }

        for module in self.modules.records() {
            if module.professor_ids.is_empty() {
                return Err(Error::config(format!(
                    "module {} has no eligible professors",
                    module.id
                )));
            }
            if let Some(&missing) = module
                .professor_ids
                .iter()
                .find(|&&id| !self.professors.contains(id))
            {
                return Err(Error::config(format!(
                    "module {} references unknown professor {missing}",
                    module.id
                )));
            }
        }

        for group in self.groups.records() {
            if let Some(&missing) = group
                .module_ids
                .iter()
                .find(|&&id| !self.modules.contains(id))
            {
                return Err(Error::config(format!(
                    "group {} references unknown module {missing}",
                    group.id
                )));
            }
        }

        if self.num_allocations() == 0 {
            return Err(Error::config("no group attends any module"));
        }
        Ok(())
    }

    /// Decodes a chromosome into allocations, three genes per pair.
    ///
    /// Fails with [`Error::InvalidChromosome`] on a length mismatch. Gene
    /// values are not looked up here.
    pub fn allocations(&self, chromosome: &[u32]) -> Result<Vec<Allocation>> {
        if chromosome.len() != self.chromosome_length() {
            return Err(Error::InvalidChromosome(format!(
                "expected {} genes, got {}",
                self.chromosome_length(),
                chromosome.len()
            )));
        }

        let pairs = self
            .groups
            .records()
            .iter()
            .flat_map(|group| group.module_ids.iter().map(move |&m| (group.id, m)));

        Ok(pairs
            .zip(chromosome.chunks_exact(GENES_PER_ALLOCATION))
            .enumerate()
            .map(|(index, ((group_id, module_id), genes))| Allocation {
                index,
                group_id,
                module_id,
                timeslot_id: genes[0],
                room_id: genes[1],
                professor_id: genes[2],
            })
            .collect())
    }

    /// Counts constraint violations.
    ///
    /// One clash per allocation whose room is smaller than its group. Then
    /// allocations are bucketed by (timeslot, room) and by
    /// (timeslot, professor): the first occupant of a bucket is free and
    /// each later occupant adds exactly one clash.
    ///
    /// Fails with [`Error::NotFound`] if an allocation references an
    /// unknown id.
    pub fn clashes(&self, allocations: &[Allocation]) -> Result<usize> {
        let mut clashes = 0;

        for allocation in allocations {
            let room = self.room(allocation.room_id)?;
            let group = self.group(allocation.group_id)?;
            self.timeslot(allocation.timeslot_id)?;
            self.professor(allocation.professor_id)?;

            if room.capacity < group.size {
                clashes += 1;
            }
        }

        let mut rooms_in_use = HashSet::with_capacity(allocations.len());
        let mut professors_in_use = HashSet::with_capacity(allocations.len());
        for allocation in allocations {
            if !rooms_in_use.insert((allocation.timeslot_id, allocation.room_id)) {
                clashes += 1;
            }
            if !professors_in_use.insert((allocation.timeslot_id, allocation.professor_id)) {
                clashes += 1;
            }
        }

        Ok(clashes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timetable {
        let mut timetable = Timetable::new();
        timetable
            .add_room(1, "A1", 15)
            .add_room(2, "B1", 30)
            .add_timeslot(1, "Mon 9:00 - 11:00")
            .add_timeslot(2, "Mon 11:00 - 13:00")
            .add_professor(1, "Dr P Smith")
            .add_professor(2, "Mrs E Mitchell")
            .add_module(1, "cs1", "Computer Science", [1, 2])
            .add_module(2, "en1", "English", [2])
            .add_group(1, 10, [1, 2])
            .add_group(2, 20, [2]);
        timetable
    }

    fn allocation(index: usize, group: u32, timeslot: u32, room: u32, professor: u32) -> Allocation {
        Allocation {
            index,
            group_id: group,
            module_id: 1,
            timeslot_id: timeslot,
            room_id: room,
            professor_id: professor,
        }
    }

    #[test]
    fn test_re_add_overwrites_in_place() {
        let mut timetable = sample();
        timetable.add_room(1, "A1-renovated", 50);
        assert_eq!(timetable.rooms().len(), 2);
        assert_eq!(timetable.rooms().records()[0].label, "A1-renovated");
        assert_eq!(timetable.room(1).unwrap().capacity, 50);
    }

    #[test]
    fn test_chromosome_length() {
        let timetable = sample();
        assert_eq!(timetable.num_allocations(), 3);
        assert_eq!(timetable.chromosome_length(), 9);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let timetable = sample();
        assert!(matches!(
            timetable.room(99),
            Err(Error::NotFound { kind: "room", id: 99 })
        ));
        assert!(timetable.professor(99).is_err());
        assert!(timetable.module(99).is_err());
        assert!(timetable.group(99).is_err());
        assert!(timetable.timeslot(99).is_err());
    }

    #[test]
    fn test_allocations_follow_catalog_order() {
        let timetable = sample();
        let chromosome = [1, 1, 1, 2, 2, 2, 1, 2, 2];
        let allocations = timetable.allocations(&chromosome).unwrap();

        assert_eq!(allocations.len(), 3);
        assert_eq!((allocations[0].group_id, allocations[0].module_id), (1, 1));
        assert_eq!((allocations[1].group_id, allocations[1].module_id), (1, 2));
        assert_eq!((allocations[2].group_id, allocations[2].module_id), (2, 2));
        assert_eq!(allocations[1].timeslot_id, 2);
        assert_eq!(allocations[2].room_id, 2);
        assert_eq!(allocations[2].professor_id, 2);
        assert_eq!(allocations[2].index, 2);
    }

    #[test]
    fn test_allocations_length_mismatch() {
        let timetable = sample();
        assert!(matches!(
            timetable.allocations(&[1, 1, 1]),
            Err(Error::InvalidChromosome(_))
        ));
    }

    #[test]
    fn test_no_clashes() {
        let timetable = sample();
        let allocations = timetable.allocations(&[1, 1, 1, 2, 2, 2, 1, 2, 2]).unwrap();
        assert_eq!(timetable.clashes(&allocations).unwrap(), 0);
    }

    #[test]
    fn test_capacity_clash() {
        let timetable = sample();
        // group 2 (20 students) in room 1 (15 seats)
        let allocations = vec![allocation(0, 2, 1, 1, 1)];
        assert_eq!(timetable.clashes(&allocations).unwrap(), 1);
    }

    #[test]
    fn test_each_later_occupant_adds_one_clash() {
        let timetable = sample();
        // three allocations share timeslot 1, room 2 and professor 1
        let allocations = vec![
            allocation(0, 1, 1, 2, 1),
            allocation(1, 1, 1, 2, 1),
            allocation(2, 1, 1, 2, 1),
        ];
        // 2 room clashes + 2 professor clashes, not pairwise counts
        assert_eq!(timetable.clashes(&allocations).unwrap(), 4);
    }

    #[test]
    fn test_clashes_unknown_room_fails_fast() {
        let timetable = sample();
        let allocations = vec![allocation(0, 1, 1, 42, 1)];
        assert!(matches!(
            timetable.clashes(&allocations),
            Err(Error::NotFound { kind: "room", id: 42 })
        ));
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_catalog() {
        let mut timetable = Timetable::new();
        timetable.add_room(1, "A1", 10);
        assert!(matches!(timetable.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_dangling_references() {
        let mut timetable = sample();
        timetable.add_group(3, 5, [7]);
        assert!(timetable.validate().is_err());

        let mut timetable = sample();
        timetable.add_module(3, "ma1", "Maths", [9]);
        assert!(timetable.validate().is_err());

        let mut timetable = sample();
        timetable.add_module(3, "ma1", "Maths", Vec::new());
        assert!(timetable.validate().is_err());
    }
}
