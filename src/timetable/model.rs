//! Timetable catalog records and decoded allocations.

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id: u32,
    /// Room number or name shown in results.
    pub label: String,
    /// Seats available.
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Professor {
    pub id: u32,
    pub name: String,
}

/// A course taught to one or more groups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub id: u32,
    pub code: String,
    pub name: String,
    /// Professors allowed to teach this module.
    pub professor_ids: Vec<u32>,
}

/// A student group attending a list of modules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    pub id: u32,
    /// Number of students.
    pub size: u32,
    pub module_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeslot {
    pub id: u32,
    /// Human-readable slot, e.g. "Mon 9:00 - 11:00".
    pub label: String,
}

/// One scheduled unit: a (group, module) pair placed in a timeslot and room
/// with a professor.
///
/// Produced by decoding three consecutive genes per pair, in catalog
/// order: groups first, then each group's module ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Zero-based position of the pair in decoding order.
    pub index: usize,
    pub group_id: u32,
    pub module_id: u32,
    pub timeslot_id: u32,
    pub room_id: u32,
    pub professor_id: u32,
}

/// Domain-facing record for one allocation of a decoded timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledClass {
    /// One-based class number.
    pub allocation_index: usize,
    pub module_name: String,
    pub group_id: u32,
    pub group_size: u32,
    pub room_label: String,
    pub room_capacity: u32,
    pub professor_name: String,
    pub timeslot_label: String,
}
