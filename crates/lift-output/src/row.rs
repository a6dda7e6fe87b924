//! Plain data row types written by output backends.

use lift_core::{Assignment, Direction, Floor, UnitSnapshot};

/// One unit-state-changed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStateRow {
    pub seq:       u64,
    pub unit_id:   u32,
    pub floor:     Floor,
    pub direction: Direction,
    pub busy:      bool,
    /// Remaining requests as `origin->destination`, joined by `;`.
    pub queue:     String,
}

impl UnitStateRow {
    pub fn from_snapshot(seq: u64, snapshot: &UnitSnapshot) -> Self {
        let queue = snapshot
            .queue
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        Self {
            seq,
            unit_id:   snapshot.unit.into(),
            floor:     snapshot.floor,
            direction: snapshot.direction,
            busy:      snapshot.busy,
            queue,
        }
    }
}

/// One request-assigned event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRow {
    pub seq:         u64,
    pub unit_id:     u32,
    pub origin:      Floor,
    pub destination: Floor,
}

impl AssignmentRow {
    pub fn from_assignment(seq: u64, assignment: &Assignment) -> Self {
        Self {
            seq,
            unit_id:     assignment.unit.into(),
            origin:      assignment.request.origin(),
            destination: assignment.request.destination(),
        }
    }
}
