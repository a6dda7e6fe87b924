//! Travel direction of a unit or a request.

use std::fmt;

/// A building floor.  The core never checks it against a building range;
/// callers that care (the lobby demo, a transport layer) validate on input.
pub type Floor = i32;

/// Where a unit is heading, or which way a passenger wants to go.
///
/// Requests only ever carry `Up` or `Down`.  `Idle` is reserved for units
/// with nothing left to do.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    #[default]
    Idle,
}

impl Direction {
    /// `Up` ↔ `Down`.  `Idle` has no opposite and maps to itself.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    /// Floor delta for one move in this direction.
    #[inline]
    pub fn step(self) -> Floor {
        match self {
            Direction::Up   => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        self == Direction::Idle
    }

    /// `true` if `floor` lies strictly past `from` when travelling this way.
    /// Always `false` for `Idle`.
    #[inline]
    pub fn is_beyond(self, from: Floor, floor: Floor) -> bool {
        match self {
            Direction::Up   => floor > from,
            Direction::Down => floor < from,
            Direction::Idle => false,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up   => "Up",
            Direction::Down => "Down",
            Direction::Idle => "Idle",
        };
        f.write_str(s)
    }
}
