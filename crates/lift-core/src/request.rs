//! Passenger trip requests.

use std::fmt;

use crate::{Direction, Floor, LiftError, LiftResult};

/// One passenger trip: board at `origin`, leave at `destination`.
///
/// Immutable once built.  A request is owned by exactly one queue at a time
/// (the dispatcher's unassigned queue or a single unit's queue) and moves
/// between them by value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    origin:      Floor,
    destination: Floor,
}

impl Request {
    /// Build a request, rejecting trips that start and end on the same floor.
    ///
    /// Floors are not range-checked here.
    pub fn new(origin: Floor, destination: Floor) -> LiftResult<Self> {
        if origin == destination {
            return Err(LiftError::SameFloor(origin));
        }
        Ok(Self { origin, destination })
    }

    #[inline]
    pub fn origin(&self) -> Floor {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Floor {
        self.destination
    }

    /// `Up` if the destination is above the origin, otherwise `Down`.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.destination)
    }
}
