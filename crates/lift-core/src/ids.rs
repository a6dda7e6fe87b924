//! Strongly typed unit identifier.
//!
//! Units are numbered from 1 in fleet order, so `UnitId(1)` is the first car.
//! The inner integer is `pub` for construction in tests and config; fleet
//! code should prefer [`UnitId::position`] when indexing the unit list.

use std::fmt;

/// Identity of one elevator car.  Stable for the lifetime of a fleet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl UnitId {
    /// The id of the unit at zero-based `position` in the fleet list.
    #[inline]
    pub fn from_position(position: usize) -> Self {
        UnitId(position as u32 + 1)
    }

    /// Zero-based position of this unit in the fleet list.
    ///
    /// # Panics
    /// Panics in debug mode on `UnitId(0)`, which no fleet ever hands out.
    #[inline]
    pub fn position(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit-{}", self.0)
    }
}

impl From<UnitId> for u32 {
    #[inline]
    fn from(id: UnitId) -> u32 {
        id.0
    }
}
