//! Per-unit position, direction and request queue.

use std::cmp::Ordering;
use std::collections::VecDeque;

use lift_core::{Direction, Floor, Request};

/// The mutable part of one car.
///
/// Every method here is synchronous and finishes in bounded time; the async
/// driver in [`Unit`][crate::Unit] calls them under a short-lived lock and
/// never holds that lock across a suspension.
///
/// Invariant after [`service_current_floor`][Self::service_current_floor]
/// and [`choose_direction`][Self::choose_direction]: an empty queue means
/// `direction == Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitState {
    pub floor:     Floor,
    pub direction: Direction,
    /// Assigned requests in arrival order.
    pub queue:     VecDeque<Request>,
}

/// What happened while servicing one floor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorService {
    /// Requests removed because they end on this floor.
    pub dropped_off: Vec<Request>,
    /// Requests kept in the queue because they start on this floor.
    pub picked_up:   Vec<Request>,
}

impl FloorService {
    /// `true` if the car has to open its doors here.
    #[inline]
    pub fn had_stop(&self) -> bool {
        !self.dropped_off.is_empty() || !self.picked_up.is_empty()
    }
}

impl UnitState {
    /// An idle car with an empty queue at `floor`.
    pub fn new(floor: Floor) -> Self {
        Self {
            floor,
            direction: Direction::Idle,
            queue:     VecDeque::new(),
        }
    }

    /// Drop off and pick up at the current floor.
    ///
    /// Reads the whole queue once, partitions it into removed and kept
    /// entries, then rebuilds the queue from the kept entries in their
    /// original order.  A request ending here is removed whether or not its
    /// origin has been visited yet; a request starting here stays queued
    /// until the car reaches its destination.
    pub fn service_current_floor(&mut self) -> FloorService {
        let floor = self.floor;
        let mut service = FloorService::default();
        let mut kept = VecDeque::with_capacity(self.queue.len());

        for request in self.queue.drain(..) {
            if request.destination() == floor {
                service.dropped_off.push(request);
                continue;
            }
            if request.origin() == floor {
                service.picked_up.push(request);
            }
            kept.push_back(request);
        }
        self.queue = kept;

        if self.queue.is_empty() {
            self.direction = Direction::Idle;
        }
        service
    }

    /// Pick the direction for the next move and store it.
    ///
    /// An idle car heads toward the origin of its oldest request (or, when
    /// already there, the way that request travels).  A directed car keeps
    /// going while any queued origin or destination lies strictly ahead and
    /// turns around otherwise.
    pub fn choose_direction(&mut self) -> Direction {
        let Some(first) = self.queue.front() else {
            self.direction = Direction::Idle;
            return self.direction;
        };

        if self.direction.is_idle() {
            self.direction = match first.origin().cmp(&self.floor) {
                Ordering::Greater => Direction::Up,
                Ordering::Less    => Direction::Down,
                Ordering::Equal   => first.direction(),
            };
        }

        if !self.has_work_beyond(self.direction) {
            self.direction = self.direction.opposite();
        }
        self.direction
    }

    /// `true` if some queued request starts or ends strictly past the current
    /// floor in `direction`.
    pub fn has_work_beyond(&self, direction: Direction) -> bool {
        self.queue.iter().any(|r| {
            direction.is_beyond(self.floor, r.origin())
                || direction.is_beyond(self.floor, r.destination())
        })
    }

    /// Move one floor in the current direction and return the new floor.
    ///
    /// No building bounds are applied; the floor saturates at the `i32`
    /// limits.  An idle car stays put.
    pub fn advance(&mut self) -> Floor {
        self.floor = self.floor.saturating_add(self.direction.step());
        self.floor
    }
}

impl Default for UnitState {
    /// Cars start idle on floor 1.
    fn default() -> Self {
        Self::new(1)
    }
}
