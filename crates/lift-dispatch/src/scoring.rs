//! ETA heuristic used to rank candidate units for a request.
//!
//! ```text
//! score = |floor - origin| * move
//!       + expected_stops   * stop
//!       + direction_penalty           (unit committed the other way)
//!       + queue_len * 1.0             (tie-breaker)
//! ```
//!
//! All terms are in seconds.  Lower is better.

use std::time::Duration;

use lift_core::{Direction, FleetConfig, Floor, Request, TimingConfig, UnitSnapshot};

/// Weight of each already-queued request in the score.
pub const QUEUE_TIE_BREAK_WEIGHT: f64 = 1.0;

/// Scores units against requests.  Cheap to copy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EtaScorer {
    move_secs:              f64,
    stop_secs:              f64,
    direction_penalty_secs: f64,
}

impl EtaScorer {
    pub fn new(timing: TimingConfig, direction_penalty: Duration) -> Self {
        Self {
            move_secs:              timing.move_duration().as_secs_f64(),
            stop_secs:              timing.stop_duration().as_secs_f64(),
            direction_penalty_secs: direction_penalty.as_secs_f64(),
        }
    }

    pub fn from_config(config: &FleetConfig) -> Self {
        Self::new(config.timing, config.direction_penalty())
    }

    /// Estimated seconds before `unit` can serve `request`, plus the queue
    /// tie-breaker.
    pub fn score(&self, unit: &UnitSnapshot, request: &Request) -> f64 {
        let floors_to_origin = unit.floor.abs_diff(request.origin()) as f64;
        let stops = Self::expected_stops(unit, request) as f64;
        let penalty = if !unit.direction.is_idle() && unit.direction != request.direction() {
            self.direction_penalty_secs
        } else {
            0.0
        };

        floors_to_origin * self.move_secs
            + stops * self.stop_secs
            + penalty
            + unit.queue_len() as f64 * QUEUE_TIE_BREAK_WEIGHT
    }

    /// Queued requests the unit will stop for on its way to
    /// `request.origin()`.
    ///
    /// Counts entries with an origin or destination between the unit's floor
    /// and the request's origin, inclusive, on the side the unit is heading.
    /// An idle unit expects no stops.
    pub fn expected_stops(unit: &UnitSnapshot, request: &Request) -> usize {
        let (low, high) = match unit.direction {
            Direction::Up   => (unit.floor, request.origin()),
            Direction::Down => (request.origin(), unit.floor),
            Direction::Idle => return 0,
        };
        let on_the_way = |floor: Floor| low <= floor && floor <= high;
        unit.queue
            .iter()
            .filter(|r| on_the_way(r.origin()) || on_the_way(r.destination()))
            .count()
    }
}

impl Default for EtaScorer {
    fn default() -> Self {
        Self::from_config(&FleetConfig::default())
    }
}
