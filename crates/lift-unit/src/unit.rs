//! The shared `Unit` handle and its async tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lift_core::{Direction, EventBus, Floor, Request, TimingConfig, UnitId, UnitSnapshot};
use tracing::{debug, trace};

use crate::UnitState;

// ── Tick results ──────────────────────────────────────────────────────────────

/// Result of one [`Unit::tick`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another tick was already running; nothing was done.
    Skipped,
    /// This call performed the step.
    Ran(TickReport),
}

impl TickOutcome {
    pub fn ran(&self) -> bool {
        matches!(self, TickOutcome::Ran(_))
    }
}

/// What a completed tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub dropped_off: usize,
    pub picked_up:   usize,
    /// The floor reached, if the car moved.
    pub moved_to:    Option<Floor>,
}

// ── Busy guard ────────────────────────────────────────────────────────────────

/// Holds a unit's busy flag for the lifetime of one tick.
///
/// Dropping the guard clears the flag, so early returns, panics and a dropped
/// tick future all release the unit.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Unit ──────────────────────────────────────────────────────────────────────

/// One elevator car.
///
/// Shared as `Arc<Unit>` between the dispatcher (which enqueues requests)
/// and the tick source (which drives [`tick`][Self::tick]).  State sits
/// behind a per-unit mutex that is only held for synchronous bookkeeping;
/// the busy flag is what serialises ticks.
pub struct Unit {
    id:     UnitId,
    timing: TimingConfig,
    busy:   AtomicBool,
    state:  Mutex<UnitState>,
    events: Arc<EventBus>,
}

impl Unit {
    /// An idle, empty car on floor 1.
    pub fn new(id: UnitId, timing: TimingConfig, events: Arc<EventBus>) -> Self {
        Self {
            id,
            timing,
            busy: AtomicBool::new(false),
            state: Mutex::new(UnitState::default()),
            events,
        }
    }

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// `true` while a tick is executing.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn floor(&self) -> Floor {
        self.lock_state().floor
    }

    pub fn direction(&self) -> Direction {
        self.lock_state().direction
    }

    pub fn queue_len(&self) -> usize {
        self.lock_state().queue.len()
    }

    /// A consistent copy of the car's state.
    pub fn snapshot(&self) -> UnitSnapshot {
        let state = self.lock_state();
        UnitSnapshot {
            unit:      self.id,
            floor:     state.floor,
            direction: state.direction,
            busy:      self.is_busy(),
            queue:     state.queue.iter().copied().collect(),
        }
    }

    /// Put the car on `floor` without moving it (initial placement).
    pub fn place(&self, floor: Floor) {
        self.lock_state().floor = floor;
    }

    /// Append `request` to the back of the queue and notify observers.
    pub fn enqueue(&self, request: Request) {
        self.lock_state().queue.push_back(request);
        self.publish();
    }

    /// Advance the car by at most one stop-or-move.
    ///
    /// Returns [`TickOutcome::Skipped`] without waiting if another tick for
    /// this unit is in progress.
    pub async fn tick(&self) -> TickOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            trace!(unit = %self.id, "tick skipped, unit busy");
            return TickOutcome::Skipped;
        };

        let mut report = TickReport::default();

        // ① service the current floor
        let service = self.lock_state().service_current_floor();
        report.dropped_off = service.dropped_off.len();
        report.picked_up = service.picked_up.len();
        if service.had_stop() {
            debug!(
                unit = %self.id,
                dropped_off = report.dropped_off,
                picked_up = report.picked_up,
                "stopping"
            );
            self.publish();
            tokio::time::sleep(self.timing.stop_duration()).await;
        }

        // ② pick a direction
        let direction = self.lock_state().choose_direction();

        // ③ move one floor
        if !direction.is_idle() {
            self.publish();
            tokio::time::sleep(self.timing.move_duration()).await;
            let floor = self.lock_state().advance();
            debug!(unit = %self.id, floor, %direction, "moved");
            report.moved_to = Some(floor);
            self.publish();
        }

        TickOutcome::Ran(report)
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.events.unit_state_changed(&snapshot);
    }

    /// Lock the state, recovering it from a poisoned mutex.  No method on
    /// `UnitState` panics midway through an update.
    fn lock_state(&self) -> MutexGuard<'_, UnitState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unit")
            .field("id", &self.id)
            .field("busy", &self.is_busy())
            .field("state", &*self.lock_state())
            .finish()
    }
}
