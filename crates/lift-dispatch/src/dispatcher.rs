//! The fleet dispatcher and its request intake.

use std::sync::Arc;

use lift_core::{Assignment, EventBus, Floor, LiftError, LiftResult, Request};
use lift_unit::Unit;
use tokio::sync::mpsc;
use tracing::info;

use crate::EtaScorer;

// ── RequestSubmitter ──────────────────────────────────────────────────────────

/// Producer handle for the unassigned-request queue.
///
/// Cheap to clone; hand one to every task that accepts passenger input.
/// Submission never blocks and never drops a request while the dispatcher
/// is alive.
#[derive(Clone, Debug)]
pub struct RequestSubmitter {
    tx: mpsc::UnboundedSender<Request>,
}

impl RequestSubmitter {
    /// Validate and queue a trip.  Fails with [`LiftError::SameFloor`] if
    /// both floors are equal.
    ///
    /// Floors must already be within the building's range; this is not
    /// checked.
    pub fn submit(&self, origin: Floor, destination: Floor) -> LiftResult<Request> {
        let request = Request::new(origin, destination)?;
        self.submit_request(request)?;
        Ok(request)
    }

    /// Queue an already-built request.
    pub fn submit_request(&self, request: Request) -> LiftResult<()> {
        self.tx.send(request).map_err(|_| LiftError::DispatcherClosed)
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Holds the fleet and the FIFO of requests not yet given to a unit.
///
/// Every request is in exactly one place: this queue, or the queue of the
/// single unit it was assigned to.
pub struct Dispatcher {
    /// Fixed, non-empty, in `UnitId` order.
    units:     Vec<Arc<Unit>>,
    scorer:    EtaScorer,
    events:    Arc<EventBus>,
    submit_tx: mpsc::UnboundedSender<Request>,
    pending:   mpsc::UnboundedReceiver<Request>,
}

impl Dispatcher {
    /// Build a dispatcher over `units`.
    ///
    /// An empty fleet is a configuration error: there would be no unit to
    /// assign anything to.
    pub fn new(units: Vec<Arc<Unit>>, scorer: EtaScorer, events: Arc<EventBus>) -> LiftResult<Self> {
        if units.is_empty() {
            return Err(LiftError::Config("dispatcher needs at least one unit".into()));
        }
        let (submit_tx, pending) = mpsc::unbounded_channel();
        Ok(Self { units, scorer, events, submit_tx, pending })
    }

    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    /// A new producer handle for the unassigned queue.
    pub fn submitter(&self) -> RequestSubmitter {
        RequestSubmitter { tx: self.submit_tx.clone() }
    }

    /// Validate and queue a trip.  See [`RequestSubmitter::submit`].
    pub fn submit(&self, origin: Floor, destination: Floor) -> LiftResult<Request> {
        self.submitter().submit(origin, destination)
    }

    /// Drain the unassigned queue, giving each request to its best unit.
    ///
    /// Requests are handled in submission order, and each one sees the unit
    /// queues as updated by the requests before it.  Emits one
    /// request-assigned event per request.  Returns the assignments made; an
    /// empty queue yields an empty `Vec` and no events.
    pub fn assign_pending(&mut self) -> Vec<Assignment> {
        let mut assigned = Vec::new();

        while let Ok(request) = self.pending.try_recv() {
            let unit = self.best_unit(&request);
            unit.enqueue(request);

            let assignment = Assignment { request, unit: unit.id() };
            info!(request = %request, unit = %assignment.unit, "assigned request");
            self.events.request_assigned(&assignment);
            assigned.push(assignment);
        }
        assigned
    }

    /// The unit with the lowest ETA score for `request`.
    ///
    /// Ties go to the unit earliest in fleet order.
    pub fn best_unit(&self, request: &Request) -> &Arc<Unit> {
        // `new` guarantees at least one unit.
        let mut best = &self.units[0];
        let mut best_score = self.scorer.score(&best.snapshot(), request);

        for unit in &self.units[1..] {
            let score = self.scorer.score(&unit.snapshot(), request);
            if score < best_score {
                best = unit;
                best_score = score;
            }
        }
        best
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("units", &self.units.len())
            .field("scorer", &self.scorer)
            .finish()
    }
}
