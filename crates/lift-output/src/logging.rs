//! `TracingObserver` — writes every fleet event to the `tracing` log.

use lift_core::{Assignment, FleetObserver, ObserverResult, UnitSnapshot};
use tracing::{debug, info};

/// Logs unit state changes at `debug` and assignments at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FleetObserver for TracingObserver {
    fn on_unit_state_changed(&self, snapshot: &UnitSnapshot) -> ObserverResult {
        debug!(
            unit = %snapshot.unit,
            floor = snapshot.floor,
            direction = %snapshot.direction,
            busy = snapshot.busy,
            queued = snapshot.queue_len(),
            "unit state"
        );
        Ok(())
    }

    fn on_request_assigned(&self, assignment: &Assignment) -> ObserverResult {
        info!(
            unit = %assignment.unit,
            origin = assignment.request.origin(),
            destination = assignment.request.destination(),
            "request assigned"
        );
        Ok(())
    }
}
