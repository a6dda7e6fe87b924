//! Fleet notifications and the in-process bus that fans them out.
//!
//! Two events leave the core:
//!
//! | Event              | Payload          | Emitted by                          |
//! |--------------------|------------------|-------------------------------------|
//! | unit state changed | [`UnitSnapshot`] | a unit, at every phase boundary     |
//! | request assigned   | [`Assignment`]   | the dispatcher, once per request    |
//!
//! Observers are best-effort.  [`EventBus`] calls each one in registration
//! order inside its own error boundary: an `Err` or a panic from one observer
//! is logged and counted, and the remaining observers still see the event.
//! Nothing an observer does can change unit or dispatcher state.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::{Direction, Floor, Request, UnitId};

/// Error returned by an observer.  Any error type will do.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by every [`FleetObserver`] hook.
pub type ObserverResult = Result<(), ObserverError>;

// ── Payloads ──────────────────────────────────────────────────────────────────

/// A read-only copy of one unit's state at emission time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub unit:      UnitId,
    pub floor:     Floor,
    pub direction: Direction,
    /// `true` while a tick is executing for this unit.
    pub busy:      bool,
    /// Remaining requests, in queue order.
    pub queue:     Vec<Request>,
}

impl UnitSnapshot {
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

/// A request committed to a unit by the dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub request: Request,
    pub unit:    UnitId,
}

// ── FleetObserver ─────────────────────────────────────────────────────────────

/// Callbacks invoked when fleet state changes.
///
/// Both methods default to `Ok(())` so implementors only override what they
/// care about.  Hooks run synchronously on whichever task emitted the event,
/// so they should be quick; hand heavy work off to a channel.
///
/// # Example — assignment counter
///
/// ```rust,ignore
/// struct Counter(AtomicUsize);
///
/// impl FleetObserver for Counter {
///     fn on_request_assigned(&self, _a: &Assignment) -> ObserverResult {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
pub trait FleetObserver: Send + Sync {
    fn on_unit_state_changed(&self, _snapshot: &UnitSnapshot) -> ObserverResult {
        Ok(())
    }

    fn on_request_assigned(&self, _assignment: &Assignment) -> ObserverResult {
        Ok(())
    }
}

// ── EventBus ──────────────────────────────────────────────────────────────────

/// Fixed set of observers shared by every unit and the dispatcher.
///
/// The observer list is frozen at construction, so emission takes no lock.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Arc<dyn FleetObserver>>,
    failures:  AtomicU64,
}

impl EventBus {
    pub fn new(observers: Vec<Arc<dyn FleetObserver>>) -> Self {
        Self { observers, failures: AtomicU64::new(0) }
    }

    /// A bus with no observers.  Every emission is a no-op.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Number of observer calls that returned an error or panicked.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn unit_state_changed(&self, snapshot: &UnitSnapshot) {
        self.emit("unit_state_changed", |obs| obs.on_unit_state_changed(snapshot));
    }

    pub fn request_assigned(&self, assignment: &Assignment) {
        self.emit("request_assigned", |obs| obs.on_request_assigned(assignment));
    }

    fn emit<F>(&self, event: &'static str, call: F)
    where
        F: Fn(&dyn FleetObserver) -> ObserverResult,
    {
        for (index, observer) in self.observers.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| call(observer.as_ref()))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(event, observer = index, error = %e, "observer failed");
                }
                Err(payload) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(event, observer = index, panic = panic_message(payload.as_ref()), "observer panicked");
                }
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("failures", &self.failures())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
