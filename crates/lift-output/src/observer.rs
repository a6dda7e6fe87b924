//! `OutputObserver<W>` — bridges `FleetObserver` to an `EventWriter`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lift_core::{Assignment, FleetObserver, ObserverResult, UnitSnapshot};

use crate::row::{AssignmentRow, UnitStateRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`FleetObserver`] that numbers events and writes them to any
/// [`EventWriter`] backend.
///
/// Events arrive from many unit tasks at once; the writer sits behind a
/// mutex and the sequence number is assigned under the same lock, so `seq`
/// is strictly increasing across both output files in write order.
///
/// A failed write is returned to the bus (which logs it) and the first one
/// is also kept for [`take_error`][Self::take_error].
pub struct OutputObserver<W: EventWriter> {
    inner: Mutex<Inner<W>>,
}

struct Inner<W> {
    writer:     W,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(Inner {
                writer,
                next_seq:   0,
                last_error: None,
            }),
        }
    }

    /// Number of events written or attempted so far.
    pub fn events_seen(&self) -> u64 {
        self.lock().next_seq
    }

    /// Take the stored write error, if any.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.lock().last_error.take()
    }

    /// Flush the writer.  Call after the fleet has stopped.
    pub fn finish(&self) -> OutputResult<()> {
        self.lock().writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, f: impl FnOnce(&mut W, u64) -> OutputResult<()>) -> ObserverResult {
        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let Err(e) = f(&mut inner.writer, seq) else {
            return Ok(());
        };
        let message = e.to_string();
        // Keep only the first error.
        if inner.last_error.is_none() {
            inner.last_error = Some(e);
        }
        Err(message.into())
    }
}

impl<W: EventWriter + Send> FleetObserver for OutputObserver<W> {
    fn on_unit_state_changed(&self, snapshot: &UnitSnapshot) -> ObserverResult {
        self.write(|w, seq| w.write_unit_state(&UnitStateRow::from_snapshot(seq, snapshot)))
    }

    fn on_request_assigned(&self, assignment: &Assignment) -> ObserverResult {
        self.write(|w, seq| w.write_assignment(&AssignmentRow::from_assignment(seq, assignment)))
    }
}

impl<W: EventWriter> std::fmt::Debug for OutputObserver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputObserver")
            .field("events_seen", &self.events_seen())
            .finish()
    }
}
