//! The `EventWriter` trait implemented by backend writers.

use crate::{AssignmentRow, OutputResult, UnitStateRow};

/// A sink for numbered fleet events.
///
/// Driven by [`OutputObserver`][crate::OutputObserver], which serialises
/// calls, so implementations need not be internally synchronised.
pub trait EventWriter {
    fn write_unit_state(&mut self, row: &UnitStateRow) -> OutputResult<()>;

    fn write_assignment(&mut self, row: &AssignmentRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
