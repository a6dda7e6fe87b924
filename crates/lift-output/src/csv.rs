//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `unit_states.csv`
//! - `assignments.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{AssignmentRow, OutputResult, UnitStateRow};

/// Writes fleet events to two CSV files.
pub struct CsvWriter {
    states:      Writer<File>,
    assignments: Writer<File>,
    finished:    bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut states = Writer::from_path(dir.join("unit_states.csv"))?;
        states.write_record(["seq", "unit_id", "floor", "direction", "busy", "queue"])?;

        let mut assignments = Writer::from_path(dir.join("assignments.csv"))?;
        assignments.write_record(["seq", "unit_id", "origin", "destination"])?;

        Ok(Self {
            states,
            assignments,
            finished: false,
        })
    }
}

impl EventWriter for CsvWriter {
    fn write_unit_state(&mut self, row: &UnitStateRow) -> OutputResult<()> {
        self.states.write_record(&[
            row.seq.to_string(),
            row.unit_id.to_string(),
            row.floor.to_string(),
            row.direction.to_string(),
            (row.busy as u8).to_string(),
            row.queue.clone(),
        ])?;
        Ok(())
    }

    fn write_assignment(&mut self, row: &AssignmentRow) -> OutputResult<()> {
        self.assignments.write_record(&[
            row.seq.to_string(),
            row.unit_id.to_string(),
            row.origin.to_string(),
            row.destination.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.states.flush()?;
        self.assignments.flush()?;
        Ok(())
    }
}
