//! `lift-output` — observers that record or log fleet events.
//!
//! | Type                | Does                                                  |
//! |---------------------|-------------------------------------------------------|
//! | [`CsvWriter`]       | `unit_states.csv`, `assignments.csv`                  |
//! | [`OutputObserver`]  | Numbers events and forwards them to an [`EventWriter`] |
//! | [`TracingObserver`] | Logs every event through `tracing`                    |
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, OutputObserver};
//!
//! let output = Arc::new(OutputObserver::new(CsvWriter::new(Path::new("./out"))?));
//! let mut fleet = FleetBuilder::new(config).observer(output.clone()).build()?;
//! fleet.run(shutdown).await;
//! output.finish()?;
//! output.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod logging;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use logging::TracingObserver;
pub use observer::OutputObserver;
pub use row::{AssignmentRow, UnitStateRow};
pub use writer::EventWriter;
