//! `lift-dispatch` — assigns passenger requests to elevator cars.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`scoring`]    | `EtaScorer` — estimated time for a unit to reach a request   |
//! | [`dispatcher`] | `Dispatcher`, `RequestSubmitter` — unassigned queue + pass  |
//!
//! # Assignment pass
//!
//! Requests arrive from any number of producers through cloned
//! [`RequestSubmitter`]s and wait in a FIFO queue.  A single caller drains it
//! with [`Dispatcher::assign_pending`]: each request is scored against every
//! unit's current snapshot and pushed onto the cheapest unit's queue.  The
//! pass takes `&mut self`, so two passes can never overlap.

pub mod dispatcher;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use dispatcher::{Dispatcher, RequestSubmitter};
pub use scoring::EtaScorer;
