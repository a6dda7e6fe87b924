//! `lift-sim` — the tick source that drives an elevator fleet.
//!
//! # Period loop
//!
//! ```text
//! every config.tick_period:
//!   ① Assign  — Dispatcher::assign_pending drains the unassigned queue.
//!   ② Tick    — spawn Unit::tick for every unit that is not busy.
//!               Ticks of different units run concurrently; a unit still
//!               mid-tick from an earlier period is left alone.
//! on shutdown:
//!   stop issuing ticks, then wait for the in-flight ones to finish.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::FleetConfig;
//! use lift_sim::FleetBuilder;
//! use tokio_util::sync::CancellationToken;
//!
//! let mut fleet = FleetBuilder::new(FleetConfig::with_units(4))
//!     .observer(Arc::new(TracingObserver))
//!     .build()?;
//! let submitter = fleet.submitter();
//! submitter.submit(1, 7)?;
//!
//! let shutdown = CancellationToken::new();
//! fleet.run(shutdown.clone()).await;
//! ```

pub mod builder;
pub mod fleet;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use fleet::{Fleet, PeriodReport};
