//! `lift-unit` — one elevator car: its queue, floor, direction and tick.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                          |
//! |-----------|-------------------------------------------------------------------|
//! | [`state`] | `UnitState` — synchronous step logic (service, direction, move)   |
//! | [`unit`]  | `Unit` — shared handle with the busy guard and async `tick()`     |
//!
//! # Tick model
//!
//! Each call to [`Unit::tick`] advances the car by at most one stop-or-move:
//!
//! ```text
//! ① Service  — drop off requests ending here, pick up requests starting here.
//!              If anything happened: notify, then wait stop_duration.
//! ② Direction — keep going while work lies ahead, else turn around or idle.
//! ③ Move      — if not idle: notify, wait move_duration, step one floor, notify.
//! ```
//!
//! A tick that finds another tick already running returns immediately with
//! [`TickOutcome::Skipped`].  The busy flag is an atomic compare-and-set, not
//! a lock, so callers never wait on a busy car.

pub mod state;
pub mod unit;


pub use state::{FloorService, UnitState};
pub use unit::{TickOutcome, TickReport, Unit};
