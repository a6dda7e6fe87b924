//! Fleet error type.
//!
//! Sub-crates share `LiftError` rather than defining their own enums; the only
//! failure domain with its own type is output writing (`lift-output`).

use thiserror::Error;

use crate::Floor;

/// The error type shared by all `lift-*` crates.
#[derive(Debug, Error)]
pub enum LiftError {
    /// A trip whose origin and destination are the same floor.
    #[error("origin and destination floors cannot be the same (floor {0})")]
    SameFloor(Floor),

    /// Fleet set-up that cannot run, such as an empty fleet.
    #[error("fleet configuration error: {0}")]
    Config(String),

    /// A request submitter outlived the dispatcher it feeds.
    #[error("dispatcher is no longer accepting requests")]
    DispatcherClosed,
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
