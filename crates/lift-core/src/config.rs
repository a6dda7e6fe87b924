//! Timing and fleet configuration.
//!
//! # Design
//!
//! Durations are stored as integer milliseconds so config files stay
//! readable (`"move_time_ms": 10000`) and arithmetic stays exact.  Accessors
//! hand out `std::time::Duration` for the async code that sleeps on them.
//!
//! Both structs are read once when the fleet is built and copied into every
//! unit and the dispatcher's scorer; nothing mutates them afterwards.

use std::time::Duration;

use crate::{LiftError, LiftResult};

// ── TimingConfig ──────────────────────────────────────────────────────────────

/// How long a unit spends moving one floor and servicing one stop.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Time to travel between adjacent floors.  Default: 10 000 ms.
    pub move_time_ms: u64,
    /// Time doors stay open for a pickup or drop-off.  Default: 10 000 ms.
    pub stop_time_ms: u64,
}

impl TimingConfig {
    /// Both phases take no time.  Units still suspend, but only for a yield.
    pub const ZERO: TimingConfig = TimingConfig { move_time_ms: 0, stop_time_ms: 0 };

    pub fn from_millis(move_time_ms: u64, stop_time_ms: u64) -> Self {
        Self { move_time_ms, stop_time_ms }
    }

    pub fn from_secs(move_secs: u64, stop_secs: u64) -> Self {
        Self::from_millis(move_secs.saturating_mul(1_000), stop_secs.saturating_mul(1_000))
    }

    #[inline]
    pub fn move_duration(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    #[inline]
    pub fn stop_duration(&self) -> Duration {
        Duration::from_millis(self.stop_time_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::from_secs(10, 10)
    }
}

// ── FleetConfig ───────────────────────────────────────────────────────────────

/// Top-level fleet configuration.
///
/// Typically loaded from JSON by the application crate and handed to
/// `lift_sim::FleetBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Number of cars.  Must be at least 1.  Default: 4.
    pub unit_count: usize,

    /// Move/stop durations shared by every unit.
    pub timing: TimingConfig,

    /// Period of the tick source: one assignment pass plus one tick per idle
    /// unit every `tick_period_ms`.  Must be non-zero.  Default: 1000.
    pub tick_period_ms: u64,

    /// Flat ETA cost for a unit already committed to the opposite direction
    /// of a new request.  Default: 20 000 ms.
    pub direction_penalty_ms: u64,
}

impl FleetConfig {
    /// A config with `unit_count` cars and default everything else.
    pub fn with_units(unit_count: usize) -> Self {
        Self { unit_count, ..Self::default() }
    }

    /// Builder-style override of the timing pair.
    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    #[inline]
    pub fn direction_penalty(&self) -> Duration {
        Duration::from_millis(self.direction_penalty_ms)
    }

    /// Reject configurations the fleet cannot run with.
    pub fn validate(&self) -> LiftResult<()> {
        if self.unit_count == 0 {
            return Err(LiftError::Config("fleet must contain at least one unit".into()));
        }
        if self.tick_period_ms == 0 {
            return Err(LiftError::Config("tick_period_ms must be greater than zero".into()));
        }
        Ok(())
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            unit_count:           4,
            timing:               TimingConfig::default(),
            tick_period_ms:       1_000,
            direction_penalty_ms: 20_000,
        }
    }
}
