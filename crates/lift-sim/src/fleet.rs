//! The `Fleet` struct and its period loop.

use std::sync::Arc;

use lift_core::{EventBus, FleetConfig, Floor, LiftResult, Request, UnitId};
use lift_dispatch::{Dispatcher, RequestSubmitter};
use lift_unit::{TickOutcome, Unit};
use tokio::task::{JoinError, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

/// What one period did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodReport {
    /// Zero-based period counter.
    pub period:        u64,
    /// Requests assigned by this period's pass.
    pub assigned:      usize,
    /// Unit ticks spawned (units that were busy are not counted).
    pub ticks_started: usize,
}

/// A running elevator fleet: the dispatcher, its units, and the in-flight
/// unit ticks.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder].  All methods that start
/// ticks spawn Tokio tasks and must be called from inside a runtime.
pub struct Fleet {
    config:     FleetConfig,
    dispatcher: Dispatcher,
    events:     Arc<EventBus>,
    in_flight:  JoinSet<(UnitId, TickOutcome)>,
    period:     u64,
}

impl Fleet {
    pub(crate) fn new(config: FleetConfig, dispatcher: Dispatcher, events: Arc<EventBus>) -> Self {
        Self {
            config,
            dispatcher,
            events,
            in_flight: JoinSet::new(),
            period:    0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    pub fn units(&self) -> &[Arc<Unit>] {
        self.dispatcher.units()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Arc<Unit>> {
        self.units().iter().find(|u| u.id() == id)
    }

    /// The shared bus, e.g. to read its failure count.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Number of periods started so far.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Unit ticks spawned but not yet reaped.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// A producer handle for passenger requests.
    pub fn submitter(&self) -> RequestSubmitter {
        self.dispatcher.submitter()
    }

    /// Queue a trip for the next assignment pass.
    pub fn submit(&self, origin: Floor, destination: Floor) -> LiftResult<Request> {
        self.dispatcher.submit(origin, destination)
    }

    // ── Period processing ─────────────────────────────────────────────────

    /// Run one period without waiting for the ticks it starts.
    pub fn start_period(&mut self) -> PeriodReport {
        self.reap_finished();

        let assigned = self.dispatcher.assign_pending().len();

        let mut ticks_started = 0;
        for unit in self.dispatcher.units() {
            if unit.is_busy() {
                continue;
            }
            let unit = Arc::clone(unit);
            self.in_flight.spawn(async move { (unit.id(), unit.tick().await) });
            ticks_started += 1;
        }

        let report = PeriodReport { period: self.period, assigned, ticks_started };
        self.period += 1;
        report
    }

    /// Run one period and wait for every tick it started.
    ///
    /// Useful for tests and deterministic stepping.
    pub async fn step(&mut self) -> PeriodReport {
        let report = self.start_period();
        self.drain().await;
        report
    }

    /// Run periods on the configured cadence until `shutdown` is cancelled,
    /// then wait for in-flight ticks to finish.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        info!(
            units = self.units().len(),
            tick_period_ms = self.config.tick_period_ms,
            "fleet starting"
        );

        let mut interval = tokio::time::interval(self.config.tick_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,

                _ = interval.tick() => {
                    let report = self.start_period();
                    debug!(
                        period = report.period,
                        assigned = report.assigned,
                        ticks_started = report.ticks_started,
                        "period"
                    );
                }
            }
        }

        info!(in_flight = self.in_flight.len(), "fleet stopping");
        self.drain().await;
        info!(periods = self.period, "fleet stopped");
    }

    /// Wait for every in-flight tick to complete.
    pub async fn drain(&mut self) {
        while let Some(joined) = self.in_flight.join_next().await {
            log_joined(joined);
        }
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.in_flight.try_join_next() {
            log_joined(joined);
        }
    }
}

fn log_joined(joined: Result<(UnitId, TickOutcome), JoinError>) {
    match joined {
        Ok((unit, TickOutcome::Ran(report))) => trace!(unit = %unit, ?report, "tick finished"),
        Ok((unit, TickOutcome::Skipped)) => trace!(unit = %unit, "tick skipped"),
        Err(e) => error!(error = %e, "unit update failed"),
    }
}

impl std::fmt::Debug for Fleet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fleet")
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("in_flight", &self.in_flight.len())
            .field("period", &self.period)
            .finish()
    }
}
