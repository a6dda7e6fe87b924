//! Unit tests for lift-sim.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lift_core::{
    Assignment, Direction, FleetConfig, FleetObserver, LiftError, ObserverResult, Request,
    TimingConfig, UnitId, UnitSnapshot,
};
use tokio_util::sync::CancellationToken;

use crate::{Fleet, FleetBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn req(origin: i32, destination: i32) -> Request {
    Request::new(origin, destination).unwrap()
}

fn instant_fleet(units: usize) -> Fleet {
    FleetBuilder::new(FleetConfig::with_units(units).timing(TimingConfig::ZERO))
        .build()
        .unwrap()
}

#[derive(Default)]
struct Counts {
    states:      AtomicUsize,
    assignments: AtomicUsize,
}

impl FleetObserver for Counts {
    fn on_unit_state_changed(&self, _s: &UnitSnapshot) -> ObserverResult {
        self.states.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn on_request_assigned(&self, _a: &Assignment) -> ObserverResult {
        self.assignments.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Panics;

impl FleetObserver for Panics {
    fn on_unit_state_changed(&self, _s: &UnitSnapshot) -> ObserverResult {
        panic!("display went away");
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn zero_units_rejected() {
        let err = FleetBuilder::new(FleetConfig::with_units(0)).build().unwrap_err();
        assert!(matches!(err, LiftError::Config(_)));
    }

    #[test]
    fn floors_length_must_match() {
        let err = FleetBuilder::new(FleetConfig::with_units(3))
            .initial_floors(vec![1, 2])
            .build()
            .unwrap_err();
        assert!(matches!(err, LiftError::Config(_)));
    }

    #[test]
    fn initial_floors_applied_in_id_order() {
        let fleet = FleetBuilder::new(FleetConfig::with_units(3))
            .initial_floors(vec![1, 5, 10])
            .build()
            .unwrap();

        let floors: Vec<_> = fleet.units().iter().map(|u| u.floor()).collect();
        assert_eq!(floors, [1, 5, 10]);
        assert_eq!(fleet.unit(UnitId(2)).map(|u| u.floor()), Some(5));
        assert!(fleet.unit(UnitId(4)).is_none());
    }

    #[test]
    fn default_units_start_idle_on_floor_one() {
        let fleet = FleetBuilder::new(FleetConfig::default()).build().unwrap();
        assert_eq!(fleet.units().len(), 4);
        for unit in fleet.units() {
            assert_eq!(unit.floor(), 1);
            assert_eq!(unit.direction(), Direction::Idle);
            assert_eq!(unit.queue_len(), 0);
        }
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[tokio::test]
    async fn single_unit_trip_by_period() {
        let mut fleet = instant_fleet(1);
        fleet.submit(1, 3).unwrap();

        let first = fleet.step().await;
        assert_eq!(first.assigned, 1);
        assert_eq!(first.ticks_started, 1);
        assert_eq!(fleet.units()[0].floor(), 2);

        fleet.step().await;
        let unit = &fleet.units()[0];
        assert_eq!(unit.floor(), 3);
        assert_eq!(unit.queue_len(), 1);

        fleet.step().await;
        let unit = &fleet.units()[0];
        assert_eq!(unit.queue_len(), 0);
        assert_eq!(unit.direction(), Direction::Idle);
        assert_eq!(unit.floor(), 3);
    }

    #[tokio::test]
    async fn each_request_assigned_once() {
        let counts = Arc::new(Counts::default());
        let mut fleet = FleetBuilder::new(FleetConfig::with_units(3).timing(TimingConfig::ZERO))
            .observer(counts.clone())
            .build()
            .unwrap();

        fleet.submit(1, 5).unwrap();
        fleet.submit(3, 7).unwrap();
        fleet.submit(10, 1).unwrap();

        let report = fleet.step().await;
        assert_eq!(report.assigned, 3);
        assert_eq!(counts.assignments.load(Ordering::SeqCst), 3);

        let again = fleet.step().await;
        assert_eq!(again.assigned, 0);
        assert_eq!(counts.assignments.load(Ordering::SeqCst), 3);
        assert!(counts.states.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn period_counter_advances() {
        let mut fleet = instant_fleet(2);
        for expected in 0..5 {
            let report = fleet.step().await;
            assert_eq!(report.period, expected);
        }
        assert_eq!(fleet.period(), 5);
    }

    #[tokio::test]
    async fn panicking_observer_does_not_stop_the_fleet() {
        let mut fleet = FleetBuilder::new(FleetConfig::with_units(1).timing(TimingConfig::ZERO))
            .observer(Arc::new(Panics))
            .build()
            .unwrap();

        fleet.submit(1, 2).unwrap();
        fleet.step().await;
        fleet.step().await;

        assert_eq!(fleet.units()[0].floor(), 2);
        assert_eq!(fleet.units()[0].queue_len(), 0);
        assert!(fleet.events().failures() > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn busy_unit_is_not_ticked_again() {
        let mut fleet = FleetBuilder::new(FleetConfig::with_units(1).timing(TimingConfig::from_secs(5, 5)))
            .build()
            .unwrap();
        fleet.submit(1, 4).unwrap();

        let first = fleet.start_period();
        assert_eq!(first.ticks_started, 1);
        // Let the spawned tick claim the unit and start its stop.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(fleet.units()[0].is_busy());

        let second = fleet.start_period();
        assert_eq!(second.ticks_started, 0);

        fleet.drain().await;
        assert_eq!(fleet.in_flight(), 0);
        assert!(!fleet.units()[0].is_busy());
        assert_eq!(fleet.units()[0].floor(), 2);
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn run_serves_requests_until_shutdown() {
        let config = FleetConfig::with_units(2).timing(TimingConfig::from_secs(1, 1));
        let mut fleet = FleetBuilder::new(config).build().unwrap();
        let submitter = fleet.submitter();
        submitter.submit(1, 3).unwrap();
        submitter.submit(4, 2).unwrap();

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            trigger.cancel();
        });

        fleet.run(shutdown).await;

        assert_eq!(fleet.in_flight(), 0);
        assert!(fleet.period() >= 10);
        for unit in fleet.units() {
            assert_eq!(unit.queue_len(), 0);
            assert_eq!(unit.direction(), Direction::Idle);
            assert!(!unit.is_busy());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_before_start_issues_no_ticks() {
        let mut fleet = instant_fleet(2);
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        fleet.run(shutdown).await;

        assert_eq!(fleet.period(), 0);
        assert_eq!(fleet.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn requests_submitted_while_running_are_served() {
        let config = FleetConfig::with_units(1).timing(TimingConfig::from_millis(100, 100));
        let mut fleet = FleetBuilder::new(config).build().unwrap();
        let submitter = fleet.submitter();

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            submitter.submit(1, 2).unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            trigger.cancel();
        });

        fleet.run(shutdown).await;

        let unit = &fleet.units()[0];
        assert_eq!(unit.floor(), 2);
        assert_eq!(unit.queue_len(), 0);
    }
}
