//! Unit tests for lift-dispatch.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lift_core::{
    Assignment, Direction, EventBus, FleetObserver, LiftError, ObserverResult, Request,
    TimingConfig, UnitId, UnitSnapshot,
};
use lift_unit::Unit;

use crate::{Dispatcher, EtaScorer};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn req(origin: i32, destination: i32) -> Request {
    Request::new(origin, destination).unwrap()
}

fn fleet(n: usize, timing: TimingConfig, events: &Arc<EventBus>) -> Vec<Arc<Unit>> {
    (0..n)
        .map(|i| Arc::new(Unit::new(UnitId::from_position(i), timing, Arc::clone(events))))
        .collect()
}

fn dispatcher(n: usize, timing: TimingConfig) -> Dispatcher {
    let events = Arc::new(EventBus::silent());
    let scorer = EtaScorer::new(timing, Duration::from_secs(20));
    Dispatcher::new(fleet(n, timing, &events), scorer, events).unwrap()
}

fn snapshot(floor: i32, direction: Direction, queue: &[Request]) -> UnitSnapshot {
    UnitSnapshot {
        unit: UnitId(1),
        floor,
        direction,
        busy: false,
        queue: queue.to_vec(),
    }
}

#[derive(Default)]
struct AssignmentCounter(AtomicUsize);

impl FleetObserver for AssignmentCounter {
    fn on_request_assigned(&self, _a: &Assignment) -> ObserverResult {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── EtaScorer ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use super::*;

    fn scorer() -> EtaScorer {
        EtaScorer::new(TimingConfig::from_secs(10, 10), Duration::from_secs(20))
    }

    #[test]
    fn idle_unit_scores_distance_plus_queue() {
        let s = scorer();
        let unit = snapshot(1, Direction::Idle, &[req(1, 2), req(2, 3)]);
        // 3 floors * 10 s + 0 stops + no penalty + 2 queued
        assert_eq!(s.score(&unit, &req(4, 8)), 32.0);
    }

    #[test]
    fn opposite_direction_pays_penalty() {
        let s = scorer();
        let going_up = snapshot(5, Direction::Up, &[]);
        let going_down = snapshot(5, Direction::Down, &[]);
        let downward = req(5, 1);
        assert_eq!(s.score(&going_up, &downward), 20.0);
        assert_eq!(s.score(&going_down, &downward), 0.0);
    }

    #[test]
    fn expected_stops_upward_inclusive() {
        let unit = snapshot(2, Direction::Up, &[req(3, 9), req(8, 9), req(1, 4), req(2, 0)]);
        // (3,9) by origin, (1,4) by destination, (2,0) by origin at the unit's floor
        assert_eq!(EtaScorer::expected_stops(&unit, &req(6, 7)), 3);
    }

    #[test]
    fn expected_stops_downward() {
        let unit = snapshot(8, Direction::Down, &[req(7, 1), req(9, 10), req(5, 3)]);
        assert_eq!(EtaScorer::expected_stops(&unit, &req(5, 2)), 2);
    }

    #[test]
    fn expected_stops_behind_the_unit_ignored() {
        let unit = snapshot(6, Direction::Up, &[req(6, 9)]);
        assert_eq!(EtaScorer::expected_stops(&unit, &req(3, 1)), 0);
    }

    #[test]
    fn idle_unit_expects_no_stops() {
        let unit = snapshot(1, Direction::Idle, &[req(2, 3), req(3, 4)]);
        assert_eq!(EtaScorer::expected_stops(&unit, &req(5, 6)), 0);
    }

    #[test]
    fn distance_at_floor_extremes_does_not_overflow() {
        let s = EtaScorer::new(TimingConfig::from_secs(1, 0), Duration::ZERO);
        let unit = snapshot(i32::MIN, Direction::Idle, &[]);
        assert_eq!(s.score(&unit, &req(i32::MAX, 0)), u32::MAX as f64);
    }

    #[test]
    fn stops_cost_stop_time() {
        let s = scorer();
        let unit = snapshot(1, Direction::Up, &[req(2, 5)]);
        // 2 floors * 10 + 1 stop * 10 + 1 queued
        assert_eq!(s.score(&unit, &req(3, 6)), 31.0);
    }
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn empty_fleet_is_rejected() {
        let events = Arc::new(EventBus::silent());
        let err = Dispatcher::new(vec![], EtaScorer::default(), events).unwrap_err();
        assert!(matches!(err, LiftError::Config(_)));
    }

    #[test]
    fn same_floor_submission_never_queued() {
        let mut d = dispatcher(2, TimingConfig::ZERO);
        assert!(matches!(d.submit(4, 4), Err(LiftError::SameFloor(4))));
        assert!(d.assign_pending().is_empty());
        assert!(d.units().iter().all(|u| u.queue_len() == 0));
    }

    #[test]
    fn empty_pass_emits_nothing() {
        let counter = Arc::new(AssignmentCounter::default());
        let events = Arc::new(EventBus::new(vec![counter.clone()]));
        let mut d = Dispatcher::new(
            fleet(3, TimingConfig::ZERO, &events),
            EtaScorer::default(),
            Arc::clone(&events),
        )
        .unwrap();

        assert!(d.assign_pending().is_empty());
        assert!(d.assign_pending().is_empty());
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn assignment_event_names_unit_and_request() {
        let counter = Arc::new(AssignmentCounter::default());
        let events = Arc::new(EventBus::new(vec![counter.clone()]));
        let mut d = Dispatcher::new(
            fleet(1, TimingConfig::ZERO, &events),
            EtaScorer::default(),
            Arc::clone(&events),
        )
        .unwrap();

        d.submit(2, 4).unwrap();
        let assigned = d.assign_pending();

        assert_eq!(assigned, vec![Assignment { request: req(2, 4), unit: UnitId(1) }]);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(d.units()[0].queue_len(), 1);
    }

    #[test]
    fn closest_unit_wins() {
        let mut d = dispatcher(2, TimingConfig::from_secs(1, 0));
        let (a, b) = (&d.units()[0], &d.units()[1]);
        a.enqueue(req(1, 10));
        b.enqueue(req(3, 4));
        b.place(3);

        d.submit(4, 8).unwrap();
        let assigned = d.assign_pending();

        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].unit, UnitId(2));
        assert!(d.units()[1].snapshot().queue.contains(&req(4, 8)));
    }

    #[test]
    fn closest_unit_wins_while_travelling_up() {
        let mut d = dispatcher(2, TimingConfig::from_secs(1, 0));
        let (a, b) = (&d.units()[0], &d.units()[1]);
        a.enqueue(req(1, 10));
        b.place(3);
        b.enqueue(req(3, 4));
        let mut b_state = b.snapshot();
        b_state.direction = Direction::Up;

        // (3,4) sits inside B's inclusive 3..=4 window but stops cost nothing.
        assert_eq!(EtaScorer::expected_stops(&b_state, &req(4, 8)), 1);
        let scorer = EtaScorer::new(TimingConfig::from_secs(1, 0), Duration::from_secs(20));
        assert_eq!(scorer.score(&b_state, &req(4, 8)), 2.0);
        assert_eq!(scorer.score(&a.snapshot(), &req(4, 8)), 4.0);

        d.submit(4, 8).unwrap();
        assert_eq!(d.assign_pending()[0].unit, UnitId(2));
    }

    #[tokio::test]
    async fn directed_unit_keeps_winning_after_a_tick() {
        let mut d = dispatcher(2, TimingConfig::ZERO);
        let (a, b) = (&d.units()[0], &d.units()[1]);
        a.enqueue(req(1, 10));
        b.place(2);
        b.enqueue(req(3, 4));
        b.tick().await;
        assert_eq!(b.floor(), 3);
        assert_eq!(b.direction(), Direction::Up);

        d.submit(4, 8).unwrap();
        assert_eq!(d.assign_pending()[0].unit, UnitId(2));
    }

    #[test]
    fn submit_and_submitter_share_one_queue() {
        let mut d = dispatcher(1, TimingConfig::ZERO);
        d.submit(1, 2).unwrap();
        d.submitter().submit(2, 3).unwrap();
        assert_eq!(d.assign_pending().len(), 2);
    }

    #[test]
    fn ties_go_to_first_unit() {
        let d = dispatcher(3, TimingConfig::default());
        assert_eq!(d.best_unit(&req(5, 6)).id(), UnitId(1));
    }

    #[test]
    fn equal_units_share_the_load() {
        let mut d = dispatcher(3, TimingConfig::ZERO);
        d.submit(1, 5).unwrap();
        d.submit(3, 7).unwrap();
        d.submit(10, 1).unwrap();

        let assigned = d.assign_pending();

        assert_eq!(assigned.len(), 3);
        let total: usize = d.units().iter().map(|u| u.queue_len()).sum();
        assert_eq!(total, 3);
        assert!(d.units().iter().all(|u| u.queue_len() <= 1));
    }

    #[test]
    fn submission_order_preserved() {
        let mut d = dispatcher(1, TimingConfig::ZERO);
        for (o, t) in [(2, 3), (8, 1), (4, 5)] {
            d.submit(o, t).unwrap();
        }
        d.assign_pending();
        assert_eq!(d.units()[0].snapshot().queue, vec![req(2, 3), req(8, 1), req(4, 5)]);
    }

    #[test]
    fn concurrent_submitters_lose_nothing() {
        let mut d = dispatcher(4, TimingConfig::ZERO);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let submitter = d.submitter();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        submitter.submit(1 + t, 20 + i).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(d.assign_pending().len(), 400);
        let total: usize = d.units().iter().map(|u| u.queue_len()).sum();
        assert_eq!(total, 400);
    }

    #[test]
    fn submitter_outliving_dispatcher_is_closed() {
        let d = dispatcher(1, TimingConfig::ZERO);
        let submitter = d.submitter();
        drop(d);
        assert!(matches!(submitter.submit(1, 2), Err(LiftError::DispatcherClosed)));
    }
}
