//! Fluent builder for constructing a [`Fleet`].

use std::sync::Arc;

use lift_core::{EventBus, FleetConfig, FleetObserver, Floor, LiftError, LiftResult, UnitId};
use lift_dispatch::{Dispatcher, EtaScorer};
use lift_unit::Unit;

use crate::Fleet;

/// Fluent builder for [`Fleet`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                  |
/// |-----------------------|--------------------------|
/// | `.observer(o)`        | No observers             |
/// | `.initial_floors(v)`  | Every unit on floor 1    |
///
/// # Example
///
/// ```rust,ignore
/// let fleet = FleetBuilder::new(config)
///     .observer(Arc::new(TracingObserver))
///     .initial_floors(vec![1, 1, 5, 10])
///     .build()?;
/// ```
pub struct FleetBuilder {
    config:    FleetConfig,
    observers: Vec<Arc<dyn FleetObserver>>,
    floors:    Option<Vec<Floor>>,
}

impl FleetBuilder {
    pub fn new(config: FleetConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            floors:    None,
        }
    }

    /// Register an observer.  Observers are called in registration order.
    pub fn observer(mut self, observer: Arc<dyn FleetObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Starting floor for each unit, in `UnitId` order.
    ///
    /// Must be length `unit_count`.
    pub fn initial_floors(mut self, floors: Vec<Floor>) -> Self {
        self.floors = Some(floors);
        self
    }

    /// Validate the configuration and assemble units, scorer and dispatcher.
    pub fn build(self) -> LiftResult<Fleet> {
        self.config.validate()?;
        let unit_count = self.config.unit_count;

        let floors_len = self.floors.as_ref().map_or(unit_count, Vec::len);
        if floors_len != unit_count {
            return Err(LiftError::Config(format!(
                "initial floors length {floors_len} does not match unit count {unit_count}"
            )));
        }

        let events = Arc::new(EventBus::new(self.observers));
        let units: Vec<Arc<Unit>> = (0..unit_count)
            .map(|i| Arc::new(Unit::new(UnitId::from_position(i), self.config.timing, Arc::clone(&events))))
            .collect();

        if let Some(floors) = &self.floors {
            for (unit, &floor) in units.iter().zip(floors) {
                unit.place(floor);
            }
        }

        let scorer = EtaScorer::from_config(&self.config);
        let dispatcher = Dispatcher::new(units, scorer, Arc::clone(&events))?;

        Ok(Fleet::new(self.config, dispatcher, events))
    }
}
