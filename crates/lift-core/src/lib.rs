//! `lift-core` — foundational types for the elevator fleet simulator.
//!
//! Every other `lift-*` crate depends on this one.  It has no `lift-*`
//! dependencies and only a few external ones (`rand`, `thiserror`, `tracing`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `UnitId`                                                 |
//! | [`direction`]   | `Direction`, `Floor`                                     |
//! | [`request`]     | `Request` — an immutable origin → destination trip       |
//! | [`config`]      | `TimingConfig`, `FleetConfig`                            |
//! | [`events`]      | `UnitSnapshot`, `Assignment`, `FleetObserver`, `EventBus` |
//! | [`rng`]         | `TrafficRng` — seeded random trip generation             |
//! | [`error`]       | `LiftError`, `LiftResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on value and config types; needed |
//! |         | to load `FleetConfig` from a file.                          |

pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod ids;
pub mod request;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FleetConfig, TimingConfig};
pub use direction::{Direction, Floor};
pub use error::{LiftError, LiftResult};
pub use events::{Assignment, EventBus, FleetObserver, ObserverError, ObserverResult, UnitSnapshot};
pub use ids::UnitId;
pub use request::Request;
pub use rng::TrafficRng;
