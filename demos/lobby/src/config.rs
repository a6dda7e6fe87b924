//! Lobby run configuration, loaded from JSON.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use lift_core::{FleetConfig, Floor, Request};
use serde::{Deserialize, Serialize};

/// Everything a lobby run needs.  Missing fields take their defaults.
///
/// ```json
/// {
///   "fleet": { "unit_count": 4, "timing": { "move_time_ms": 1000, "stop_time_ms": 1000 } },
///   "min_floor": 1,
///   "max_floor": 10,
///   "requests_per_period": 1,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LobbyConfig {
    pub fleet:               FleetConfig,
    pub min_floor:           Floor,
    pub max_floor:           Floor,
    /// Random trips submitted every tick period.
    pub requests_per_period: u32,
    pub seed:                u64,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            fleet:               FleetConfig::default(),
            min_floor:           1,
            max_floor:           10,
            requests_per_period: 1,
            seed:                42,
        }
    }
}

impl LobbyConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_floor <= self.min_floor {
            bail!(
                "building needs at least two floors, got {}..={}",
                self.min_floor,
                self.max_floor
            );
        }
        self.fleet.validate()?;
        Ok(())
    }

    /// Reject trips that leave the building.
    pub fn check_trip(&self, request: &Request) -> Result<()> {
        let range = self.min_floor..=self.max_floor;
        for floor in [request.origin(), request.destination()] {
            if !range.contains(&floor) {
                bail!("floor {floor} outside {}..={}", self.min_floor, self.max_floor);
            }
        }
        Ok(())
    }
}

/// A `--trip ORIGIN:DESTINATION` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripArg(pub Request);

impl FromStr for TripArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (origin, destination) = s
            .split_once(':')
            .ok_or_else(|| format!("expected ORIGIN:DESTINATION, got `{s}`"))?;
        let parse = |v: &str| v.trim().parse::<Floor>().map_err(|e| format!("bad floor `{v}`: {e}"));
        let request = Request::new(parse(origin)?, parse(destination)?).map_err(|e| e.to_string())?;
        Ok(TripArg(request))
    }
}
