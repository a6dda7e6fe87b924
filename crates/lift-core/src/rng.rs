//! Deterministic RNG for synthetic passenger traffic.
//!
//! The same seed always produces the same sequence of trips, so demo runs
//! and load tests are reproducible.  The core itself never draws random
//! numbers; only traffic generators do.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Floor, Request};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded generator of random trips inside a floor range.
pub struct TrafficRng(SmallRng);

impl TrafficRng {
    pub fn new(seed: u64) -> Self {
        TrafficRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child generator, e.g. one per producer task.
    pub fn child(&mut self, offset: u64) -> TrafficRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        TrafficRng(SmallRng::seed_from_u64(child_seed))
    }

    /// A random trip with both ends in `min..=max` and distinct floors.
    ///
    /// Returns `None` when the range holds fewer than two floors.
    pub fn trip(&mut self, min: Floor, max: Floor) -> Option<Request> {
        if max <= min {
            return None;
        }
        let origin = self.0.gen_range(min..=max);
        // Draw from the range minus one slot and skip over the origin.
        let mut destination = self.0.gen_range(min..max);
        if destination >= origin {
            destination += 1;
        }
        Request::new(origin, destination).ok()
    }
}
