use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum absolute drift per tick, in °C.
pub const MAX_DRIFT: f32 = 1.0;

/// A source of per-tick temperature drift.
///
/// The production implementation is [`RandomWalkProbe`]; a real sensor
/// backend would slot in behind the same trait. The monitor clamps the
/// resulting temperature itself, so implementations only decide the delta.
pub trait TemperatureProbe {
    /// Returns the temperature delta for one driver tick, in °C.
    fn drift(&mut self) -> f32;
}

/// Simulated sensor drift: uniform in `[-MAX_DRIFT, MAX_DRIFT)` per tick.
pub struct RandomWalkProbe {
    rng: StdRng,
}

impl RandomWalkProbe {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible walks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomWalkProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureProbe for RandomWalkProbe {
    fn drift(&mut self) -> f32 {
        self.rng.gen_range(-MAX_DRIFT..MAX_DRIFT)
    }
}
