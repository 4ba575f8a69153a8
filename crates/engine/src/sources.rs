//! Injected sources of nondeterminism.
//!
//! The engine never reads the wall clock or an RNG directly. Production
//! bots plug in [`UniformJitter`] and [`SystemClock`]; tests pin both.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Aim perturbation. Implementations must return a value in
/// `[-amplitude, amplitude]`.
pub trait Jitter {
    fn sample(&mut self, amplitude: f64) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct UniformJitter<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformJitter<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Jitter for UniformJitter<R> {
    fn sample(&mut self, amplitude: f64) -> f64 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

/// Wall-clock seconds, used by the clock-hand patrol sweep.
pub trait Clock {
    fn unix_seconds(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        time::OffsetDateTime::now_utc().unix_timestamp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}
