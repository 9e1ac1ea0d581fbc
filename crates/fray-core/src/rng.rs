//! Explicit, seedable random number generation.
//!
//! # Determinism strategy
//!
//! There is no global generator.  The driver owns a root `SimRng` seeded from
//! the run configuration and derives one independent child per worker via
//! [`SimRng::child`]:
//!
//!   child_seed = next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.  Each
//! worker thread then owns its generator outright — no synchronisation, no
//! cross-thread ordering dependency, and the same seed always reproduces the
//! same per-worker stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A seedable generator owned by exactly one component.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to hand
    /// each worker thread its own deterministic stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice; `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    // ── Simulation-specific draws ─────────────────────────────────────────

    /// One six-sided die roll, uniform in `1..=6`.
    #[inline]
    pub fn d6(&mut self) -> u8 {
        self.0.gen_range(1..=6)
    }

    /// One displacement step, uniform in `{-1, 0, +1}`.
    #[inline]
    pub fn step(&mut self) -> i32 {
        self.0.gen_range(-1..=1)
    }
}
