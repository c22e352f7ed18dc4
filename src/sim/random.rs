//! Random source seam
//!
//! The tick never owns randomness. Callers pass anything implementing
//! [`RandomSource`]; every `rand` generator does through the blanket impl,
//! so a seeded [`Pcg32`] gives reproducible sessions.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform draws in [0, 1)
pub trait RandomSource {
    fn unit(&mut self) -> f32;

    /// Bernoulli trial with probability `p`
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform value in [lo, hi)
    #[inline]
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Session RNG from a seed
pub fn session_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
