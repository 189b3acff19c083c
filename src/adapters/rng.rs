//! `rand`-backed implementations of the layout randomness seam.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::RandomSource;

/// Entropy-seeded source for normal runs.
pub struct ThreadRandom(StdRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Seeded source: the same seed reproduces a layout exactly.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
