//! Per-run random source.
//!
//! Every random draw in a generation run goes through one `RandomSource`,
//! so a fixed seed reproduces the same image byte for byte. The source is
//! not shared between threads; parallel runs each build their own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// Seeded generator owned by a single pipeline run
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    /// Create a source from an explicit seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source from OS entropy. The drawn seed is kept so the run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[range.start, range.end)`. An empty range yields `range.start`.
    pub fn uniform(&mut self, range: Range<i32>) -> i32 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.random_range(range)
    }

    /// Uniform float in `[range.start, range.end)`. An empty range yields `range.start`.
    pub fn uniform_f32(&mut self, range: Range<f32>) -> f32 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.random_range(range)
    }

    /// Uniform index in `[0, len)`
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    /// Uniformly chosen element of a non-empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.index(items.len())]
    }

    /// Uniform byte in `[0, 255]`
    pub fn byte(&mut self) -> u8 {
        self.rng.random()
    }
}
