//! Random draw sources
//!
//! The spawner only ever needs inclusive integer draws, so that is the whole
//! interface. `SeededRandom` is used for play, `SequenceRandom` replays a
//! fixed stream for tests and scripted runs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer draws over an inclusive range
pub trait RandomSource {
    /// Draw from `low..=high`. `low <= high` is required.
    fn draw(&mut self, low: u32, high: u32) -> u32;

    /// Fair coin
    fn coin(&mut self) -> bool {
        self.draw(0, 1) == 1
    }

    /// Pick one item uniformly
    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        debug_assert!(!items.is_empty(), "pick requires at least one item");
        let last = items.len().saturating_sub(1) as u32;
        items[self.draw(0, last) as usize]
    }
}

/// PCG32-backed source, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        debug_assert!(low <= high);
        self.rng.random_range(low..=high)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is clamped into the requested range, so `u32::MAX` always lands
/// on the upper bound and `0` on the lower bound.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Source that always returns the same raw value
    pub fn repeat(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        let raw = if self.values.is_empty() {
            low
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        raw.clamp(low, high)
    }
}
