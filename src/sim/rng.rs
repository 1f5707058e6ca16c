//! Seeded PRNG for obstacle generation
//!
//! Mulberry32: one 32-bit state word, pure wrapping integer arithmetic, so the
//! stream for a seed is identical on every platform and every invocation.

use serde::{Deserialize, Serialize};

/// Mulberry32 generator. Every seed, including 0, is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(t | 1);
        r = r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        r ^ (r >> 14)
    }

    /// Uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Uniform value in [min, min + spread)
    #[inline]
    pub fn next_range(&mut self, min: f64, spread: f64) -> f64 {
        min + self.next_f64() * spread
    }
}
