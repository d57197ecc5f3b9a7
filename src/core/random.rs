// ============================================================================
// src/core/random.rs - Deterministic randomness
// ============================================================================
//
// Every consumer of pseudo-random numbers (project generation, activity
// timestamp jitter) goes through `RandomSource`, so a fixed sequence can be
// injected and derived output asserted exactly.
//
// ============================================================================

use std::collections::VecDeque;

/// A source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. Returns 0 for a zero bound.
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        ((self.next_f64() * bound as f64).floor() as u64).min(bound - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

// ============================================================================
// LINEAR CONGRUENTIAL GENERATOR
// ============================================================================

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// The default seed used for demo data.
pub const DEFAULT_SEED: u64 = 12345;

/// Small-period LCG: `seed = (seed * 9301 + 49297) % 233280`.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

// ============================================================================
// FIXED SEQUENCE (tests and replays)
// ============================================================================

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: VecDeque<f64>,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values: VecDeque<f64> = values.into_iter().collect();
        Self { values }
    }

    /// A source that always yields the same value.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        match self.values.pop_front() {
            Some(value) => {
                self.values.push_back(value);
                value
            }
            None => 0.0,
        }
    }
}
