use std::ops::RangeInclusive;

use rand_core::{impls, Error, RngCore};

pub const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
pub const INCREMENT: u64 = 1_442_695_040_888_963_407;

const LOW_WORD_MAX: f64 = 0xffff_ffff_u32 as f64;

const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Reproducible stream of doubles keyed only by the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededStreamGenerator {
    seed: u64,
    state: u64,
}

impl SeededStreamGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            state: Self::step(seed),
        }
    }

    #[inline(always)]
    fn step(state: u64) -> u64 {
        state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reset(&mut self) {
        self.state = Self::step(self.seed);
    }

    pub fn next_state(&mut self) -> u64 {
        self.state = Self::step(self.state);
        self.state
    }

    // A low word of all ones would land on exactly 1.0
    pub fn next_double(&mut self) -> f64 {
        let low = self.next_state() & 0xffff_ffff;
        (low as f64 / LOW_WORD_MAX).min(BELOW_ONE)
    }

    pub fn next_double_in(&mut self, range: RangeInclusive<f64>) -> f64 {
        let (lo, hi) = range.into_inner();
        lo + self.next_double() * (hi - lo)
    }
}

impl RngCore for SeededStreamGenerator {
    fn next_u32(&mut self) -> u32 {
        self.next_state() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_state()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
