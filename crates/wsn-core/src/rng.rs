//! Seeded simulation RNG.
//!
//! # Determinism strategy
//!
//! The whole simulation is single-writer, so one `SmallRng` drives node
//! placement, head sampling and battery drain.  A run seeded with the same value and fed the same command
//! sequence reproduces bit-for-bit.  Unseeded runs pull their seed from OS
//! entropy once at construction.
//!
//! Sub-systems that want an independent stream (e.g. the sensor fleet, so
//! that adding nodes does not shift sensor values) take a [`SimRng::child`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Not `Sync`; owned by whichever context drives the tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from `seed` when given, otherwise from OS entropy.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => SimRng(SmallRng::from_entropy()),
        }
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
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

    /// Uniform jitter in `[-half_width, half_width)`.
    #[inline]
    pub fn jitter(&mut self, half_width: f64) -> f64 {
        (self.0.r#gen::<f64>() - 0.5) * 2.0 * half_width
    }

    /// Uniform index into a collection of `len` elements.
    /// Returns `None` if `len == 0`.
    #[inline]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.0.gen_range(0..len))
        }
    }
}
