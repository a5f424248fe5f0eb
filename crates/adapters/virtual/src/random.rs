//! `rand`-backed implementations of [`RandomSource`].

use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use homesim_app::ports::RandomSource;

/// Draws from the thread-local generator. Not reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in(&self, range: RangeInclusive<i32>) -> i32 {
        rand::rng().random_range(range)
    }
}

/// Deterministic generator for reproducible runs.
///
/// Two sources built from the same seed but different `stream`s produce
/// independent sequences, so the sensors and the event log can be seeded
/// together without sharing draws.
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    /// Stream `0` of `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::stream(seed, 0)
    }

    /// A specific stream of `seed`.
    #[must_use]
    pub fn stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in(&self, range: RangeInclusive<i32>) -> i32 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(range)
    }
}
