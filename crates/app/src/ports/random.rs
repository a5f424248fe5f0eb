//! Randomness port: the only source of chance in the simulation.

use std::ops::RangeInclusive;

/// Uniform integer generator.
///
/// Injected into the sensors and the event log so tests can script the
/// outcomes and runs can be replayed from a seed.
pub trait RandomSource: Send + Sync {
    /// Draw an integer uniformly from `range` (both ends included).
    fn next_in(&self, range: RangeInclusive<i32>) -> i32;
}

impl<T: RandomSource + ?Sized> RandomSource for std::sync::Arc<T> {
    fn next_in(&self, range: RangeInclusive<i32>) -> i32 {
        (**self).next_in(range)
    }
}
