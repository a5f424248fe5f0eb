//! Simulated sensors: motion and environment.
//!
//! Neither sensor keeps state between reads: every call draws fresh values
//! from the injected [`RandomSource`].

use std::sync::Arc;

use homesim_domain::reading::{EnvironmentReading, HUMIDITY_RANGE_PCT, TEMPERATURE_RANGE_C};

use crate::ports::RandomSource;

/// Passive infrared sensor that reports motion one time in three.
#[derive(Clone)]
pub struct MotionSensor {
    random: Arc<dyn RandomSource>,
}

impl MotionSensor {
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Draw one of three equally likely outcomes, only the first of which
    /// is motion.
    #[must_use]
    pub fn detect(&self) -> bool {
        self.random.next_in(0..=2) == 0
    }
}

/// Temperature/humidity sampler.
#[derive(Clone)]
pub struct EnvironmentSampler {
    random: Arc<dyn RandomSource>,
}

impl EnvironmentSampler {
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Temperature first, then humidity.
    #[must_use]
    pub fn sample(&self) -> EnvironmentReading {
        let reading = EnvironmentReading {
            temperature_c: self.random.next_in(TEMPERATURE_RANGE_C),
            humidity_pct: self.random.next_in(HUMIDITY_RANGE_PCT),
        };
        debug_assert!(reading.is_in_range(), "{reading:?}");
        reading
    }
}

#[cfg(test)]
mod tests {
    use std::ops::RangeInclusive;
    use std::sync::Mutex;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::testing::ScriptedRandom;

    struct ChaChaSource(Mutex<ChaCha8Rng>);

    impl ChaChaSource {
        fn seeded(seed: u64) -> Arc<Self> {
            Arc::new(Self(Mutex::new(ChaCha8Rng::seed_from_u64(seed))))
        }
    }

    impl RandomSource for ChaChaSource {
        fn next_in(&self, range: RangeInclusive<i32>) -> i32 {
            self.0.lock().unwrap().random_range(range)
        }
    }

    #[test]
    fn should_detect_motion_only_on_first_outcome() {
        let sensor = MotionSensor::new(Arc::new(ScriptedRandom::new([0, 1, 2])));
        assert!(sensor.detect());
        assert!(!sensor.detect());
        assert!(!sensor.detect());
    }

    #[test]
    fn should_sample_temperature_then_humidity() {
        let sampler = EnvironmentSampler::new(Arc::new(ScriptedRandom::new([29, 44])));
        let reading = sampler.sample();
        assert_eq!(reading.temperature_c, 29);
        assert_eq!(reading.humidity_pct, 44);
    }

    #[test]
    fn should_keep_ten_thousand_samples_in_range() {
        let sampler = EnvironmentSampler::new(ChaChaSource::seeded(42));
        let mut temperatures = std::collections::BTreeSet::new();
        for _ in 0..10_000 {
            let reading = sampler.sample();
            assert!(reading.is_in_range(), "{reading:?}");
            temperatures.insert(reading.temperature_c);
        }
        // every integer of the closed range shows up
        assert_eq!(temperatures.len(), 11);
    }

    #[test]
    fn should_report_motion_roughly_one_time_in_three() {
        let sensor = MotionSensor::new(ChaChaSource::seeded(7));
        let hits = (0..9_000).filter(|_| sensor.detect()).count();
        assert!((2_400..3_600).contains(&hits), "hits = {hits}");
    }
}
